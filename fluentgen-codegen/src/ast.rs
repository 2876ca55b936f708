//! Output tree of a generated Java declaration.
//!
//! The generator never builds source text directly; it fills these nodes
//! through the [`OutputAccumulator`](crate::output::OutputAccumulator), and
//! the [`emit`](crate::emit) module renders them. Generated types reuse
//! [`TypeReference`] from the model crate.

use fluentgen_model::{ImportDecl, TypeParameter, TypeReference};
use std::fmt;
use std::path::PathBuf;

/// Java modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `public`.
    Public,
    /// `protected`.
    Protected,
    /// `private`.
    Private,
    /// `abstract`.
    Abstract,
    /// `static`.
    Static,
    /// `final`.
    Final,
    /// `default` (interface method with a body).
    Default,
}

impl Modifier {
    /// Returns the Java keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Method or constructor body as a list of statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Statements, each complete with its trailing `;`.
    pub statements: Vec<String>,
}

impl Block {
    /// Creates a block from statements.
    #[must_use]
    pub fn new(statements: Vec<String>) -> Self {
        Self { statements }
    }

    /// Appends a statement.
    #[must_use]
    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statements.push(statement.into());
        self
    }
}

/// Parameter of a generated method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedParameter {
    /// Whether the parameter is `final`.
    pub is_final: bool,
    /// Parameter type. For varargs this is the array type.
    pub type_ref: TypeReference,
    /// Parameter name.
    pub name: String,
    /// Whether rendered with `...`.
    pub is_varargs: bool,
}

impl GeneratedParameter {
    /// Creates a `final` parameter.
    #[must_use]
    pub fn final_param(type_ref: TypeReference, name: impl Into<String>) -> Self {
        Self {
            is_final: true,
            type_ref,
            name: name.into(),
            is_varargs: false,
        }
    }
}

impl fmt::Display for GeneratedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final {
            f.write_str("final ")?;
        }
        match (&self.type_ref, self.is_varargs) {
            (TypeReference::Array(element), true) => write!(f, "{}...", element)?,
            (type_ref, _) => write!(f, "{}", type_ref)?,
        }
        write!(f, " {}", self.name)
    }
}

/// Generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Modifiers in emission order.
    pub modifiers: Vec<Modifier>,
    /// Method type parameters.
    pub type_parameters: Vec<TypeParameter>,
    /// Return type.
    pub return_type: TypeReference,
    /// Method name.
    pub name: String,
    /// Parameters.
    pub parameters: Vec<GeneratedParameter>,
    /// Thrown types.
    pub thrown_types: Vec<TypeReference>,
    /// Body; `None` for abstract methods.
    pub body: Option<Block>,
}

impl MethodDecl {
    /// Creates a method without modifiers, parameters or body.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeReference) -> Self {
        Self {
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            return_type,
            name: name.into(),
            parameters: Vec::new(),
            thrown_types: Vec::new(),
            body: None,
        }
    }

    /// Returns true if the method has the given modifier.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// Generated constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    /// Modifiers in emission order.
    pub modifiers: Vec<Modifier>,
    /// Constructor name, equal to the class name.
    pub name: String,
    /// Parameters.
    pub parameters: Vec<GeneratedParameter>,
    /// Body.
    pub body: Block,
}

/// Generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Modifiers in emission order.
    pub modifiers: Vec<Modifier>,
    /// Field type.
    pub type_ref: TypeReference,
    /// Field name.
    pub name: String,
    /// Initializer expression, without `=`.
    pub initializer: Option<String>,
}

/// Generated class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDeclaration {
    /// Javadoc text without comment markers.
    pub documentation: Option<String>,
    /// Class-level modifiers.
    pub modifiers: Vec<Modifier>,
    /// Whether this is an interface.
    pub is_interface: bool,
    /// Simple name.
    pub name: String,
    /// Type parameters.
    pub type_parameters: Vec<TypeParameter>,
    /// Extended types.
    pub extended_types: Vec<TypeReference>,
    /// Implemented types.
    pub implemented_types: Vec<TypeReference>,
    /// Constructors.
    pub constructors: Vec<ConstructorDecl>,
    /// Fields.
    pub fields: Vec<FieldDecl>,
    /// Methods.
    pub methods: Vec<MethodDecl>,
}

impl TypeDeclaration {
    /// Looks up a method by name.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Returns true if the declaration has the given modifier.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.constructors.len() + self.fields.len() + self.methods.len()
    }
}

/// One emittable Java file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationUnit {
    /// Package name.
    pub package: Option<String>,
    /// Imports in insertion order.
    pub imports: Vec<ImportDecl>,
    /// The single declaration.
    pub declaration: TypeDeclaration,
}

impl CompilationUnit {
    /// Returns the fully qualified name of the declaration.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package, self.declaration.name),
            None => self.declaration.name.clone(),
        }
    }

    /// Returns the file path relative to an output root,
    /// `<package path>/<Name>.java`.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(package) = &self.package {
            for segment in package.split('.') {
                path.push(segment);
            }
        }
        path.push(format!("{}.java", self.declaration.name));
        path
    }
}
