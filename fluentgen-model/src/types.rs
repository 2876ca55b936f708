//! Structural model of source declarations.
//!
//! This module contains the data structures describing one parsed source
//! unit: its package, imports, declarations, methods and type references.
//! Types are classified by structural category only; nothing here resolves
//! names against a symbol table.

use std::fmt;

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceUnit {
    /// Package name, if the file declares one.
    pub package: Option<String>,
    /// Import declarations in source order.
    pub imports: Vec<ImportDecl>,
    /// Top-level declarations in source order.
    pub declarations: Vec<SourceDeclaration>,
}

impl SourceUnit {
    /// Creates an empty unit in the given package.
    #[must_use]
    pub fn new(package: Option<String>) -> Self {
        Self {
            package,
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Returns the single top-level declaration, if there is exactly one.
    #[must_use]
    pub fn primary(&self) -> Option<&SourceDeclaration> {
        match self.declarations.as_slice() {
            [declaration] => Some(declaration),
            _ => None,
        }
    }

    /// Returns the fully qualified name of a top-level declaration.
    #[must_use]
    pub fn qualified_name(&self, declaration: &SourceDeclaration) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package, declaration.name),
            None => declaration.name.clone(),
        }
    }
}

/// Import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportDecl {
    /// Dotted name, without any trailing `.*`.
    pub name: String,
    /// Whether this is a static import.
    pub is_static: bool,
    /// Whether this is an on-demand (`.*`) import.
    pub is_asterisk: bool,
}

impl ImportDecl {
    /// Creates a single-type import.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_asterisk: false,
        }
    }

    /// Creates an on-demand import.
    #[must_use]
    pub fn asterisk(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_asterisk: true,
        }
    }

    /// Creates a static single-member import.
    #[must_use]
    pub fn static_member(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: true,
            is_asterisk: false,
        }
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        f.write_str(&self.name)?;
        if self.is_asterisk {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclarationKind {
    /// Class declaration.
    #[default]
    Class,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Record declaration.
    Record,
    /// Annotation type declaration.
    Annotation,
}

impl DeclarationKind {
    /// Parses a kind from its descriptor element name.
    #[must_use]
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "record" => Some(Self::Record),
            "annotation" => Some(Self::Annotation),
            _ => None,
        }
    }

    /// Returns the Java keyword for this kind.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Annotation => "@interface",
        }
    }

    /// Returns true for classes and interfaces.
    #[must_use]
    pub const fn is_class_or_interface(&self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }
}

/// Access level of a declaration or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// `public`.
    #[default]
    Public,
    /// `protected`.
    Protected,
    /// No modifier.
    Package,
    /// `private`.
    Private,
}

impl Visibility {
    /// Parses visibility from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "package" | "package-private" | "default" => Some(Self::Package),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Returns true for `public`.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// One parsed class-or-interface (or other type) declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDeclaration {
    /// Simple name.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclarationKind,
    /// Access level.
    pub visibility: Visibility,
    /// Whether the declaration is abstract.
    pub is_abstract: bool,
    /// Whether the declaration is final.
    pub is_final: bool,
    /// Declared type parameters.
    pub type_parameters: Vec<TypeParameter>,
    /// Types listed after `extends`.
    pub extended_types: Vec<TypeReference>,
    /// Types listed after `implements`.
    pub implemented_types: Vec<TypeReference>,
    /// Nested member types.
    pub nested_types: Vec<NestedType>,
    /// Declared methods in source order.
    pub methods: Vec<MethodSignature>,
}

impl SourceDeclaration {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Returns true for interfaces.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, DeclarationKind::Interface)
    }

    /// Returns true if a member type with this simple name is nested here.
    #[must_use]
    pub fn has_nested_type(&self, name: &str) -> bool {
        self.nested_types.iter().any(|nested| nested.name == name)
    }

    /// Returns all supertypes, extended first.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeReference> {
        self.extended_types.iter().chain(&self.implemented_types)
    }

    /// Returns true if any supertype has the given simple name.
    #[must_use]
    pub fn has_supertype_named(&self, name: &str) -> bool {
        self.supertypes()
            .filter_map(TypeReference::simple_name)
            .any(|simple| simple == name)
    }

    /// Returns the declaration's own type applied to its type parameters,
    /// e.g. `Map<K, V>` for `interface Map<K, V>`.
    #[must_use]
    pub fn self_type(&self) -> TypeReference {
        TypeReference::object(
            self.name.clone(),
            self.type_parameters
                .iter()
                .map(TypeParameter::as_argument)
                .collect(),
        )
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// Member type nested inside a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestedType {
    /// Simple name.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclarationKind,
}

impl NestedType {
    /// Creates a new nested type entry.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    /// Parameter name.
    pub name: String,
    /// Bounds joined with `&`.
    pub bounds: Vec<TypeReference>,
}

impl TypeParameter {
    /// Creates an unbounded type parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Creates a type parameter with bounds.
    #[must_use]
    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeReference>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Returns a reference to this parameter, usable as a type argument.
    #[must_use]
    pub fn as_argument(&self) -> TypeReference {
        TypeReference::TypeParameter(self.name.clone())
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { " extends " } else { " & " })?;
            write!(f, "{}", bound)?;
        }
        Ok(())
    }
}

/// Method modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MethodModifiers {
    /// Access level.
    pub visibility: Visibility,
    /// `static`.
    pub is_static: bool,
    /// Has a body in an interface (`default`).
    pub is_default: bool,
    /// `abstract`.
    pub is_abstract: bool,
    /// `final`.
    pub is_final: bool,
}

/// Declared method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Declared type parameters.
    pub type_parameters: Vec<TypeParameter>,
    /// Parameters in order.
    pub parameters: Vec<Parameter>,
    /// Return type.
    pub return_type: TypeReference,
    /// Declared thrown types.
    pub thrown_types: Vec<TypeReference>,
    /// Modifier flags.
    pub modifiers: MethodModifiers,
}

impl MethodSignature {
    /// Creates a public instance method without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type,
            thrown_types: Vec::new(),
            modifiers: MethodModifiers::default(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_ref: TypeReference) -> Self {
        self.parameters.push(Parameter::new(name, type_ref));
        self
    }

    /// Returns true if the method is static.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Returns true if the method is public.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.modifiers.visibility.is_public()
    }

    /// Returns true if the method returns `void`.
    #[must_use]
    pub const fn returns_void(&self) -> bool {
        matches!(self.return_type, TypeReference::Void)
    }

    /// Returns true if this method overrides one of the `java.lang.Object`
    /// methods a default method may not redeclare.
    #[must_use]
    pub fn is_object_method(&self) -> bool {
        match (self.name.as_str(), self.parameters.len()) {
            ("equals", 1) | ("hashCode", 0) | ("toString", 0) => true,
            _ => false,
        }
    }

    /// Returns true for compiler-generated names.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.name.contains("$$")
    }

    /// Comma-separated parameter names, as used at a call site.
    #[must_use]
    pub fn argument_list(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type. For varargs this is the array type.
    pub type_ref: TypeReference,
    /// Whether declared with `...`.
    pub is_varargs: bool,
}

impl Parameter {
    /// Creates a regular parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeReference) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_varargs: false,
        }
    }
}

/// Java primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Boolean.
    Boolean,
    /// UTF-16 code unit.
    Char,
}

impl PrimitiveKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Char,
    ];

    /// Returns the Java keyword.
    #[must_use]
    pub const fn java_name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
        }
    }

    /// Parses a primitive kind from its Java keyword.
    #[must_use]
    pub fn from_java_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "boolean" => Some(Self::Boolean),
            "char" => Some(Self::Char),
            _ => None,
        }
    }

    /// Returns the capitalized keyword, e.g. `Int` for `int`.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Char => "Char",
        }
    }

    /// Returns the position of this kind in [`PrimitiveKind::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Structural category of a type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// `void`.
    Void,
    /// One of the eight primitives.
    Primitive,
    /// Class or interface reference.
    Object,
    /// Array of a primitive.
    PrimitiveArray,
    /// Array of anything else.
    ObjectArray,
    /// `?` with optional bound.
    Wildcard,
    /// Reference to a declared type parameter.
    TypeParameter,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Void => "void",
            Self::Primitive => "primitive",
            Self::Object => "object",
            Self::PrimitiveArray => "primitive array",
            Self::ObjectArray => "object array",
            Self::Wildcard => "wildcard",
            Self::TypeParameter => "type parameter",
        })
    }
}

/// Reference to a type, classified by structural category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeReference {
    /// `void`.
    Void,
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Class or interface type with type arguments.
    Object(ObjectType),
    /// Array of the element type.
    Array(Box<TypeReference>),
    /// Wildcard type argument.
    Wildcard {
        /// Upper bound (`? extends`).
        extends: Option<Box<TypeReference>>,
        /// Lower bound (`? super`).
        super_bound: Option<Box<TypeReference>>,
    },
    /// Reference to a type parameter in scope.
    TypeParameter(String),
}

impl TypeReference {
    /// Creates an object type reference.
    #[must_use]
    pub fn object(name: impl Into<String>, type_arguments: Vec<TypeReference>) -> Self {
        Self::Object(ObjectType {
            name: name.into(),
            type_arguments,
        })
    }

    /// Creates an object type reference without type arguments.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::object(name, Vec::new())
    }

    /// Creates an array of the given element.
    #[must_use]
    pub fn array_of(element: TypeReference) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates an unbounded wildcard.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::Wildcard {
            extends: None,
            super_bound: None,
        }
    }

    /// Returns the structural category.
    #[must_use]
    pub fn category(&self) -> TypeCategory {
        match self {
            Self::Void => TypeCategory::Void,
            Self::Primitive(_) => TypeCategory::Primitive,
            Self::Object(_) => TypeCategory::Object,
            Self::Array(element) => match **element {
                Self::Primitive(_) => TypeCategory::PrimitiveArray,
                _ => TypeCategory::ObjectArray,
            },
            Self::Wildcard { .. } => TypeCategory::Wildcard,
            Self::TypeParameter(_) => TypeCategory::TypeParameter,
        }
    }

    /// Returns the object type, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the last name segment of an object type.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        self.as_object().map(ObjectType::simple_name)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(kind) => f.write_str(kind.java_name()),
            Self::Object(object) => write!(f, "{}", object),
            Self::Array(element) => write!(f, "{}[]", element),
            Self::Wildcard {
                extends,
                super_bound,
            } => {
                f.write_str("?")?;
                if let Some(bound) = extends {
                    write!(f, " extends {}", bound)?;
                }
                if let Some(bound) = super_bound {
                    write!(f, " super {}", bound)?;
                }
                Ok(())
            }
            Self::TypeParameter(name) => f.write_str(name),
        }
    }
}

/// Class or interface reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    /// Simple or dotted name.
    pub name: String,
    /// Type arguments, empty for raw or non-generic types.
    pub type_arguments: Vec<TypeReference>,
}

impl ObjectType {
    /// Returns the last dotted segment of the name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Returns true if the name has no dots.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.name.contains('.')
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Lowercases the first character of a name, e.g. `Button` to `button`.
#[must_use]
pub fn uncapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
