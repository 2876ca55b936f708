//! Output accumulator.
//!
//! Collects the parts of one generated declaration while the generator walks
//! its source, then assembles them into a [`CompilationUnit`]. An
//! accumulator is created per (declaration, variant) run and consumed by
//! [`OutputAccumulator::assemble`].

use crate::ast::{
    CompilationUnit, ConstructorDecl, FieldDecl, MethodDecl, Modifier, TypeDeclaration,
};
use crate::error::{GenerationError, GenerationWarning};
use crate::generator::GenerationResult;
use fluentgen_model::{ImportDecl, TypeParameter, TypeReference};
use indexmap::IndexSet;

/// Write-only builder for one generated declaration.
#[derive(Debug, Default)]
pub struct OutputAccumulator {
    package: Option<String>,
    imports: IndexSet<ImportDecl>,
    documentation: Option<String>,
    modifiers: Vec<Modifier>,
    is_interface: bool,
    name: String,
    type_parameters: Vec<TypeParameter>,
    extended_types: Vec<TypeReference>,
    implemented_types: Vec<TypeReference>,
    constructors: Vec<ConstructorDecl>,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    warnings: Vec<GenerationWarning>,
    errors: Vec<GenerationError>,
}

impl OutputAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package. Later calls are ignored.
    pub fn set_package(&mut self, package: String) {
        if self.package.is_none() {
            self.package = Some(package);
        }
    }

    /// Adds an import. Re-adding an identical import does nothing.
    pub fn add_import(&mut self, import: ImportDecl) {
        self.imports.insert(import);
    }

    /// Sets the Javadoc text.
    pub fn set_documentation(&mut self, documentation: String) {
        self.documentation = Some(documentation);
    }

    /// Adds a class-level modifier.
    pub fn add_class_modifier(&mut self, modifier: Modifier) {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
    }

    /// Marks the output as an interface.
    pub fn set_interface(&mut self, is_interface: bool) {
        self.is_interface = is_interface;
    }

    /// Sets the simple name.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Appends a type parameter.
    pub fn add_type_parameter(&mut self, param: TypeParameter) {
        self.type_parameters.push(param);
    }

    /// Appends an extended type.
    pub fn add_extended_type(&mut self, type_ref: TypeReference) {
        self.extended_types.push(type_ref);
    }

    /// Appends an implemented type.
    pub fn add_implemented_type(&mut self, type_ref: TypeReference) {
        self.implemented_types.push(type_ref);
    }

    /// Appends a constructor.
    pub fn add_constructor(&mut self, constructor: ConstructorDecl) {
        self.constructors.push(constructor);
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }

    /// Appends a method.
    pub fn add_method(&mut self, method: MethodDecl) {
        self.methods.push(method);
    }

    /// Records a warning.
    pub fn add_warning(&mut self, warning: GenerationWarning) {
        self.warnings.push(warning);
    }

    /// Records an error.
    pub fn add_error(&mut self, error: GenerationError) {
        self.errors.push(error);
    }

    /// Returns true if any error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Simple name set so far.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assembles the accumulated parts.
    ///
    /// # Returns
    /// `Failure` with every diagnostic if any error was recorded, otherwise
    /// `Success` with the assembled unit and the warnings.
    #[must_use]
    pub fn assemble(self) -> GenerationResult {
        if !self.errors.is_empty() {
            return GenerationResult::Failure {
                warnings: self.warnings,
                errors: self.errors,
            };
        }

        let declaration = TypeDeclaration {
            documentation: self.documentation,
            modifiers: self.modifiers,
            is_interface: self.is_interface,
            name: self.name,
            type_parameters: self.type_parameters,
            extended_types: self.extended_types,
            implemented_types: self.implemented_types,
            constructors: self.constructors,
            fields: self.fields,
            methods: self.methods,
        };

        GenerationResult::Success {
            unit: CompilationUnit {
                package: self.package,
                imports: self.imports.into_iter().collect(),
                declaration,
            },
            warnings: self.warnings,
        }
    }
}
