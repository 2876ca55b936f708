//! Shared generation walk.
//!
//! [`Generator::generate`] walks one source unit in a fixed order (package,
//! imports, declaration header, methods) and pushes fragments into an
//! [`OutputAccumulator`]. Every shape-specific decision is delegated to the
//! selected [`Variant`].

use crate::ast::{CompilationUnit, GeneratedParameter, Modifier};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationWarning};
use crate::output::OutputAccumulator;
use crate::resolver::TypeResolver;
use crate::variants::{Variant, VariantKind};
use fluentgen_model::{
    DeclarationIndex, ImportDecl, MethodSignature, SourceDeclaration, SourceUnit, TypeReference,
};
use std::fmt;

/// Immutable inputs of one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    /// Source declaration being wrapped.
    pub declaration: &'a SourceDeclaration,
    /// Source package, empty for the default package.
    pub package: &'a str,
    /// Index of all discovered declarations.
    pub index: &'a DeclarationIndex,
}

impl<'a> GenerationContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(
        declaration: &'a SourceDeclaration,
        package: &'a str,
        index: &'a DeclarationIndex,
    ) -> Self {
        Self {
            declaration,
            package,
            index,
        }
    }

    /// Qualifies a simple name with the source package.
    #[must_use]
    pub fn qualify(&self, simple_name: &str) -> String {
        if self.package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.package, simple_name)
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// The unit was assembled.
    Success {
        /// Generated unit.
        unit: CompilationUnit,
        /// Recoverable diagnostics.
        warnings: Vec<GenerationWarning>,
    },
    /// At least one fatal error was recorded; nothing was assembled.
    Failure {
        /// Recoverable diagnostics.
        warnings: Vec<GenerationWarning>,
        /// Fatal diagnostics, never empty.
        errors: Vec<GenerationError>,
    },
}

impl GenerationResult {
    /// Returns true for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the generated unit, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&CompilationUnit> {
        match self {
            Self::Success { unit, .. } => Some(unit),
            Self::Failure { .. } => None,
        }
    }

    /// Consumes the result and returns the generated unit, if any.
    #[must_use]
    pub fn into_unit(self) -> Option<CompilationUnit> {
        match self {
            Self::Success { unit, .. } => Some(unit),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the recorded warnings.
    #[must_use]
    pub fn warnings(&self) -> &[GenerationWarning] {
        match self {
            Self::Success { warnings, .. } | Self::Failure { warnings, .. } => warnings,
        }
    }

    /// Returns the recorded errors; empty on success.
    #[must_use]
    pub fn errors(&self) -> &[GenerationError] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors, .. } => errors,
        }
    }
}

/// Progress of the walk over one source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing visited yet.
    Start,
    /// Package set.
    PackageVisited,
    /// All imports visited.
    ImportsVisited,
    /// Declaration header emitted.
    HeaderEmitted,
    /// At least one method visited.
    MethodVisited,
    /// Walk completed.
    Done,
    /// Walk stopped on a fatal error.
    Aborted,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Generates one wrapper variant from source units.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    index: &'a DeclarationIndex,
    resolver: TypeResolver<'a>,
    variant: VariantKind,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    ///
    /// # Arguments
    /// * `config` - Generator configuration
    /// * `index` - Index of all discovered declarations, built beforehand
    /// * `variant` - Shape of the generated declaration
    #[must_use]
    pub fn new(config: &'a GeneratorConfig, index: &'a DeclarationIndex, variant: VariantKind) -> Self {
        Self {
            config,
            index,
            resolver: TypeResolver::new(config),
            variant,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Returns the type resolver.
    #[must_use]
    pub fn resolver(&self) -> &TypeResolver<'a> {
        &self.resolver
    }

    /// Returns the generated variant.
    #[must_use]
    pub fn variant(&self) -> VariantKind {
        self.variant
    }

    /// Generates the wrapper for one source unit.
    ///
    /// Never fails outright: every problem is recorded as a diagnostic and
    /// reported through the returned [`GenerationResult`].
    #[must_use]
    pub fn generate(&self, unit: &SourceUnit) -> GenerationResult {
        self.generate_with_state(unit).0
    }

    /// Generates the wrapper for one source unit and reports where the walk
    /// stopped: [`GenerationState::Done`] on success,
    /// [`GenerationState::Aborted`] otherwise.
    #[must_use]
    pub fn generate_with_state(&self, unit: &SourceUnit) -> (GenerationResult, GenerationState) {
        let variant = self.variant.strategy();
        let mut output = OutputAccumulator::new();
        let mut state = GenerationState::Start;

        let declaration = match primary_declaration(unit) {
            Ok(declaration) => declaration,
            Err(error) => {
                output.add_error(error);
                advance(&mut state, GenerationState::Aborted);
                return (output.assemble(), state);
            }
        };

        let context = GenerationContext::new(
            declaration,
            unit.package.as_deref().unwrap_or_default(),
            self.index,
        );
        tracing::debug!(
            "Generating {} variant for {}",
            self.variant,
            context.qualify(&declaration.name)
        );

        output.add_import(ImportDecl::asterisk(self.config.marker_package()));
        output.add_import(ImportDecl::asterisk(self.config.carrier_package()));

        self.visit_package(&context, &mut output);
        advance(&mut state, GenerationState::PackageVisited);

        for import in &unit.imports {
            self.visit_import(import, &context, &mut output);
        }
        advance(&mut state, GenerationState::ImportsVisited);

        self.visit_header(variant, &context, &mut output);
        advance(&mut state, GenerationState::HeaderEmitted);

        for method in declaration.methods.iter().filter(|m| is_eligible(m)) {
            let visited = self
                .check_method(method, &context, &mut output)
                .and_then(|()| variant.generate_method(self, &context, method, &mut output));
            if let Err(error) = visited {
                output.add_error(error);
                advance(&mut state, GenerationState::Aborted);
                return (output.assemble(), state);
            }
            advance(&mut state, GenerationState::MethodVisited);
        }

        advance(&mut state, GenerationState::Done);
        (output.assemble(), state)
    }

    fn visit_package(&self, context: &GenerationContext<'_>, output: &mut OutputAccumulator) {
        output.set_package(self.config.output_package(context.package));
        if context.package.is_empty() {
            return;
        }
        output.add_import(ImportDecl::asterisk(context.package));
        output.add_import(ImportDecl::asterisk(
            context.qualify(&context.declaration.name),
        ));
    }

    fn visit_import(
        &self,
        import: &ImportDecl,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) {
        if import.is_static {
            output.add_import(import.clone());
            return;
        }

        let mut prefix = import.name.as_str();
        loop {
            if context.index.is_non_public(prefix) {
                output.add_warning(GenerationWarning::InaccessibleImport {
                    name: import.to_string(),
                });
                return;
            }
            match prefix.rsplit_once('.') {
                Some((parent, _)) if parent.contains('.') => prefix = parent,
                _ => break,
            }
        }

        output.add_import(import.clone());
        if !import.is_asterisk {
            output.add_import(ImportDecl::asterisk(import.name.clone()));
        }
    }

    fn visit_header(
        &self,
        variant: &dyn Variant,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) {
        output.set_documentation(variant.documentation_header(self.config, context));
        output.add_class_modifier(Modifier::Public);
        output.set_name(variant.class_simple_name(&context.declaration.name));
        for param in variant.type_parameters(self.config, context) {
            output.add_type_parameter(param);
        }
        variant.complete_header(self, context, output);
    }

    /// Checks what every variant needs from a method: a resolvable return
    /// type and accessible parameter types. Same-package enum parameter
    /// types are imported.
    fn check_method(
        &self,
        method: &MethodSignature,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) -> Result<(), GenerationError> {
        self.resolver.resolve_return_type(method, context)?;

        for param in &method.parameters {
            let Some(object) = innermost_object(&param.type_ref) else {
                continue;
            };
            if !object.is_simple() {
                continue;
            }
            let qualified = context.qualify(&object.name);
            if context.index.is_non_public(&qualified) {
                return Err(GenerationError::InaccessibleParameterType {
                    method: method.name.clone(),
                    type_name: qualified,
                });
            }
            if context.index.is_enum(&qualified) {
                output.add_import(ImportDecl::single(qualified));
            }
        }
        Ok(())
    }

    /// Builds the `final` parameters of a generated method.
    ///
    /// With `resolve` set, parameter types go through the type resolver;
    /// otherwise they are copied as written.
    #[must_use]
    pub fn parameters(
        &self,
        method: &MethodSignature,
        context: &GenerationContext<'_>,
        resolve: bool,
    ) -> Vec<GeneratedParameter> {
        method
            .parameters
            .iter()
            .map(|param| GeneratedParameter {
                is_final: true,
                type_ref: if resolve {
                    self.resolver.resolve_parameter_type(&param.type_ref, context)
                } else {
                    param.type_ref.clone()
                },
                name: param.name.clone(),
                is_varargs: param.is_varargs,
            })
            .collect()
    }

    /// Renders the call forwarding to the wrapped value, without `;`.
    #[must_use]
    pub fn forward_call(&self, method: &MethodSignature) -> String {
        format!(
            "{}().{}({})",
            self.config.wrapped_accessor(),
            method.name,
            method.argument_list()
        )
    }
}

/// Returns the single top-level class or interface of a unit.
fn primary_declaration(unit: &SourceUnit) -> Result<&SourceDeclaration, GenerationError> {
    let declaration = unit
        .primary()
        .ok_or(GenerationError::MultipleDeclarations {
            count: unit.declarations.len(),
        })?;
    if !declaration.kind.is_class_or_interface() {
        return Err(GenerationError::UnsupportedDeclaration {
            name: declaration.name.clone(),
            kind: declaration.kind.keyword().to_string(),
        });
    }
    Ok(declaration)
}

/// Instance methods that get a fluent counterpart.
fn is_eligible(method: &MethodSignature) -> bool {
    !method.is_static() && method.is_public() && !method.is_object_method() && !method.is_synthetic()
}

fn innermost_object(type_ref: &TypeReference) -> Option<&fluentgen_model::ObjectType> {
    match type_ref {
        TypeReference::Array(element) => innermost_object(element),
        other => other.as_object(),
    }
}

fn advance(state: &mut GenerationState, next: GenerationState) {
    tracing::trace!("Generation state {} -> {}", state, next);
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fluentgen_model::{DeclarationKind, PrimitiveKind, Visibility};

    fn config() -> GeneratorConfig {
        GeneratorConfig::builder()
            .generated_on(NaiveDate::from_ymd_opt(2023, 3, 14).expect("valid date"))
            .build()
    }

    fn unit_with(declarations: Vec<SourceDeclaration>) -> SourceUnit {
        let mut unit = SourceUnit::new(Some("com.vaadin.flow.component.button".to_string()));
        unit.declarations = declarations;
        unit
    }

    fn button() -> SourceDeclaration {
        let mut button = SourceDeclaration::new("Button", DeclarationKind::Class);
        button
            .methods
            .push(MethodSignature::new("click", TypeReference::Void));
        button
    }

    #[test]
    fn test_two_declarations_fail() {
        let config = config();
        let index = DeclarationIndex::new();
        let unit = unit_with(vec![
            button(),
            SourceDeclaration::new("ButtonHelper", DeclarationKind::Class),
        ]);

        for kind in VariantKind::ALL {
            let result = Generator::new(&config, &index, kind).generate(&unit);
            assert!(!result.is_success());
            assert!(result.unit().is_none());
            assert_eq!(
                result.errors(),
                &[GenerationError::MultipleDeclarations { count: 2 }]
            );
        }
    }

    #[test]
    fn test_final_walk_state() {
        let config = config();
        let index = DeclarationIndex::new();
        let generator = Generator::new(&config, &index, VariantKind::Interface);

        let (result, state) = generator.generate_with_state(&unit_with(vec![button()]));
        assert!(result.is_success());
        assert_eq!(state, GenerationState::Done);

        let (result, state) = generator.generate_with_state(&unit_with(vec![
            button(),
            SourceDeclaration::new("ButtonHelper", DeclarationKind::Class),
        ]));
        assert!(!result.is_success());
        assert_eq!(state, GenerationState::Aborted);

        let mut broken = button();
        broken.methods.push(MethodSignature::new(
            "getValue",
            TypeReference::TypeParameter("V".to_string()),
        ));
        let (_, state) = generator.generate_with_state(&unit_with(vec![broken]));
        assert_eq!(state, GenerationState::Aborted);
        assert_eq!(state.to_string(), "Aborted");
    }

    #[test]
    fn test_empty_unit_fails() {
        let config = config();
        let index = DeclarationIndex::new();
        let result =
            Generator::new(&config, &index, VariantKind::Interface).generate(&unit_with(vec![]));
        assert_eq!(
            result.errors(),
            &[GenerationError::MultipleDeclarations { count: 0 }]
        );
    }

    #[test]
    fn test_enum_declaration_fails() {
        let config = config();
        let index = DeclarationIndex::new();
        let unit = unit_with(vec![SourceDeclaration::new(
            "ButtonVariant",
            DeclarationKind::Enum,
        )]);
        let result = Generator::new(&config, &index, VariantKind::Interface).generate(&unit);
        assert!(matches!(
            result.errors(),
            [GenerationError::UnsupportedDeclaration { .. }]
        ));
    }

    #[test]
    fn test_package_and_fixed_imports() {
        let config = config();
        let index = DeclarationIndex::new();
        let unit = unit_with(vec![button()]);
        let result = Generator::new(&config, &index, VariantKind::Interface).generate(&unit);
        let generated = result.into_unit().expect("success");

        assert_eq!(
            generated.package.as_deref(),
            Some("com.oliveryasuna.vaadin.fluent.com.vaadin.flow.component.button")
        );
        assert_eq!(
            generated.imports,
            vec![
                ImportDecl::asterisk("com.oliveryasuna.commons.language.pattern.fluent"),
                ImportDecl::asterisk("com.oliveryasuna.commons.language.pattern.fluent.breakdown"),
                ImportDecl::asterisk("com.vaadin.flow.component.button"),
                ImportDecl::asterisk("com.vaadin.flow.component.button.Button"),
            ]
        );
    }

    #[test]
    fn test_import_rules() {
        let config = config();
        let mut index = DeclarationIndex::new();
        index.add_non_public("com.vaadin.flow.internal.Hidden");

        let mut unit = unit_with(vec![button()]);
        unit.imports = vec![
            ImportDecl::single("java.util.List"),
            ImportDecl::asterisk("java.util.function"),
            ImportDecl::static_member("java.util.Objects.requireNonNull"),
            ImportDecl::single("com.vaadin.flow.internal.Hidden.Inner"),
            ImportDecl::single("com.vaadin.flow.internal.Hidden"),
        ];

        let result = Generator::new(&config, &index, VariantKind::Interface).generate(&unit);
        assert_eq!(result.warnings().len(), 2);
        let generated = result.into_unit().expect("success");
        let imports: Vec<String> = generated.imports.iter().map(ToString::to_string).collect();

        assert!(imports.contains(&"java.util.List".to_string()));
        assert!(imports.contains(&"java.util.List.*".to_string()));
        assert!(imports.contains(&"java.util.function.*".to_string()));
        assert!(imports.contains(&"static java.util.Objects.requireNonNull".to_string()));
        assert!(!imports.iter().any(|i| i.contains("Hidden")));
    }

    #[test]
    fn test_header_common_parts() {
        let config = config();
        let index = DeclarationIndex::new();
        let unit = unit_with(vec![button()]);
        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit)
            .into_unit()
            .expect("success");
        let declaration = generated.declaration;

        assert!(declaration.has_modifier(Modifier::Public));
        assert_eq!(declaration.name, "IButtonFactory");
        let documentation = declaration.documentation.expect("documentation");
        assert!(documentation.contains("{@link Button}"));
        assert!(documentation.contains("Date: 2023-03-14"));
    }

    #[test]
    fn test_method_filtering() {
        let config = config();
        let index = DeclarationIndex::new();
        let mut declaration = button();

        let mut hidden = MethodSignature::new("hidden", TypeReference::Void);
        hidden.modifiers.visibility = Visibility::Protected;
        declaration.methods.push(hidden);

        let mut factory = MethodSignature::new("create", TypeReference::named("Button"));
        factory.modifiers.is_static = true;
        declaration.methods.push(factory);

        declaration.methods.push(
            MethodSignature::new("equals", TypeReference::Primitive(PrimitiveKind::Boolean))
                .with_parameter("other", TypeReference::named("Object")),
        );
        declaration
            .methods
            .push(MethodSignature::new("hashCode", TypeReference::Primitive(PrimitiveKind::Int)));
        declaration
            .methods
            .push(MethodSignature::new("lambda$$0", TypeReference::Void));

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit_with(vec![declaration]))
            .into_unit()
            .expect("success");
        let names: Vec<&str> = generated
            .declaration
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["click"]);
    }

    #[test]
    fn test_unresolvable_return_aborts_declaration() {
        let config = config();
        let index = DeclarationIndex::new();
        let mut declaration = button();
        declaration.methods.push(MethodSignature::new(
            "getValue",
            TypeReference::TypeParameter("V".to_string()),
        ));

        let result = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit_with(vec![declaration]));
        assert!(result.unit().is_none());
        assert!(matches!(
            result.errors(),
            [GenerationError::UnresolvableReturnType { .. }]
        ));
    }

    #[test]
    fn test_inaccessible_parameter_aborts_declaration() {
        let config = config();
        let mut index = DeclarationIndex::new();
        index.add_non_public("com.vaadin.flow.component.button.ButtonState");

        let mut declaration = button();
        declaration.methods.push(
            MethodSignature::new("restore", TypeReference::Void)
                .with_parameter("state", TypeReference::named("ButtonState")),
        );

        for kind in VariantKind::ALL {
            let result =
                Generator::new(&config, &index, kind).generate(&unit_with(vec![declaration.clone()]));
            assert!(matches!(
                result.errors(),
                [GenerationError::InaccessibleParameterType { type_name, .. }]
                    if type_name == "com.vaadin.flow.component.button.ButtonState"
            ));
        }
    }

    #[test]
    fn test_same_package_enum_parameter_imported() {
        let config = config();
        let mut index = DeclarationIndex::new();
        index.add_enum("com.vaadin.flow.component.button.ButtonVariant");

        let mut declaration = button();
        let mut method = MethodSignature::new("addThemeVariants", TypeReference::Void);
        method.parameters.push(fluentgen_model::Parameter {
            name: "variants".to_string(),
            type_ref: TypeReference::array_of(TypeReference::named("ButtonVariant")),
            is_varargs: true,
        });
        declaration.methods.push(method);

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit_with(vec![declaration]))
            .into_unit()
            .expect("success");
        assert!(generated.imports.contains(&ImportDecl::single(
            "com.vaadin.flow.component.button.ButtonVariant"
        )));
    }

    #[test]
    fn test_default_package_unit() {
        let config = config();
        let index = DeclarationIndex::new();
        let mut unit = SourceUnit::new(None);
        unit.declarations.push(button());

        let generated = Generator::new(&config, &index, VariantKind::Concrete)
            .generate(&unit)
            .into_unit()
            .expect("success");
        assert_eq!(
            generated.package.as_deref(),
            Some("com.oliveryasuna.vaadin.fluent")
        );
        assert_eq!(generated.imports.len(), 2);
    }
}
