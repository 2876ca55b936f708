//! Abstract base class variant, `Abstract…Factory`.

use super::interface::interface_name;
use super::{Variant, documentation, fluent_type_arguments};
use crate::ast::{Block, ConstructorDecl, GeneratedParameter, MethodDecl, Modifier};
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::{GenerationContext, Generator};
use crate::output::OutputAccumulator;
use fluentgen_model::{MethodSignature, TypeReference, uncapitalize};

/// Abstract base class variant strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseVariant;

/// Generated base class name for a source simple name.
pub(crate) fn base_name(source_name: &str) -> String {
    format!("Abstract{}Factory", source_name)
}

/// Builds the constructor taking the wrapped value and passing it to
/// `super`.
pub(crate) fn forwarding_constructor(
    class_name: String,
    config: &GeneratorConfig,
    context: &GenerationContext<'_>,
) -> ConstructorDecl {
    let param_name = uncapitalize(&context.declaration.name);
    ConstructorDecl {
        modifiers: vec![Modifier::Public],
        name: class_name,
        parameters: vec![GeneratedParameter::final_param(
            TypeReference::TypeParameter(config.wrapped_type_parameter().to_string()),
            param_name.clone(),
        )],
        body: Block::default().statement(format!("super({});", param_name)),
    }
}

impl Variant for BaseVariant {
    fn class_simple_name(&self, source_name: &str) -> String {
        base_name(source_name)
    }

    fn documentation_header(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> String {
        documentation("Fluent base class for", config, context)
    }

    fn complete_header(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) {
        let config = generator.config();
        let source_name = &context.declaration.name;

        output.add_class_modifier(Modifier::Abstract);
        output.add_extended_type(TypeReference::object(
            config.base_marker(),
            fluent_type_arguments(config),
        ));
        output.add_implemented_type(TypeReference::object(
            interface_name(source_name),
            self.type_arguments(config, context),
        ));
        output.add_constructor(forwarding_constructor(
            base_name(source_name),
            config,
            context,
        ));
    }

    /// Re-exposes a renamed method under its original name and return type.
    fn generate_method(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        method: &MethodSignature,
        output: &mut OutputAccumulator,
    ) -> Result<(), GenerationError> {
        let fluent_name = generator
            .resolver()
            .fluent_method_name(&method.name, context.declaration);
        if fluent_name == method.name {
            return Ok(());
        }

        let call = generator.forward_call(method);
        let statement = if method.returns_void() {
            format!("{};", call)
        } else {
            format!("return {};", call)
        };

        output.add_method(MethodDecl {
            modifiers: vec![Modifier::Public],
            type_parameters: method.type_parameters.clone(),
            return_type: method.return_type.clone(),
            name: method.name.clone(),
            parameters: generator.parameters(method, context, false),
            thrown_types: method.thrown_types.clone(),
            body: Some(Block::default().statement(statement)),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Modifier;
    use crate::config::GeneratorConfig;
    use crate::generator::Generator;
    use crate::variants::VariantKind;
    use fluentgen_model::{
        DeclarationIndex, DeclarationKind, MethodSignature, SourceDeclaration, SourceUnit,
        TypeParameter, TypeReference,
    };

    fn generate(declaration: SourceDeclaration) -> crate::ast::TypeDeclaration {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let mut unit = SourceUnit::new(Some("com.vaadin.flow.data.provider".to_string()));
        unit.declarations.push(declaration);
        Generator::new(&config, &index, VariantKind::Base)
            .generate(&unit)
            .into_unit()
            .expect("success")
            .declaration
    }

    #[test]
    fn test_base_header() {
        let mut source = SourceDeclaration::new("DataProvider", DeclarationKind::Interface);
        source.type_parameters.push(TypeParameter::new("T"));
        source.type_parameters.push(TypeParameter::new("F"));
        source
            .methods
            .push(MethodSignature::new("refreshAll", TypeReference::Void));

        let declaration = generate(source);
        assert_eq!(declaration.name, "AbstractDataProviderFactory");
        assert!(!declaration.is_interface);
        assert_eq!(declaration.modifiers, vec![Modifier::Public, Modifier::Abstract]);
        assert_eq!(
            declaration.extended_types[0].to_string(),
            "FluentFactory<__T, __F>"
        );
        assert_eq!(
            declaration.implemented_types[0].to_string(),
            "IDataProviderFactory<__T, __F, T, F>"
        );
        assert_eq!(
            declaration.type_parameters[1].to_string(),
            "__F extends AbstractDataProviderFactory<__T, __F, T, F>"
        );
        // Methods keeping their name are inherited from the interface.
        assert!(declaration.methods.is_empty());
    }

    #[test]
    fn test_base_constructor() {
        let declaration = generate(SourceDeclaration::new("DataProvider", DeclarationKind::Interface));
        assert_eq!(declaration.constructors.len(), 1);
        let constructor = &declaration.constructors[0];
        assert_eq!(constructor.name, "AbstractDataProviderFactory");
        assert_eq!(constructor.parameters[0].to_string(), "final __T dataProvider");
        assert_eq!(constructor.body.statements, vec!["super(dataProvider);"]);
    }

    #[test]
    fn test_renamed_method_forwarder() {
        let mut source = SourceDeclaration::new("Supplier", DeclarationKind::Interface);
        source
            .methods
            .push(MethodSignature::new("get", TypeReference::named("String")));
        source
            .methods
            .push(MethodSignature::new("size", TypeReference::named("Integer")));

        let declaration = generate(source);
        assert_eq!(declaration.methods.len(), 1);
        let get = &declaration.methods[0];
        assert_eq!(get.name, "get");
        assert_eq!(get.return_type, TypeReference::named("String"));
        assert!(get.has_modifier(Modifier::Public));
        assert_eq!(
            get.body.as_ref().expect("body").statements,
            vec!["return get().get();"]
        );
    }

    #[test]
    fn test_renamed_void_apply_forwarder() {
        let mut source = SourceDeclaration::new("Callback", DeclarationKind::Interface);
        source
            .extended_types
            .push(TypeReference::named("SerializableFunction"));
        source.methods.push(
            MethodSignature::new("apply", TypeReference::Void)
                .with_parameter("value", TypeReference::named("String")),
        );

        let declaration = generate(source);
        let apply = declaration.get_method("apply").expect("apply");
        assert_eq!(apply.return_type, TypeReference::Void);
        assert_eq!(apply.parameters[0].to_string(), "final String value");
        assert_eq!(
            apply.body.as_ref().expect("body").statements,
            vec!["get().apply(value);"]
        );
    }
}
