//! Final concrete class variant, `…Factory`.

use super::base::{base_name, forwarding_constructor};
use super::{Variant, documentation};
use crate::ast::Modifier;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::{GenerationContext, Generator};
use crate::output::OutputAccumulator;
use fluentgen_model::{MethodSignature, TypeReference};

/// Concrete class variant strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcreteVariant;

impl Variant for ConcreteVariant {
    fn class_simple_name(&self, source_name: &str) -> String {
        format!("{}Factory", source_name)
    }

    fn documentation_header(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> String {
        documentation("Fluent factory for", config, context)
    }

    fn complete_header(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) {
        let config = generator.config();
        let source_name = &context.declaration.name;

        output.add_class_modifier(Modifier::Final);
        output.add_extended_type(TypeReference::object(
            base_name(source_name),
            self.type_arguments(config, context),
        ));
        output.add_constructor(forwarding_constructor(
            self.class_simple_name(source_name),
            config,
            context,
        ));
    }

    fn generate_method(
        &self,
        _generator: &Generator<'_>,
        _context: &GenerationContext<'_>,
        _method: &MethodSignature,
        _output: &mut OutputAccumulator,
    ) -> Result<(), GenerationError> {
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
        TypeReference,
    };

    #[test]
    fn test_concrete_shape() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let mut source = SourceDeclaration::new("TextField", DeclarationKind::Class);
        source
            .methods
            .push(MethodSignature::new("get", TypeReference::named("String")));
        source
            .methods
            .push(MethodSignature::new("clear", TypeReference::Void));
        let mut unit = SourceUnit::new(Some("com.vaadin.flow.component.textfield".to_string()));
        unit.declarations.push(source);

        let result = Generator::new(&config, &index, VariantKind::Concrete).generate(&unit);
        assert!(result.warnings().is_empty());
        let declaration = result.into_unit().expect("success").declaration;

        assert_eq!(declaration.name, "TextFieldFactory");
        assert_eq!(declaration.modifiers, vec![Modifier::Public, Modifier::Final]);
        assert_eq!(
            declaration.extended_types,
            vec![TypeReference::object(
                "AbstractTextFieldFactory",
                vec![
                    TypeReference::TypeParameter("__T".to_string()),
                    TypeReference::TypeParameter("__F".to_string()),
                ],
            )]
        );
        assert!(declaration.implemented_types.is_empty());
        assert!(declaration.methods.is_empty());
        assert_eq!(declaration.constructors[0].name, "TextFieldFactory");
        assert_eq!(
            declaration.constructors[0].body.statements,
            vec!["super(textField);"]
        );
        assert_eq!(
            declaration.type_parameters[1].to_string(),
            "__F extends TextFieldFactory<__T, __F>"
        );
    }
}
