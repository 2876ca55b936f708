//! Interface variant, `I…Factory`.
//!
//! An interface extending the generated counterparts of the source
//! supertypes plus the interface factory marker, with one default method per
//! eligible source method.

use super::{Variant, documentation, fluent_type_arguments};
use crate::ast::{Block, MethodDecl, Modifier};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationWarning};
use crate::generator::{GenerationContext, Generator};
use crate::output::OutputAccumulator;
use fluentgen_model::{ImportDecl, MethodSignature, TypeReference};

/// Interface variant strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceVariant;

/// Generated interface name for a source simple name.
pub(crate) fn interface_name(source_name: &str) -> String {
    format!("I{}Factory", source_name)
}

impl Variant for InterfaceVariant {
    fn class_simple_name(&self, source_name: &str) -> String {
        interface_name(source_name)
    }

    fn documentation_header(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> String {
        documentation("Fluent interface for", config, context)
    }

    fn complete_header(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    ) {
        let config = generator.config();
        output.set_interface(true);

        for supertype in context.declaration.supertypes() {
            let counterpart = supertype
                .as_object()
                .and_then(|object| Some((object, context.index.package_of(&object.name)?)));

            match counterpart {
                Some((object, package)) => {
                    let name = interface_name(object.simple_name());
                    output.add_import(ImportDecl::single(format!(
                        "{}.{}",
                        config.output_package(package),
                        name
                    )));

                    let mut arguments = fluent_type_arguments(config);
                    arguments.extend(object.type_arguments.iter().cloned());
                    output.add_extended_type(TypeReference::object(name, arguments));
                }
                // An interface cannot extend a class, so only interface
                // sources keep supertypes without a counterpart.
                None if context.declaration.is_interface() => {
                    output.add_extended_type(supertype.clone());
                }
                None => {}
            }
        }

        output.add_extended_type(TypeReference::object(
            config.interface_marker(),
            fluent_type_arguments(config),
        ));
    }

    fn generate_method(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        method: &MethodSignature,
        output: &mut OutputAccumulator,
    ) -> Result<(), GenerationError> {
        let config = generator.config();
        let resolver = generator.resolver();

        let return_type = resolver.resolve_return_type(method, context)?;
        let name = resolver.fluent_method_name(&method.name, context.declaration);
        if name != method.name {
            output.add_warning(GenerationWarning::MethodRenamed {
                from: method.name.clone(),
                to: name.clone(),
            });
        }

        let call = generator.forward_call(method);
        let body = if method.returns_void() {
            Block::default()
                .statement(format!("{};", call))
                .statement(format!("return {}();", config.self_accessor()))
        } else {
            let carrier = return_type
                .as_object()
                .map(|object| object.name.as_str())
                .unwrap_or_default();
            Block::default().statement(format!(
                "return new {}<>({}(), {});",
                carrier,
                config.self_accessor(),
                call
            ))
        };

        output.add_method(MethodDecl {
            modifiers: vec![Modifier::Default],
            type_parameters: method.type_parameters.clone(),
            return_type,
            name,
            parameters: generator.parameters(method, context, true),
            thrown_types: method.thrown_types.clone(),
            body: Some(body),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Modifier;
    use crate::config::GeneratorConfig;
    use crate::error::GenerationWarning;
    use crate::generator::Generator;
    use crate::variants::VariantKind;
    use fluentgen_model::{
        DeclarationIndex, DeclarationKind, ImportDecl, MethodSignature, PrimitiveKind,
        SourceDeclaration, SourceUnit, TypeParameter, TypeReference,
    };

    fn unit(package: &str, declaration: SourceDeclaration) -> SourceUnit {
        let mut unit = SourceUnit::new(Some(package.to_string()));
        unit.declarations.push(declaration);
        unit
    }

    fn counter() -> SourceDeclaration {
        let mut declaration = SourceDeclaration::new("Counter", DeclarationKind::Interface);
        declaration
            .methods
            .push(MethodSignature::new("reset", TypeReference::Void));
        declaration.methods.push(MethodSignature::new(
            "count",
            TypeReference::Primitive(PrimitiveKind::Int),
        ));
        declaration.methods.push(MethodSignature::new(
            "names",
            TypeReference::array_of(TypeReference::named("String")),
        ));
        declaration.methods.push(MethodSignature::new(
            "ids",
            TypeReference::array_of(TypeReference::Primitive(PrimitiveKind::Int)),
        ));
        declaration.methods.push(
            MethodSignature::new("bar", TypeReference::Void)
                .with_parameter("amount", TypeReference::Primitive(PrimitiveKind::Int)),
        );
        declaration
    }

    #[test]
    fn test_completeness() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let source = counter();
        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("org.example", source.clone()))
            .into_unit()
            .expect("success");

        assert!(generated.declaration.is_interface);
        for method in &source.methods {
            assert!(
                generated.declaration.get_method(&method.name).is_some(),
                "missing {}",
                method.name
            );
        }
    }

    #[test]
    fn test_void_method_body() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("org.example", counter()))
            .into_unit()
            .expect("success");

        let reset = generated.declaration.get_method("reset").expect("reset");
        assert!(reset.has_modifier(Modifier::Default));
        assert_eq!(reset.return_type.to_string(), "__F");
        assert_eq!(
            reset.body.as_ref().expect("body").statements,
            vec!["get().reset();", "return self();"]
        );

        let bar = generated.declaration.get_method("bar").expect("bar");
        assert_eq!(bar.parameters[0].to_string(), "final int amount");
        assert_eq!(
            bar.body.as_ref().expect("body").statements[0],
            "get().bar(amount);"
        );
    }

    #[test]
    fn test_value_method_bodies() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("org.example", counter()))
            .into_unit()
            .expect("success");
        let declaration = generated.declaration;

        let count = declaration.get_method("count").expect("count");
        assert_eq!(count.return_type.to_string(), "IntValueBreak<__T, __F>");
        assert_eq!(
            count.body.as_ref().expect("body").statements,
            vec!["return new IntValueBreak<>(self(), get().count());"]
        );

        let names = declaration.get_method("names").expect("names");
        assert_eq!(
            names.return_type.to_string(),
            "ArrayValueBreak<__T, __F, String>"
        );

        let ids = declaration.get_method("ids").expect("ids");
        assert_eq!(ids.return_type.to_string(), "IntArrayValueBreak<__T, __F>");
        assert_eq!(
            ids.body.as_ref().expect("body").statements,
            vec!["return new IntArrayValueBreak<>(self(), get().ids());"]
        );
    }

    #[test]
    fn test_get_is_renamed_with_warning() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let mut source = SourceDeclaration::new("Holder", DeclarationKind::Interface);
        source
            .methods
            .push(MethodSignature::new("get", TypeReference::named("String")));

        let result = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("org.example", source));
        assert_eq!(
            result.warnings(),
            &[GenerationWarning::MethodRenamed {
                from: "get".to_string(),
                to: "get_".to_string(),
            }]
        );
        let generated = result.into_unit().expect("success");
        let method = generated.declaration.get_method("get_").expect("get_");
        assert_eq!(
            method.body.as_ref().expect("body").statements,
            vec!["return new ValueBreak<>(self(), get().get());"]
        );
    }

    #[test]
    fn test_supertypes_with_and_without_counterparts() {
        let config = GeneratorConfig::default();
        let mut index = DeclarationIndex::new();
        index.add_generated("HasStyle", "com.vaadin.flow.component");

        let mut source = SourceDeclaration::new("HasSize", DeclarationKind::Interface);
        source.type_parameters.push(TypeParameter::new("C"));
        source.extended_types.push(TypeReference::named("HasStyle"));
        source
            .extended_types
            .push(TypeReference::named("java.io.Serializable"));

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("com.vaadin.flow.component", source))
            .into_unit()
            .expect("success");

        let extended: Vec<String> = generated
            .declaration
            .extended_types
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            extended,
            vec![
                "IHasStyleFactory<__T, __F>",
                "java.io.Serializable",
                "IFluentFactory<__T, __F>",
            ]
        );
        assert!(generated.imports.contains(&ImportDecl::single(
            "com.oliveryasuna.vaadin.fluent.com.vaadin.flow.component.IHasStyleFactory"
        )));
    }

    #[test]
    fn test_generic_source_counterpart_takes_only_supertype_arguments() {
        let config = GeneratorConfig::default();
        let mut index = DeclarationIndex::new();
        index.add_generated("HasElement", "com.vaadin.flow.component");
        index.add_generated("HasValueAndElement", "com.vaadin.flow.component");

        let mut source = SourceDeclaration::new("HasValue", DeclarationKind::Interface);
        source.type_parameters.push(TypeParameter::new("E"));
        source.type_parameters.push(TypeParameter::new("V"));
        source.extended_types.push(TypeReference::named("HasElement"));
        source.extended_types.push(TypeReference::object(
            "HasValueAndElement",
            vec![
                TypeReference::TypeParameter("E".to_string()),
                TypeReference::TypeParameter("V".to_string()),
            ],
        ));

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("com.vaadin.flow.component", source))
            .into_unit()
            .expect("success");
        let declaration = generated.declaration;

        assert_eq!(
            declaration.extended_types[0].to_string(),
            "IHasElementFactory<__T, __F>"
        );
        assert_eq!(
            declaration.extended_types[1].to_string(),
            "IHasValueAndElementFactory<__T, __F, E, V>"
        );
        // The generated type itself still carries the source parameters.
        assert_eq!(
            declaration.type_parameters[1].to_string(),
            "__F extends IHasValueFactory<__T, __F, E, V>"
        );
    }

    #[test]
    fn test_class_source_skips_supertypes_without_counterpart() {
        let config = GeneratorConfig::default();
        let mut index = DeclarationIndex::new();
        index.add_generated("HasText", "com.vaadin.flow.component");

        let mut source = SourceDeclaration::new("Button", DeclarationKind::Class);
        source.extended_types.push(TypeReference::named("Component"));
        source.implemented_types.push(TypeReference::named("HasText"));

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("com.vaadin.flow.component.button", source))
            .into_unit()
            .expect("success");
        let extended: Vec<String> = generated
            .declaration
            .extended_types
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            extended,
            vec!["IHasTextFactory<__T, __F>", "IFluentFactory<__T, __F>"]
        );
    }

    #[test]
    fn test_method_type_parameters_and_throws_copied() {
        let config = GeneratorConfig::default();
        let index = DeclarationIndex::new();
        let mut source = SourceDeclaration::new("Loader", DeclarationKind::Interface);
        let mut load = MethodSignature::new("load", TypeReference::named("Object"))
            .with_parameter("type", TypeReference::object("Class", vec![
                TypeReference::TypeParameter("R".to_string()),
            ]));
        load.type_parameters.push(TypeParameter::new("R"));
        load.thrown_types.push(TypeReference::named("IOException"));
        source.methods.push(load);

        let generated = Generator::new(&config, &index, VariantKind::Interface)
            .generate(&unit("org.example", source))
            .into_unit()
            .expect("success");
        let method = generated.declaration.get_method("load").expect("load");
        assert_eq!(method.type_parameters, vec![TypeParameter::new("R")]);
        assert_eq!(method.thrown_types, vec![TypeReference::named("IOException")]);
        assert_eq!(method.parameters[0].to_string(), "final Class<R> type");
    }
}
