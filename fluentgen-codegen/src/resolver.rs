//! Type resolution for generated signatures.
//!
//! Maps source return and parameter types to the types a fluent wrapper
//! declares. Resolution is structural: it looks at the category of a
//! [`TypeReference`] and a small configured override table, never at a
//! symbol table.

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::GenerationContext;
use fluentgen_model::{MethodSignature, ObjectType, SourceDeclaration, TypeReference};

/// Marker appended to method names that collide with generator accessors.
const RENAME_SUFFIX: char = '_';

/// Resolves source types to generated types.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TypeResolver<'a> {
    /// Creates a new resolver over the given configuration.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    fn wrapped(&self) -> TypeReference {
        TypeReference::TypeParameter(self.config.wrapped_type_parameter().to_string())
    }

    fn subclass(&self) -> TypeReference {
        TypeReference::TypeParameter(self.config.subclass_type_parameter().to_string())
    }

    fn carrier(&self, name: &str, extra: Option<TypeReference>) -> TypeReference {
        let mut arguments = vec![self.wrapped(), self.subclass()];
        arguments.extend(extra);
        TypeReference::object(name, arguments)
    }

    /// Resolves the generated return type of a method.
    ///
    /// # Arguments
    /// * `method` - Source method
    /// * `context` - Current generation context
    ///
    /// # Returns
    /// The subclass type parameter for `void`, otherwise the matching carrier
    /// type.
    ///
    /// # Errors
    /// Returns `GenerationError::UnresolvableReturnType` for wildcard and
    /// type parameter return types.
    pub fn resolve_return_type(
        &self,
        method: &MethodSignature,
        context: &GenerationContext<'_>,
    ) -> Result<TypeReference, GenerationError> {
        let config = self.config;
        match &method.return_type {
            TypeReference::Void => Ok(self.subclass()),
            TypeReference::Primitive(kind) => {
                Ok(self.carrier(config.primitive_carrier(*kind), None))
            }
            object @ TypeReference::Object(_) => Ok(self.carrier(
                config.value_carrier(),
                Some(self.resolve_parameter_type(object, context)),
            )),
            TypeReference::Array(element) => match element.as_ref() {
                TypeReference::Primitive(kind) => {
                    Ok(self.carrier(config.primitive_array_carrier(*kind), None))
                }
                element => Ok(self.carrier(
                    config.array_carrier(),
                    Some(self.resolve_parameter_type(element, context)),
                )),
            },
            other @ (TypeReference::Wildcard { .. } | TypeReference::TypeParameter(_)) => {
                Err(GenerationError::UnresolvableReturnType {
                    method: method.name.clone(),
                    type_text: other.to_string(),
                    category: other.category(),
                })
            }
        }
    }

    /// Resolves a parameter type, or any type nested inside one.
    ///
    /// Object names go through the override table first, then get qualified
    /// with the source declaration's name when they refer to one of its
    /// nested types. Type arguments, array elements and wildcard bounds are
    /// resolved recursively; everything else passes through.
    #[must_use]
    pub fn resolve_parameter_type(
        &self,
        type_ref: &TypeReference,
        context: &GenerationContext<'_>,
    ) -> TypeReference {
        match type_ref {
            TypeReference::Object(object) => {
                TypeReference::Object(self.resolve_object(object, context))
            }
            TypeReference::Array(element) => {
                TypeReference::array_of(self.resolve_parameter_type(element, context))
            }
            TypeReference::Wildcard {
                extends,
                super_bound,
            } => TypeReference::Wildcard {
                extends: extends
                    .as_ref()
                    .map(|bound| Box::new(self.resolve_parameter_type(bound, context))),
                super_bound: super_bound
                    .as_ref()
                    .map(|bound| Box::new(self.resolve_parameter_type(bound, context))),
            },
            other => other.clone(),
        }
    }

    fn resolve_object(&self, object: &ObjectType, context: &GenerationContext<'_>) -> ObjectType {
        let declaration = context.declaration;
        let name = if let Some(entry) = self.config.find_override(&object.name, &declaration.name)
        {
            entry.replacement.clone()
        } else if object.is_simple() && declaration.has_nested_type(&object.name) {
            format!("{}.{}", declaration.name, object.name)
        } else {
            object.name.clone()
        };

        ObjectType {
            name,
            type_arguments: object
                .type_arguments
                .iter()
                .map(|argument| self.resolve_parameter_type(argument, context))
                .collect(),
        }
    }

    /// Returns the generated name of a method.
    ///
    /// `get` always gets a trailing `_`; `apply` does when the declaration
    /// extends one of the configured functional supertypes. Applying the
    /// rewrite to its own output changes nothing.
    #[must_use]
    pub fn fluent_method_name(&self, name: &str, declaration: &SourceDeclaration) -> String {
        let extends_functional = || {
            declaration
                .extended_types
                .iter()
                .filter_map(TypeReference::simple_name)
                .any(|simple| {
                    self.config
                        .functional_supertypes()
                        .iter()
                        .any(|functional| functional == simple)
                })
        };

        if name == "get" || (name == "apply" && extends_functional()) {
            let mut renamed = name.to_string();
            renamed.push(RENAME_SUFFIX);
            renamed
        } else {
            name.to_string()
        }
    }
}
