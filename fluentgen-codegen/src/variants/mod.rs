//! Generated declaration shapes.
//!
//! Each variant supplies the shape-specific steps of the shared walk in
//! [`Generator`]: the generated name, the type parameter and argument lists,
//! the self-bound supertype, the documentation header, the rest of the
//! header (supertypes, constructors) and the per-method output.

pub mod base;
pub mod concrete;
pub mod interface;

pub use base::BaseVariant;
pub use concrete::ConcreteVariant;
pub use interface::InterfaceVariant;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::{GenerationContext, Generator};
use crate::output::OutputAccumulator;
use fluentgen_model::{MethodSignature, TypeParameter, TypeReference};
use std::fmt;
use std::str::FromStr;

/// Shape-specific steps of generation.
pub trait Variant: Send + Sync {
    /// Returns the generated simple name for a source simple name.
    fn class_simple_name(&self, source_name: &str) -> String;

    /// Returns the documentation header text.
    fn documentation_header(&self, config: &GeneratorConfig, context: &GenerationContext<'_>)
    -> String;

    /// Adds everything of the header besides documentation, `public`, name
    /// and type parameters.
    fn complete_header(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        output: &mut OutputAccumulator,
    );

    /// Emits the output for one eligible source method.
    ///
    /// # Errors
    /// Returns a `GenerationError` that aborts the whole declaration.
    fn generate_method(
        &self,
        generator: &Generator<'_>,
        context: &GenerationContext<'_>,
        method: &MethodSignature,
        output: &mut OutputAccumulator,
    ) -> Result<(), GenerationError>;

    /// Returns the two fluent type arguments followed by each source type
    /// parameter by name.
    fn type_arguments(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> Vec<TypeReference> {
        fluent_type_arguments(config)
            .into_iter()
            .chain(
                context
                    .declaration
                    .type_parameters
                    .iter()
                    .map(TypeParameter::as_argument),
            )
            .collect()
    }

    /// Returns this variant's generated type applied to
    /// [`Variant::type_arguments`].
    fn self_bound_type(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> TypeReference {
        TypeReference::object(
            self.class_simple_name(&context.declaration.name),
            self.type_arguments(config, context),
        )
    }

    /// Returns the wrapped parameter bounded by the source type, the
    /// subclass parameter bounded by [`Variant::self_bound_type`], then
    /// copies of the source type parameters.
    fn type_parameters(
        &self,
        config: &GeneratorConfig,
        context: &GenerationContext<'_>,
    ) -> Vec<TypeParameter> {
        let mut params = vec![
            TypeParameter::bounded(
                config.wrapped_type_parameter(),
                vec![context.declaration.self_type()],
            ),
            TypeParameter::bounded(
                config.subclass_type_parameter(),
                vec![self.self_bound_type(config, context)],
            ),
        ];
        params.extend(context.declaration.type_parameters.iter().cloned());
        params
    }
}

/// Returns the wrapped and subclass type parameters as arguments.
#[must_use]
pub fn fluent_type_arguments(config: &GeneratorConfig) -> Vec<TypeReference> {
    vec![
        TypeReference::TypeParameter(config.wrapped_type_parameter().to_string()),
        TypeReference::TypeParameter(config.subclass_type_parameter().to_string()),
    ]
}

/// Builds the documentation header shared by all variants.
#[must_use]
pub fn documentation(
    title: &str,
    config: &GeneratorConfig,
    context: &GenerationContext<'_>,
) -> String {
    let source_name = &context.declaration.name;
    let mut text = String::new();
    text.push_str(&format!("{} {{@link {}}}.\n", title, source_name));
    text.push_str("<p>\n");
    text.push_str("THIS IS A GENERATED FILE.\n");
    text.push_str("<p>\n");
    text.push_str(&format!(
        "Date: {}<br/>\n",
        config.generation_date().format("%Y-%m-%d")
    ));
    text.push_str(&format!("Platform: {}\n", config.platform_label()));
    text.push('\n');
    text.push_str(&format!(
        "@param <{}> The type of the wrapped object.\n",
        config.wrapped_type_parameter()
    ));
    text.push_str(&format!(
        "@param <{}> The type of the factory.",
        config.subclass_type_parameter()
    ));
    for param in &context.declaration.type_parameters {
        text.push_str(&format!(
            "\n@param <{}> See {{@link {}}}.",
            param.name, source_name
        ));
    }
    text
}

/// Which variant to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Interface with default methods, `I…Factory`.
    Interface,
    /// Abstract base class, `Abstract…Factory`.
    Base,
    /// Final concrete class, `…Factory`.
    Concrete,
}

static INTERFACE: InterfaceVariant = InterfaceVariant;
static BASE: BaseVariant = BaseVariant;
static CONCRETE: ConcreteVariant = ConcreteVariant;

impl VariantKind {
    /// All variants in generation order.
    pub const ALL: [Self; 3] = [Self::Interface, Self::Base, Self::Concrete];

    /// Returns the strategy implementing this variant.
    #[must_use]
    pub fn strategy(&self) -> &'static dyn Variant {
        match self {
            Self::Interface => &INTERFACE,
            Self::Base => &BASE,
            Self::Concrete => &CONCRETE,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Base => "base",
            Self::Concrete => "concrete",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interface" => Ok(Self::Interface),
            "base" | "abstract" => Ok(Self::Base),
            "concrete" => Ok(Self::Concrete),
            other => Err(format!("unknown variant '{}'", other)),
        }
    }
}
