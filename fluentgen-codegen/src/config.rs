//! Generator configuration.
//!
//! All names the generator emits but does not derive from the source
//! (carrier types, marker supertypes, packages, fluent type parameters) come
//! from an immutable [`GeneratorConfig`] built once and passed to every
//! generator.

use chrono::{Local, NaiveDate};
use fluentgen_model::PrimitiveKind;

/// Default package of the fluent factory markers.
pub const DEFAULT_MARKER_PACKAGE: &str = "com.oliveryasuna.commons.language.pattern.fluent";

/// Default package of the carrier types.
pub const DEFAULT_CARRIER_PACKAGE: &str =
    "com.oliveryasuna.commons.language.pattern.fluent.breakdown";

/// Default base package of generated declarations.
pub const DEFAULT_OUTPUT_BASE_PACKAGE: &str = "com.oliveryasuna.vaadin.fluent";

/// Explicit rewrite of a parameter type name inside one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOverride {
    /// Type name as written in the source.
    pub type_name: String,
    /// Simple name of the declaration the override applies to.
    pub enclosing: String,
    /// Name to emit instead.
    pub replacement: String,
}

impl TypeOverride {
    /// Creates a new override entry.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        enclosing: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            enclosing: enclosing.into(),
            replacement: replacement.into(),
        }
    }
}

/// Immutable generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    value_carrier: String,
    array_carrier: String,
    primitive_carriers: [String; 8],
    primitive_array_carriers: [String; 8],
    interface_marker: String,
    base_marker: String,
    marker_package: String,
    carrier_package: String,
    output_base_package: String,
    wrapped_type_parameter: String,
    subclass_type_parameter: String,
    self_accessor: String,
    wrapped_accessor: String,
    overrides: Vec<TypeOverride>,
    functional_supertypes: Vec<String>,
    platform_label: String,
    generated_on: Option<NaiveDate>,
    indent: String,
}

impl GeneratorConfig {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Generic carrier for object return values.
    #[must_use]
    pub fn value_carrier(&self) -> &str {
        &self.value_carrier
    }

    /// Generic carrier for object array return values.
    #[must_use]
    pub fn array_carrier(&self) -> &str {
        &self.array_carrier
    }

    /// Carrier for a primitive return value.
    #[must_use]
    pub fn primitive_carrier(&self, kind: PrimitiveKind) -> &str {
        &self.primitive_carriers[kind.index()]
    }

    /// Carrier for a primitive array return value.
    #[must_use]
    pub fn primitive_array_carrier(&self, kind: PrimitiveKind) -> &str {
        &self.primitive_array_carriers[kind.index()]
    }

    /// Marker supertype of generated interfaces.
    #[must_use]
    pub fn interface_marker(&self) -> &str {
        &self.interface_marker
    }

    /// Marker superclass of generated base classes.
    #[must_use]
    pub fn base_marker(&self) -> &str {
        &self.base_marker
    }

    /// Package holding both markers.
    #[must_use]
    pub fn marker_package(&self) -> &str {
        &self.marker_package
    }

    /// Package holding all carriers.
    #[must_use]
    pub fn carrier_package(&self) -> &str {
        &self.carrier_package
    }

    /// Package prepended to every source package.
    #[must_use]
    pub fn output_base_package(&self) -> &str {
        &self.output_base_package
    }

    /// Name of the wrapped-value type parameter.
    #[must_use]
    pub fn wrapped_type_parameter(&self) -> &str {
        &self.wrapped_type_parameter
    }

    /// Name of the self/subclass type parameter.
    #[must_use]
    pub fn subclass_type_parameter(&self) -> &str {
        &self.subclass_type_parameter
    }

    /// Accessor returning the typed self reference.
    #[must_use]
    pub fn self_accessor(&self) -> &str {
        &self.self_accessor
    }

    /// Accessor returning the wrapped value.
    #[must_use]
    pub fn wrapped_accessor(&self) -> &str {
        &self.wrapped_accessor
    }

    /// Parameter type override table.
    #[must_use]
    pub fn overrides(&self) -> &[TypeOverride] {
        &self.overrides
    }

    /// Looks up the override for a type name inside a declaration.
    #[must_use]
    pub fn find_override(&self, type_name: &str, enclosing: &str) -> Option<&TypeOverride> {
        self.overrides
            .iter()
            .find(|o| o.type_name == type_name && o.enclosing == enclosing)
    }

    /// Simple names of single-argument functional supertypes.
    #[must_use]
    pub fn functional_supertypes(&self) -> &[String] {
        &self.functional_supertypes
    }

    /// Platform label shown in documentation headers.
    #[must_use]
    pub fn platform_label(&self) -> &str {
        &self.platform_label
    }

    /// Date shown in documentation headers.
    ///
    /// Falls back to today when no fixed date was configured.
    #[must_use]
    pub fn generation_date(&self) -> NaiveDate {
        self.generated_on
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Indentation unit used by the emitter.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Returns the output package for a source package.
    #[must_use]
    pub fn output_package(&self, source_package: &str) -> String {
        if source_package.is_empty() {
            self.output_base_package.clone()
        } else {
            format!("{}.{}", self.output_base_package, source_package)
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfigBuilder::new().build()
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        let primitive_carriers =
            PrimitiveKind::ALL.map(|kind| format!("{}ValueBreak", kind.title()));
        let primitive_array_carriers =
            PrimitiveKind::ALL.map(|kind| format!("{}ArrayValueBreak", kind.title()));

        Self {
            config: GeneratorConfig {
                value_carrier: "ValueBreak".to_string(),
                array_carrier: "ArrayValueBreak".to_string(),
                primitive_carriers,
                primitive_array_carriers,
                interface_marker: "IFluentFactory".to_string(),
                base_marker: "FluentFactory".to_string(),
                marker_package: DEFAULT_MARKER_PACKAGE.to_string(),
                carrier_package: DEFAULT_CARRIER_PACKAGE.to_string(),
                output_base_package: DEFAULT_OUTPUT_BASE_PACKAGE.to_string(),
                wrapped_type_parameter: "__T".to_string(),
                subclass_type_parameter: "__F".to_string(),
                self_accessor: "self".to_string(),
                wrapped_accessor: "get".to_string(),
                overrides: vec![
                    TypeOverride::new("Alignment", "VerticalLayout", "FlexComponent.Alignment"),
                    TypeOverride::new("Alignment", "HorizontalLayout", "FlexComponent.Alignment"),
                ],
                functional_supertypes: vec!["SerializableFunction".to_string()],
                platform_label: "Vaadin".to_string(),
                generated_on: None,
                indent: "  ".to_string(),
            },
        }
    }

    /// Sets the generic object carrier name.
    #[must_use]
    pub fn value_carrier(mut self, name: impl Into<String>) -> Self {
        self.config.value_carrier = name.into();
        self
    }

    /// Sets the generic array carrier name.
    #[must_use]
    pub fn array_carrier(mut self, name: impl Into<String>) -> Self {
        self.config.array_carrier = name.into();
        self
    }

    /// Sets the carrier name for one primitive kind.
    #[must_use]
    pub fn primitive_carrier(mut self, kind: PrimitiveKind, name: impl Into<String>) -> Self {
        self.config.primitive_carriers[kind.index()] = name.into();
        self
    }

    /// Sets the array carrier name for one primitive kind.
    #[must_use]
    pub fn primitive_array_carrier(mut self, kind: PrimitiveKind, name: impl Into<String>) -> Self {
        self.config.primitive_array_carriers[kind.index()] = name.into();
        self
    }

    /// Sets the interface and base marker names.
    #[must_use]
    pub fn markers(mut self, interface: impl Into<String>, base: impl Into<String>) -> Self {
        self.config.interface_marker = interface.into();
        self.config.base_marker = base.into();
        self
    }

    /// Sets the marker package.
    #[must_use]
    pub fn marker_package(mut self, package: impl Into<String>) -> Self {
        self.config.marker_package = package.into();
        self
    }

    /// Sets the carrier package.
    #[must_use]
    pub fn carrier_package(mut self, package: impl Into<String>) -> Self {
        self.config.carrier_package = package.into();
        self
    }

    /// Sets the output base package.
    #[must_use]
    pub fn output_base_package(mut self, package: impl Into<String>) -> Self {
        self.config.output_base_package = package.into();
        self
    }

    /// Sets the fluent type parameter names.
    #[must_use]
    pub fn type_parameters(
        mut self,
        wrapped: impl Into<String>,
        subclass: impl Into<String>,
    ) -> Self {
        self.config.wrapped_type_parameter = wrapped.into();
        self.config.subclass_type_parameter = subclass.into();
        self
    }

    /// Sets the self accessor name.
    #[must_use]
    pub fn self_accessor(mut self, name: impl Into<String>) -> Self {
        self.config.self_accessor = name.into();
        self
    }

    /// Adds a parameter type override.
    #[must_use]
    pub fn add_override(mut self, entry: TypeOverride) -> Self {
        self.config.overrides.push(entry);
        self
    }

    /// Replaces the override table.
    #[must_use]
    pub fn overrides(mut self, overrides: Vec<TypeOverride>) -> Self {
        self.config.overrides = overrides;
        self
    }

    /// Replaces the functional supertype list.
    #[must_use]
    pub fn functional_supertypes(mut self, names: Vec<String>) -> Self {
        self.config.functional_supertypes = names;
        self
    }

    /// Sets the platform label.
    #[must_use]
    pub fn platform_label(mut self, label: impl Into<String>) -> Self {
        self.config.platform_label = label.into();
        self
    }

    /// Fixes the date shown in documentation headers.
    #[must_use]
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.config.generated_on = Some(date);
        self
    }

    /// Sets the emitter indentation unit.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.config.indent = indent.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
