//! # fluentgen codegen
//!
//! Fluent wrapper generation from Java declaration models.
//!
//! This crate provides:
//! - Structural type resolution for return and parameter types
//! - The output accumulator and output tree
//! - The shared generation walk and its three variants
//!   (interface, abstract base, concrete)
//! - Java source emission

pub mod ast;
pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod output;
pub mod resolver;
pub mod variants;

pub use ast::{
    Block, CompilationUnit, ConstructorDecl, FieldDecl, GeneratedParameter, MethodDecl, Modifier,
    TypeDeclaration,
};
pub use config::{GeneratorConfig, GeneratorConfigBuilder, TypeOverride};
pub use emit::{JavaSourceBuilder, emit_unit};
pub use error::{CodegenError, GenerationError, GenerationWarning};
pub use generator::{GenerationContext, GenerationResult, GenerationState, Generator};
pub use output::OutputAccumulator;
pub use resolver::TypeResolver;
pub use variants::{Variant, VariantKind};

use fluentgen_model::DeclarationIndex;

/// Generates one variant for every unit of a descriptor document.
///
/// The declaration index is built from the same document.
///
/// # Arguments
/// * `xml` - Descriptor content
/// * `config` - Generator configuration
/// * `variant` - Variant to generate
///
/// # Returns
/// One result per unit, in document order.
///
/// # Errors
/// Returns `CodegenError` if the descriptor cannot be parsed or validated.
pub fn generate_from_xml(
    xml: &str,
    config: &GeneratorConfig,
    variant: VariantKind,
) -> Result<Vec<GenerationResult>, CodegenError> {
    let units = fluentgen_model::load_units(xml)?;
    let index = DeclarationIndex::from_units(&units);
    let generator = Generator::new(config, &index, variant);
    Ok(units.iter().map(|unit| generator.generate(unit)).collect())
}

/// Generates one variant from a descriptor file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
    variant: VariantKind,
) -> Result<Vec<GenerationResult>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config, variant)
}
