//! # fluentgen model
//!
//! Structural model of Java declarations for fluent wrapper generation.
//!
//! This crate provides:
//! - Type references classified by structural category
//! - A parser for Java type text
//! - Declaration descriptor parsing
//! - The read-only declaration index shared by generation runs
//! - Model validation

pub mod error;
pub mod index;
pub mod parser;
pub mod signature;
pub mod types;
pub mod validation;

pub use error::{ModelError, ParseError};
pub use index::DeclarationIndex;
pub use parser::{parse_file, parse_unit, parse_units};
pub use signature::{parse_bounds, parse_parameter_type, parse_type};
pub use types::{
    DeclarationKind, ImportDecl, MethodModifiers, MethodSignature, NestedType, ObjectType,
    Parameter, PrimitiveKind, SourceDeclaration, SourceUnit, TypeCategory, TypeParameter,
    TypeReference, Visibility, uncapitalize,
};
pub use validation::{validate_declaration, validate_unit};

/// Parses a descriptor document and validates every unit in it.
///
/// # Errors
/// Returns `ModelError::Parse` for parse failures or the first validation
/// error.
pub fn load_units(xml: &str) -> Result<Vec<SourceUnit>, ModelError> {
    let units = parse_units(xml)?;
    for unit in &units {
        validate_unit(unit)?;
    }
    Ok(units)
}
