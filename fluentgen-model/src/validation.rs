//! Source unit validation.
//!
//! Checks structural consistency that the descriptor format cannot express:
//! names are non-empty, type parameter and parameter names are unique, and
//! varargs only appear last.

use crate::error::ModelError;
use crate::types::{MethodSignature, SourceDeclaration, SourceUnit, TypeParameter};
use std::collections::HashSet;

/// Validates a parsed unit.
///
/// # Arguments
/// * `unit` - The unit to validate
///
/// # Errors
/// Returns the first `ModelError` found.
pub fn validate_unit(unit: &SourceUnit) -> Result<(), ModelError> {
    for declaration in &unit.declarations {
        validate_declaration(declaration)?;
    }
    Ok(())
}

/// Validates one declaration and its methods.
///
/// # Errors
/// Returns the first `ModelError` found.
pub fn validate_declaration(declaration: &SourceDeclaration) -> Result<(), ModelError> {
    if declaration.name.is_empty() {
        return Err(ModelError::EmptyName {
            kind: declaration.kind.keyword().to_string(),
            owner: "<unit>".to_string(),
        });
    }

    validate_type_parameters(&declaration.type_parameters, &declaration.name)?;

    for nested in &declaration.nested_types {
        if nested.name.is_empty() {
            return Err(ModelError::EmptyName {
                kind: "nested type".to_string(),
                owner: declaration.name.clone(),
            });
        }
    }

    for method in &declaration.methods {
        validate_method(method, &declaration.name)?;
    }

    Ok(())
}

fn validate_type_parameters(params: &[TypeParameter], owner: &str) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for param in params {
        if param.name.is_empty() {
            return Err(ModelError::EmptyName {
                kind: "type parameter".to_string(),
                owner: owner.to_string(),
            });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(ModelError::DuplicateTypeParameter {
                name: param.name.clone(),
                owner: owner.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_method(method: &MethodSignature, owner: &str) -> Result<(), ModelError> {
    if method.name.is_empty() {
        return Err(ModelError::EmptyName {
            kind: "method".to_string(),
            owner: owner.to_string(),
        });
    }

    validate_type_parameters(
        &method.type_parameters,
        &format!("{}.{}", owner, method.name),
    )?;

    let mut seen = HashSet::new();
    let last = method.parameters.len().saturating_sub(1);
    for (i, param) in method.parameters.iter().enumerate() {
        if param.name.is_empty() {
            return Err(ModelError::EmptyName {
                kind: "parameter".to_string(),
                owner: method.name.clone(),
            });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(ModelError::DuplicateParameter {
                name: param.name.clone(),
                method: method.name.clone(),
            });
        }
        if param.is_varargs && i != last {
            return Err(ModelError::MisplacedVarargs {
                name: param.name.clone(),
                method: method.name.clone(),
            });
        }
    }

    Ok(())
}
