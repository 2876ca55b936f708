//! Error and diagnostic types for fluent wrapper generation.
//!
//! [`CodegenError`] covers failures outside a generation run (bad input,
//! I/O). Problems found while walking a declaration are not returned as
//! errors; they are recorded as [`GenerationError`] and [`GenerationWarning`]
//! diagnostics and surfaced through
//! [`GenerationResult`](crate::generator::GenerationResult).

use fluentgen_model::TypeCategory;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Descriptor parse error.
    #[error("descriptor parse error: {0}")]
    Parse(#[from] fluentgen_model::ParseError),

    /// Model validation error.
    #[error("model error: {0}")]
    Model(#[source] fluentgen_model::ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<fluentgen_model::ModelError> for CodegenError {
    /// Parse failures surface as [`CodegenError::Parse`]; only validation
    /// failures stay wrapped as [`CodegenError::Model`].
    fn from(error: fluentgen_model::ModelError) -> Self {
        match error {
            fluentgen_model::ModelError::Parse(parse) => Self::Parse(parse),
            other => Self::Model(other),
        }
    }
}

/// Fatal condition recorded during a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The unit does not contain exactly one top-level declaration.
    #[error("expected exactly one top-level declaration, found {count}")]
    MultipleDeclarations {
        /// Number of top-level declarations.
        count: usize,
    },

    /// The top-level declaration is not a class or interface.
    #[error("unsupported declaration '{name}': {kind} is not a class or interface")]
    UnsupportedDeclaration {
        /// Declaration name.
        name: String,
        /// Declaration keyword.
        kind: String,
    },

    /// A return type falls outside the resolvable categories.
    #[error("cannot resolve return type '{type_text}' ({category}) of method '{method}'")]
    UnresolvableReturnType {
        /// Method name.
        method: String,
        /// Return type as written.
        type_text: String,
        /// Structural category of the return type.
        category: TypeCategory,
    },

    /// A parameter type in the source package is not public.
    #[error("parameter type '{type_name}' of method '{method}' is not accessible")]
    InaccessibleParameterType {
        /// Method name.
        method: String,
        /// Qualified type name.
        type_name: String,
    },
}

/// Recoverable condition recorded during a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationWarning {
    /// An import names a non-public type and was dropped.
    #[error("dropped import of inaccessible type '{name}'")]
    InaccessibleImport {
        /// Import as written.
        name: String,
    },

    /// A method is exposed under a rewritten name.
    #[error("method '{from}' exposed as '{to}'")]
    MethodRenamed {
        /// Original method name.
        from: String,
        /// Generated method name.
        to: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_display() {
        let error = GenerationError::MultipleDeclarations { count: 2 };
        assert_eq!(
            error.to_string(),
            "expected exactly one top-level declaration, found 2"
        );

        let error = GenerationError::UnresolvableReturnType {
            method: "getValue".to_string(),
            type_text: "V".to_string(),
            category: TypeCategory::TypeParameter,
        };
        assert_eq!(
            error.to_string(),
            "cannot resolve return type 'V' (type parameter) of method 'getValue'"
        );
    }

    #[test]
    fn test_generation_warning_display() {
        let warning = GenerationWarning::MethodRenamed {
            from: "get".to_string(),
            to: "get_".to_string(),
        };
        assert_eq!(warning.to_string(), "method 'get' exposed as 'get_'");
    }

    #[test]
    fn test_codegen_error_flattens_parse() {
        let error: CodegenError = fluentgen_model::ModelError::Parse(
            fluentgen_model::ParseError::structure("no sourceUnit element found"),
        )
        .into();
        assert!(matches!(error, CodegenError::Parse(_)));
    }

    #[test]
    fn test_codegen_error_from_model() {
        let error: CodegenError = fluentgen_model::ModelError::DuplicateParameter {
            method: "setText".to_string(),
            name: "text".to_string(),
        }
        .into();
        assert!(matches!(error, CodegenError::Model(_)));
        assert!(error.to_string().starts_with("model error: "));
    }
}
