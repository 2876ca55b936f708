//! Error types for descriptor parsing and model validation.

use thiserror::Error;

/// Error type for descriptor parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Malformed type text.
    #[error("invalid type '{text}' at position {position}: {message}")]
    InvalidType {
        /// The type text being parsed.
        text: String,
        /// Byte position of the problem.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// Invalid descriptor structure.
    #[error("invalid descriptor structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for model validation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A name is empty.
    #[error("empty {kind} name in '{owner}'")]
    EmptyName {
        /// Kind of the unnamed element.
        kind: String,
        /// Enclosing declaration or method.
        owner: String,
    },

    /// The same type parameter is declared twice.
    #[error("duplicate type parameter '{name}' in '{owner}'")]
    DuplicateTypeParameter {
        /// Type parameter name.
        name: String,
        /// Enclosing declaration or method.
        owner: String,
    },

    /// The same parameter name is used twice in one method.
    #[error("duplicate parameter '{name}' in method '{method}'")]
    DuplicateParameter {
        /// Parameter name.
        name: String,
        /// Method name.
        method: String,
    },

    /// Varargs parameter that is not the last one.
    #[error("varargs parameter '{name}' must be last in method '{method}'")]
    MisplacedVarargs {
        /// Parameter name.
        name: String,
        /// Method name.
        method: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid type error.
    pub fn invalid_type(text: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::InvalidType {
            text: text.into(),
            position,
            message: message.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
