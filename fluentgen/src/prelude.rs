//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fluentgen::prelude::*;
//! ```

// Model types
pub use fluentgen_model::{
    DeclarationIndex, DeclarationKind, ImportDecl, MethodSignature, ModelError, ParseError,
    SourceDeclaration, SourceUnit, TypeReference, load_units,
};

// Generation types
pub use fluentgen_codegen::{
    CodegenError, CompilationUnit, GenerationError, GenerationResult, GenerationWarning,
    Generator, GeneratorConfig, TypeOverride, VariantKind, emit_unit,
};

// Driver types
pub use crate::driver::{Driver, DriverBuilder, RunReport};
pub use crate::writer::write_unit;
