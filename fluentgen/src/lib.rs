//! # fluentgen
//!
//! Generates fluent wrapper factories for Java classes and interfaces.
//!
//! For every public source declaration three companions are produced:
//!
//! - **`I…Factory`** - an interface with one chainable default method per
//!   eligible source method
//! - **`Abstract…Factory`** - an abstract base class implementing the
//!   interface and re-exposing renamed methods under their original names
//! - **`…Factory`** - a final concrete class
//!
//! ## Quick Start
//!
//! ```ignore
//! use fluentgen::prelude::*;
//!
//! let report = Driver::builder()
//!     .output_dir("generated")
//!     .config(GeneratorConfig::default())
//!     .build()
//!     .run_files(&["descriptors/button.xml"])?;
//!
//! println!("{} generated, {} failed", report.generated, report.failed);
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Declaration descriptors, type model and declaration index
//! - [`codegen`] - Type resolution, generation variants and Java emission
//! - [`driver`] - Runs variants over many units and writes the results
//! - [`writer`] - Writes emitted units below an output directory

pub mod driver;
pub mod prelude;
pub mod writer;

/// Declaration model and descriptor parsing.
pub mod model {
    pub use fluentgen_model::*;
}

/// Fluent wrapper generation.
pub mod codegen {
    pub use fluentgen_codegen::*;
}

pub use driver::{Driver, DriverBuilder, RunReport};
pub use writer::write_unit;
