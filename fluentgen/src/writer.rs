//! Writes emitted Java sources below an output directory.

use fluentgen_codegen::{CompilationUnit, emit_unit};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Emits `unit` and writes it to `<out_dir>/<package path>/<Name>.java`.
///
/// Package directories are created as needed and an existing file is
/// replaced.
///
/// # Arguments
/// * `out_dir` - Root of the generated source tree
/// * `unit` - Unit to emit
/// * `indent` - Indentation unit for the emitted source
///
/// # Returns
/// Path of the written file.
///
/// # Errors
/// Returns an I/O error if a directory or the file cannot be written.
pub fn write_unit(out_dir: &Path, unit: &CompilationUnit, indent: &str) -> io::Result<PathBuf> {
    let path = out_dir.join(unit.relative_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, emit_unit(unit, indent))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}
