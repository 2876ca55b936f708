//! Generation driver.
//!
//! Builds the declaration index from every loaded unit, then runs each
//! requested variant over all units. Units are generated in parallel; results
//! are written in input order.

use fluentgen_codegen::{CodegenError, GenerationResult, Generator, GeneratorConfig, VariantKind};
use fluentgen_model::{DeclarationIndex, SourceUnit, load_units};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::writer::write_unit;

/// Outcome counts of a driver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Units generated and written.
    pub generated: usize,
    /// (unit, variant) runs that failed.
    pub failed: usize,
    /// Warnings across all runs.
    pub warnings: usize,
    /// Units skipped because their declaration is not public.
    pub skipped: usize,
    /// Paths written, in write order.
    pub written: Vec<PathBuf>,
}

impl RunReport {
    /// Returns true if no run failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Runs generation variants and writes the results.
#[derive(Debug, Clone)]
pub struct Driver {
    output_dir: PathBuf,
    variants: Vec<VariantKind>,
    config: GeneratorConfig,
}

impl Driver {
    /// Creates a new driver builder.
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the variants, in run order.
    #[must_use]
    pub fn variants(&self) -> &[VariantKind] {
        &self.variants
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads every descriptor file and runs all variants over the units.
    ///
    /// # Errors
    /// Returns `CodegenError` if a file cannot be read or parsed, or if a
    /// generated file cannot be written.
    pub fn run_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<RunReport, CodegenError> {
        let mut units = Vec::new();
        for path in paths {
            let path = path.as_ref();
            tracing::info!("Loading descriptors from {}", path.display());
            let xml = fs::read_to_string(path)?;
            units.extend(load_units(&xml)?);
        }
        self.run(&units)
    }

    /// Runs all variants over the units of one descriptor document.
    ///
    /// # Errors
    /// Returns `CodegenError` if the document is invalid or a generated file
    /// cannot be written.
    pub fn run_xml(&self, xml: &str) -> Result<RunReport, CodegenError> {
        let units = load_units(xml)?;
        self.run(&units)
    }

    /// Runs all variants over `units`.
    ///
    /// A failing unit does not stop the others. Warnings and errors are
    /// logged and counted; only write failures abort the run.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a generated file cannot be written.
    pub fn run(&self, units: &[SourceUnit]) -> Result<RunReport, CodegenError> {
        let index = DeclarationIndex::from_units(units);
        tracing::info!(
            "Indexed {} generated declarations from {} units",
            index.len(),
            units.len()
        );

        let mut report = RunReport::default();
        let targets: Vec<&SourceUnit> = units
            .iter()
            .filter(|unit| {
                let public = unit
                    .primary()
                    .is_none_or(|declaration| declaration.visibility.is_public());
                if !public {
                    report.skipped += 1;
                }
                public
            })
            .collect();

        for &variant in &self.variants {
            let generator = Generator::new(&self.config, &index, variant);
            let results: Vec<GenerationResult> = targets
                .par_iter()
                .map(|unit| generator.generate(unit))
                .collect();

            for (unit, result) in targets.iter().zip(results) {
                self.record(unit, variant, result, &mut report)?;
            }
        }

        tracing::info!(
            "Generation finished: {} generated, {} failed, {} warnings",
            report.generated,
            report.failed,
            report.warnings
        );
        Ok(report)
    }

    fn record(
        &self,
        unit: &SourceUnit,
        variant: VariantKind,
        result: GenerationResult,
        report: &mut RunReport,
    ) -> Result<(), CodegenError> {
        let name = describe(unit);
        for warning in result.warnings() {
            tracing::warn!("{} ({}): {}", name, variant, warning);
        }
        report.warnings += result.warnings().len();

        match result {
            GenerationResult::Success { unit: generated, .. } => {
                let path = write_unit(&self.output_dir, &generated, self.config.indent())?;
                report.generated += 1;
                report.written.push(path);
            }
            GenerationResult::Failure { errors, .. } => {
                for error in &errors {
                    tracing::error!("{} ({}): {}", name, variant, error);
                }
                report.failed += 1;
            }
        }
        Ok(())
    }
}

fn describe(unit: &SourceUnit) -> String {
    match unit.primary() {
        Some(declaration) => unit.qualified_name(declaration),
        None => format!(
            "{} declarations in package {}",
            unit.declarations.len(),
            unit.package.as_deref().unwrap_or("<default>")
        ),
    }
}

/// Builder for [`Driver`].
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    output_dir: PathBuf,
    variants: Vec<VariantKind>,
    config: GeneratorConfig,
}

impl DriverBuilder {
    /// Creates a builder writing to the current directory with every variant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            variants: VariantKind::ALL.to_vec(),
            config: GeneratorConfig::default(),
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Restricts the run to the given variants.
    ///
    /// Variants always run in interface, base, concrete order; duplicates
    /// are ignored. An empty list keeps every variant.
    #[must_use]
    pub fn variants(mut self, variants: impl IntoIterator<Item = VariantKind>) -> Self {
        let requested: Vec<VariantKind> = variants.into_iter().collect();
        if !requested.is_empty() {
            self.variants = VariantKind::ALL
                .into_iter()
                .filter(|kind| requested.contains(kind))
                .collect();
        }
        self
    }

    /// Sets the generator configuration.
    #[must_use]
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the driver.
    #[must_use]
    pub fn build(self) -> Driver {
        Driver {
            output_dir: self.output_dir,
            variants: self.variants,
            config: self.config,
        }
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS_XML: &str = r#"
<sources>
    <sourceUnit package="com.example.widgets">
        <interface name="HasText">
            <method name="setText" returns="void">
                <parameter name="text" type="String"/>
            </method>
            <method name="getText" returns="String"/>
        </interface>
    </sourceUnit>
    <sourceUnit package="com.example.widgets">
        <class name="Button">
            <implements type="HasText"/>
            <method name="click" visibility="public" returns="void"/>
            <method name="get" visibility="public" returns="String"/>
        </class>
    </sourceUnit>
    <sourceUnit package="com.example.widgets">
        <class name="Internal" visibility="package">
            <method name="run" visibility="public" returns="void"/>
        </class>
    </sourceUnit>
    <sourceUnit package="com.example.widgets">
        <class name="First"/>
        <class name="Second"/>
    </sourceUnit>
</sources>
"#;

    fn driver(dir: &Path) -> Driver {
        Driver::builder().output_dir(dir).build()
    }

    #[test]
    fn test_builder_defaults() {
        let driver = Driver::builder().build();
        assert_eq!(driver.output_dir(), Path::new("."));
        assert_eq!(driver.variants(), &VariantKind::ALL);
    }

    #[test]
    fn test_builder_variant_order() {
        let driver = Driver::builder()
            .variants([VariantKind::Concrete, VariantKind::Interface, VariantKind::Concrete])
            .build();
        assert_eq!(
            driver.variants(),
            &[VariantKind::Interface, VariantKind::Concrete]
        );

        let driver = Driver::builder().variants(Vec::new()).build();
        assert_eq!(driver.variants().len(), 3);
    }

    #[test]
    fn test_run_xml_writes_all_variants() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = driver(dir.path()).run_xml(WIDGETS_XML).expect("Failed to run");

        // Two public units times three variants.
        assert_eq!(report.generated, 6);
        // The two-declaration unit fails once per variant.
        assert_eq!(report.failed, 3);
        assert_eq!(report.skipped, 1);
        assert!(!report.is_clean());

        let package_dir = dir.path().join("com/oliveryasuna/vaadin/fluent/com/example/widgets");
        for name in [
            "IHasTextFactory",
            "AbstractHasTextFactory",
            "HasTextFactory",
            "IButtonFactory",
            "AbstractButtonFactory",
            "ButtonFactory",
        ] {
            assert!(
                package_dir.join(format!("{}.java", name)).is_file(),
                "missing {}",
                name
            );
        }
        assert!(!package_dir.join("IInternalFactory.java").exists());
    }

    #[test]
    fn test_run_counts_rename_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = driver(dir.path()).run_xml(WIDGETS_XML).expect("Failed to run");
        // `Button.get` is renamed once by the interface variant.
        assert_eq!(report.warnings, 1);

        let source = fs::read_to_string(
            dir.path()
                .join("com/oliveryasuna/vaadin/fluent/com/example/widgets/IButtonFactory.java"),
        )
        .expect("read back");
        assert!(source.contains("get_()"));
        assert!(source.contains("IHasTextFactory<__T, __F>"));
    }

    #[test]
    fn test_run_single_variant() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = Driver::builder()
            .output_dir(dir.path())
            .variants([VariantKind::Interface])
            .build()
            .run_xml(WIDGETS_XML)
            .expect("Failed to run");
        assert_eq!(report.generated, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn test_run_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("widgets.xml");
        fs::write(&input, WIDGETS_XML).expect("write input");
        let out = dir.path().join("out");

        let report = driver(&out).run_files(&[input]).expect("Failed to run");
        assert_eq!(report.generated, 6);
    }

    #[test]
    fn test_run_files_missing_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = driver(dir.path()).run_files(&[dir.path().join("absent.xml")]);
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }
}
