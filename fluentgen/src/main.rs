//! `fluentgen` command line: descriptors in, Java sources out.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fluentgen::Driver;
use fluentgen::codegen::{GeneratorConfig, VariantKind};
use std::path::PathBuf;

/// Generate fluent wrapper factories from Java declaration descriptors
#[derive(Parser, Debug)]
#[command(name = "fluentgen", version, about)]
struct Cli {
    /// One or more declaration descriptor files
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<PathBuf>,

    /// Root directory of the generated source tree
    #[arg(long, short)]
    out: PathBuf,

    /// Package prefix of every generated package
    #[arg(long)]
    base_package: Option<String>,

    /// Platform label written into generated headers
    #[arg(long)]
    platform_label: Option<String>,

    /// Variant to generate (interface, base, concrete); repeatable, all if omitted
    #[arg(long = "variant")]
    variants: Vec<VariantKind>,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut builder = GeneratorConfig::builder();
        if let Some(package) = &self.base_package {
            builder = builder.output_base_package(package.clone());
        }
        if let Some(label) = &self.platform_label {
            builder = builder.platform_label(label.clone());
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let driver = Driver::builder()
        .output_dir(&cli.out)
        .variants(cli.variants.iter().copied())
        .config(cli.config())
        .build();

    let report = driver
        .run_files(&cli.input)
        .with_context(|| format!("generation into {} failed", cli.out.display()))?;

    println!(
        "{} generated, {} failed, {} warnings, {} skipped",
        report.generated, report.failed, report.warnings, report.skipped
    );
    if !report.is_clean() {
        bail!("{} declaration variants could not be generated", report.failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_repeated_variants() {
        let cli = Cli::try_parse_from([
            "fluentgen",
            "--input",
            "a.xml",
            "b.xml",
            "--out",
            "generated",
            "--variant",
            "interface",
            "--variant",
            "abstract",
        ])
        .expect("Failed to parse");

        assert_eq!(cli.input, vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert_eq!(cli.out, PathBuf::from("generated"));
        assert_eq!(cli.variants, vec![VariantKind::Interface, VariantKind::Base]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "fluentgen",
            "-i",
            "a.xml",
            "-o",
            "out",
            "--base-package",
            "org.example.fluent",
            "--platform-label",
            "Flow 2",
        ])
        .expect("Failed to parse");

        let config = cli.config();
        assert_eq!(config.output_base_package(), "org.example.fluent");
        assert_eq!(config.platform_label(), "Flow 2");
        assert!(cli.variants.is_empty());
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        let result = Cli::try_parse_from([
            "fluentgen", "-i", "a.xml", "-o", "out", "--variant", "mixin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["fluentgen", "--out", "out"]).is_err());
    }
}
