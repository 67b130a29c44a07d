//! Convert every environment of a landing zone

use anyhow::{Context, Result};
use lzconfig_codegen::{ConvertOptions, Converter, default_landing_zone_dir};
use lzconfig_core::ConfigValidator;
use std::path::PathBuf;

/// Run the convert-all command
pub async fn run(
    config_path: &str,
    landing_zone_dir: Option<&str>,
    landing_zone_type: Option<&str>,
) -> Result<()> {
    let validator = ConfigValidator::builtin().context("Failed to build schema registry")?;
    let document = validator
        .validate_file(config_path)
        .with_context(|| format!("Configuration file {config_path} is invalid"))?;

    let converter = Converter::new(ConvertOptions {
        landing_zone_type: landing_zone_type.map(str::to_string),
    });
    let lz_type = converter
        .resolve_type(&document)
        .context("Failed to determine landing zone type")?;

    let lz_dir: PathBuf = landing_zone_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| default_landing_zone_dir(lz_type));

    let files = converter
        .convert_landing_zone(&document, &lz_dir)
        .with_context(|| format!("Failed to convert landing zone in {}", lz_dir.display()))?;

    if files.is_empty() {
        tracing::warn!("No environments found under {}", lz_dir.display());
    }
    for file in &files {
        tracing::info!("✓ {}", file.path.display());
    }
    Ok(())
}
