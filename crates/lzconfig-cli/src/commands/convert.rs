//! Convert a single configuration file

use anyhow::{Context, Result};
use lzconfig_codegen::{ConvertOptions, Converter};

/// Run the convert command
pub async fn run(
    config_path: &str,
    output_path: &str,
    common_only: bool,
    landing_zone_type: Option<&str>,
) -> Result<()> {
    let converter = Converter::new(ConvertOptions {
        landing_zone_type: landing_zone_type.map(str::to_string),
    });

    let converted = converter
        .convert_file(config_path, output_path, common_only)
        .with_context(|| format!("Failed to convert {config_path}"))?;

    tracing::info!(
        "✓ Converted {} to {} ({} variables)",
        config_path,
        converted.path.display(),
        converted.variables.len()
    );
    tracing::debug!("Content hash: {}", converted.hash);
    Ok(())
}
