//! Validate configuration command

use anyhow::{Context, Result};
use lzconfig_core::ConfigValidator;

/// Run the validate command
pub async fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let validator = ConfigValidator::builtin().context("Failed to build schema registry")?;
    let document = validator
        .validate_file(config_path)
        .with_context(|| format!("Configuration file {config_path} is invalid"))?;

    tracing::info!("✓ Configuration file {} is valid", config_path);
    tracing::info!(
        "✓ Landing Zone Type: {}",
        document.landing_zone_type().unwrap_or_default()
    );
    tracing::info!("✓ Version: {}", document.version().unwrap_or_default());
    Ok(())
}
