//! Deploy command

use anyhow::{Context, Result};
use lzconfig_core::ConfigValidator;
use lzconfig_runtime::{BuildSettings, DeployOptions, Deployer, GcloudBuildService};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the deploy command
pub struct DeployArgs<'a> {
    /// Configuration file
    pub config_path: &'a str,
    /// Project the build runs in
    pub project_id: &'a str,
    /// Follow the build until it finishes
    pub progress: bool,
    /// Landing zone type override
    pub landing_zone_type: Option<&'a str>,
    /// Landing zone directory override
    pub landing_zone_dir: Option<&'a str>,
    /// Pipeline file override
    pub pipeline: Option<&'a str>,
    /// `_DOMAIN` substitution
    pub domain: Option<&'a str>,
    /// Secret Manager version for the build
    pub secret_version: Option<&'a str>,
    /// Seconds between status polls
    pub poll_interval: u64,
}

/// Run the deploy command
pub async fn run(args: DeployArgs<'_>) -> Result<()> {
    let mut options = DeployOptions::new(BuildSettings {
        project_id: args.project_id.to_string(),
        domain: args.domain.map(str::to_string),
        secret_version: args.secret_version.map(str::to_string),
    });
    options.landing_zone_dir = args.landing_zone_dir.map(PathBuf::from);
    options.pipeline = args.pipeline.map(PathBuf::from);
    options.landing_zone_type = args.landing_zone_type.map(str::to_string);
    options.follow = args.progress;
    options.poll_interval = Duration::from_secs(args.poll_interval);

    let validator = ConfigValidator::builtin().context("Failed to build schema registry")?;
    let deployer = Deployer::new(GcloudBuildService::new(), validator);
    let build = deployer
        .deploy(args.config_path, &options)
        .await
        .context("Deployment failed")?;

    tracing::info!("✓ Build {} {}", build.id, build.status);
    if !args.progress {
        tracing::info!("You can monitor the build progress in the Cloud Console");
    }
    Ok(())
}
