//! Deployment: validate, convert, submit, optionally watch

use std::path::{Path, PathBuf};
use std::time::Duration;

use lzconfig_codegen::{ConvertOptions, Converter, default_landing_zone_dir};
use lzconfig_core::{ConfigValidator, LandingZoneType};

use crate::build::Build;
use crate::error::Result;
use crate::monitor::{DEFAULT_POLL_INTERVAL, monitor_build};
use crate::request::{BuildRequest, BuildSettings, load_steps};
use crate::service::BuildService;

/// Options for a deployment
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Landing zone directory the variable files are written into;
    /// `landing-zones/<type>` when unset
    pub landing_zone_dir: Option<PathBuf>,
    /// Pipeline definition whose steps are submitted;
    /// `<landing zone dir>/cloudbuild.yaml` when unset
    pub pipeline: Option<PathBuf>,
    /// Project, domain and secret settings
    pub settings: BuildSettings,
    /// Landing zone type that overrides the configuration's own
    pub landing_zone_type: Option<String>,
    /// Wait for the build and report its progress
    pub follow: bool,
    /// Time between status polls while following
    pub poll_interval: Duration,
}

impl DeployOptions {
    /// Options using the default directory and pipeline
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            landing_zone_dir: None,
            pipeline: None,
            settings,
            landing_zone_type: None,
            follow: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Landing zone directory and pipeline file for `lz_type`
    pub fn paths_for(&self, lz_type: LandingZoneType) -> (PathBuf, PathBuf) {
        let lz_dir = self
            .landing_zone_dir
            .clone()
            .unwrap_or_else(|| default_landing_zone_dir(lz_type));
        let pipeline = self
            .pipeline
            .clone()
            .unwrap_or_else(|| lz_dir.join("cloudbuild.yaml"));
        (lz_dir, pipeline)
    }
}

/// Runs deployments against a build service
pub struct Deployer<S> {
    service: S,
    validator: ConfigValidator,
}

impl<S: BuildService> Deployer<S> {
    /// Deployer submitting to `service`, validating with `validator`
    pub fn new(service: S, validator: ConfigValidator) -> Self {
        Self { service, validator }
    }

    /// The build service in use
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Deploy the landing zone described by `config`.
    ///
    /// Returns the submitted build, or the finished build when following.
    pub async fn deploy(&self, config: impl AsRef<Path>, options: &DeployOptions) -> Result<Build> {
        let config = config.as_ref();
        tracing::info!("Deploying {}", config.display());

        let document = self.validator.validate_file(config)?;
        tracing::info!("Configuration is valid");

        let converter = Converter::new(ConvertOptions {
            landing_zone_type: options.landing_zone_type.clone(),
        });
        let lz_type = converter.resolve_type(&document)?;
        let (lz_dir, pipeline) = options.paths_for(lz_type);
        let files = converter.convert_landing_zone(&document, &lz_dir)?;
        tracing::info!("Converted {} variable file(s) in {}", files.len(), lz_dir.display());

        let steps = load_steps(&pipeline)?;
        let request = BuildRequest::assemble(steps, &document, lz_type, &options.settings)?;

        let project_id = options.settings.project_id.as_str();
        let build = self.service.submit(project_id, &request).await?;
        if let Some(url) = &build.log_url {
            tracing::info!("Build logs: {}", url);
        }

        if !options.follow {
            return Ok(build);
        }

        tracing::info!("Monitoring build {}", build.id);
        monitor_build(&self.service, project_id, &build.id, options.poll_interval).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DeployOptions {
        DeployOptions::new(BuildSettings {
            project_id: "p".to_string(),
            ..BuildSettings::default()
        })
    }

    #[test]
    fn test_paths_default_to_the_type_directory() {
        let (lz_dir, pipeline) = options().paths_for(LandingZoneType::PbmmGcp);
        assert_eq!(lz_dir, Path::new("landing-zones").join("pbmm-gcp"));
        assert_eq!(pipeline, lz_dir.join("cloudbuild.yaml"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let mut options = options();
        options.landing_zone_dir = Some(PathBuf::from("lz"));
        let (lz_dir, pipeline) = options.paths_for(LandingZoneType::Gcp);
        assert_eq!(lz_dir, Path::new("lz"));
        assert_eq!(pipeline, Path::new("lz").join("cloudbuild.yaml"));

        options.pipeline = Some(PathBuf::from("other.yaml"));
        assert_eq!(options.paths_for(LandingZoneType::Gcp).1, Path::new("other.yaml"));
    }
}
