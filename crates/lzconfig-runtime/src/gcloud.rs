//! `gcloud`-backed build service

use async_trait::async_trait;
use std::io::Write;
use tokio::process::Command;

use crate::build::Build;
use crate::error::{Error, Result};
use crate::request::BuildRequest;
use crate::service::BuildService;

/// Submits and describes builds through the `gcloud` CLI
#[derive(Debug, Clone)]
pub struct GcloudBuildService {
    program: String,
}

impl GcloudBuildService {
    /// Use `gcloud` from `PATH`
    pub fn new() -> Self {
        Self::with_program("gcloud")
    }

    /// Use a specific `gcloud` executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[String]) -> Result<Build> {
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::Command {
                program: self.program.clone(),
                message: format!("failed to start: {e}"),
                stderr: None,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!("{} exited with {}: {}", self.program, output.status, stderr);
            let message = match stderr.lines().last() {
                Some(last) => format!("exited with {}: {}", output.status, last),
                None => format!("exited with {}", output.status),
            };
            return Err(Error::Command {
                program: self.program.clone(),
                message,
                stderr: Some(stderr),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| Error::Response(e.to_string()))
    }
}

impl Default for GcloudBuildService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildService for GcloudBuildService {
    async fn submit(&self, project_id: &str, request: &BuildRequest) -> Result<Build> {
        let mut config = tempfile::Builder::new()
            .prefix("lz-config-build-")
            .suffix(".json")
            .tempfile()?;
        config.write_all(request.to_json()?.as_bytes())?;
        config.flush()?;

        let args = vec![
            "builds".to_string(),
            "submit".to_string(),
            "--no-source".to_string(),
            "--async".to_string(),
            format!("--config={}", config.path().display()),
            format!("--project={project_id}"),
            "--format=json".to_string(),
        ];
        let build = self.run(&args).await?;
        tracing::info!("Submitted build {}", build.id);
        Ok(build)
    }

    async fn get(&self, project_id: &str, build_id: &str) -> Result<Build> {
        let args = vec![
            "builds".to_string(),
            "describe".to_string(),
            build_id.to_string(),
            format!("--project={project_id}"),
            "--format=json".to_string(),
        ];
        self.run(&args).await
    }
}
