//! Build progress monitoring

use chrono::Utc;
use std::time::Duration;

use crate::build::{Build, BuildStatus};
use crate::error::{Error, Result};
use crate::service::BuildService;

/// Default time between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll `build_id` until it reaches a terminal status.
///
/// Logs the status, step progress and elapsed time on every poll. Returns
/// the final build on success and [`Error::BuildFailed`] for any other
/// terminal status.
pub async fn monitor_build(
    service: &dyn BuildService,
    project_id: &str,
    build_id: &str,
    poll_interval: Duration,
) -> Result<Build> {
    loop {
        let build = service.get(project_id, build_id).await?;

        let elapsed = build
            .elapsed(Utc::now())
            .unwrap_or_else(|| "not started".to_string());
        tracing::info!(build_id, elapsed = %elapsed, "Build status: {}", build.summary());
        for step in &build.steps {
            let status = step.status.unwrap_or(BuildStatus::Queued);
            tracing::debug!(build_id, "  {} {}", status, step.name);
        }

        if build.status.is_terminal() {
            return match build.status {
                BuildStatus::Success => Ok(build),
                status => Err(Error::BuildFailed {
                    build_id: build.id,
                    status: status.to_string(),
                }),
            };
        }

        tokio::time::sleep(poll_interval).await;
    }
}
