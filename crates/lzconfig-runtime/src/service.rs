//! Build service abstraction

use async_trait::async_trait;

use crate::build::Build;
use crate::error::Result;
use crate::request::BuildRequest;

/// Somewhere builds can be submitted and inspected
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Submit `request` in `project_id` without waiting for it to run
    async fn submit(&self, project_id: &str, request: &BuildRequest) -> Result<Build>;

    /// Current state of build `build_id`
    async fn get(&self, project_id: &str, build_id: &str) -> Result<Build>;
}
