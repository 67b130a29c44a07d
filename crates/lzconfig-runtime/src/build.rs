//! Build state as reported by the build service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Status of a build or of one of its steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    /// Queued, not yet picked up
    Pending,
    /// Waiting for a worker
    Queued,
    /// Running
    Working,
    /// Finished successfully
    Success,
    /// A step failed
    Failure,
    /// The service failed
    InternalError,
    /// Ran out of time
    Timeout,
    /// Cancelled by a user
    Cancelled,
    /// Expired in the queue
    Expired,
    /// Anything this client does not know about
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    /// Whether the build will not change state again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success
                | Self::Failure
                | Self::InternalError
                | Self::Timeout
                | Self::Cancelled
                | Self::Expired
        )
    }

    /// Name as used by the build service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Queued => "QUEUED",
            Self::Working => "WORKING",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
            Self::Unknown => "STATUS_UNKNOWN",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a running build
#[derive(Debug, Clone, Deserialize)]
pub struct StepState {
    /// Builder image
    pub name: String,
    /// Step status; absent until the step is scheduled
    #[serde(default)]
    pub status: Option<BuildStatus>,
}

/// A submitted build
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    /// Build identifier
    pub id: String,
    /// Overall status
    pub status: BuildStatus,
    /// Step states in pipeline order
    #[serde(default)]
    pub steps: Vec<StepState>,
    /// When the build started running
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Console link to the build log
    #[serde(default)]
    pub log_url: Option<String>,
}

impl Build {
    /// Number of steps that finished successfully
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == Some(BuildStatus::Success))
            .count()
    }

    /// Status line, with step progress while the build is working
    pub fn summary(&self) -> String {
        match self.status {
            BuildStatus::Working => format!(
                "{} ({}/{} steps complete)",
                self.status,
                self.completed_steps(),
                self.steps.len()
            ),
            status => status.to_string(),
        }
    }

    /// Time since the build started, as `HH:MM:SS`
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<String> {
        let seconds = (now - self.start_time?).num_seconds().max(0);
        Some(format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn build(json: &str) -> Build {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_describe_output() {
        let b = build(
            r#"{
                "id": "b-123",
                "status": "WORKING",
                "startTime": "2024-05-01T10:00:00.123456Z",
                "steps": [
                    {"name": "terraform", "status": "SUCCESS"},
                    {"name": "terraform", "status": "WORKING"},
                    {"name": "gcloud"}
                ],
                "logUrl": "https://console.cloud.google.com/cloud-build/builds/b-123"
            }"#,
        );
        assert_eq!(b.summary(), "WORKING (1/3 steps complete)");
        assert!(b.steps[2].status.is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let b = build(r#"{"id": "b", "status": "SOMETHING_NEW"}"#);
        assert_eq!(b.status, BuildStatus::Unknown);
        assert!(!b.status.is_terminal());
    }

    #[rstest]
    #[case(BuildStatus::Success, true)]
    #[case(BuildStatus::Failure, true)]
    #[case(BuildStatus::Cancelled, true)]
    #[case(BuildStatus::Timeout, true)]
    #[case(BuildStatus::Working, false)]
    #[case(BuildStatus::Queued, false)]
    fn test_terminal_statuses(#[case] status: BuildStatus, #[case] terminal: bool) {
        assert_eq!(status.is_terminal(), terminal);
    }

    #[test]
    fn test_elapsed() {
        let mut b = build(r#"{"id": "b", "status": "QUEUED"}"#);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 11, 2, 3).unwrap();
        assert_eq!(b.elapsed(now), None);

        b.start_time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert_eq!(b.elapsed(now).as_deref(), Some("01:02:03"));
    }
}
