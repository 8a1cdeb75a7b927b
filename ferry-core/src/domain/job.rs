//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier returned by a job submission
///
/// Every status query for a job goes through its handle. Handles are never
/// modified after the service hands them out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Job execution status
///
/// `Succeeded` and `Failed` are terminal: no transition happens after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One observation of a remote job
///
/// `state` is the raw state string reported by the service. `status` is the
/// classification of that state, or `None` when the state is not one the
/// service is known to report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub handle: JobHandle,
    pub state: String,
    pub status: Option<JobStatus>,
    pub failures: Vec<String>,
    pub total_processed: Option<u64>,
    pub total_failures: Option<u64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobSnapshot {
    /// Creates a snapshot for a classified status with no failures
    pub fn new(handle: JobHandle, status: JobStatus) -> Self {
        Self {
            handle,
            state: status.to_string().to_uppercase(),
            status: Some(status),
            failures: Vec::new(),
            total_processed: None,
            total_failures: None,
            completed_at: None,
        }
    }

    /// Creates a snapshot for a state the service is not known to report
    pub fn unrecognized(handle: JobHandle, state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            status: None,
            ..Self::new(handle, JobStatus::Running)
        }
    }

    pub fn with_failures(mut self, failures: Vec<String>) -> Self {
        self.failures = failures;
        self
    }
}

/// Result of a job that completed successfully
///
/// Per-item failures are data: a job can succeed while some of its entries
/// were rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub handle: JobHandle,
    pub failures: Vec<String>,
    pub total_processed: Option<u64>,
    pub total_failures: Option<u64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl From<JobSnapshot> for JobResult {
    fn from(snapshot: JobSnapshot) -> Self {
        Self {
            handle: snapshot.handle,
            failures: snapshot.failures,
            total_processed: snapshot.total_processed,
            total_failures: snapshot.total_failures,
            completed_at: snapshot.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_handle_is_transparent_in_json() {
        let handle = JobHandle::new("job-42");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"job-42\"");
        assert_eq!(handle.to_string(), "job-42");
    }

    #[test]
    fn test_unrecognized_snapshot_keeps_raw_state() {
        let snapshot = JobSnapshot::unrecognized(JobHandle::new("a"), "PAUSED");
        assert_eq!(snapshot.state, "PAUSED");
        assert_eq!(snapshot.status, None);
    }

    #[test]
    fn test_result_from_snapshot_carries_failures() {
        let snapshot = JobSnapshot::new(JobHandle::new("a"), JobStatus::Succeeded)
            .with_failures(vec!["endpoint-7: invalid address".to_string()]);

        let result = JobResult::from(snapshot);
        assert!(result.has_failures());
        assert_eq!(result.handle.as_str(), "a");
    }
}
