//! Import job DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::import::import_job_status;
use crate::domain::job::{JobHandle, JobSnapshot};

/// Import job description returned by both job creation and job lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportJobResponse {
    pub id: String,
    #[serde(default)]
    pub application_id: Option<String>,
    pub job_status: String,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failures: Option<Vec<String>>,
    #[serde(default)]
    pub total_processed: Option<u64>,
    #[serde(default)]
    pub total_failures: Option<u64>,
    #[serde(default)]
    pub total_pieces: Option<u64>,
    #[serde(default)]
    pub completed_pieces: Option<u64>,
    #[serde(default)]
    pub failed_pieces: Option<u64>,
}

impl From<ImportJobResponse> for JobSnapshot {
    fn from(response: ImportJobResponse) -> Self {
        JobSnapshot {
            handle: JobHandle::new(response.id),
            status: import_job_status(&response.job_status),
            state: response.job_status,
            failures: response.failures.unwrap_or_default(),
            total_processed: response.total_processed,
            total_failures: response.total_failures,
            completed_at: response.completion_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobStatus;

    #[test]
    fn test_completed_response_conversion() {
        let response: ImportJobResponse = serde_json::from_value(serde_json::json!({
            "Id": "7f3c",
            "ApplicationId": "app-1",
            "JobStatus": "COMPLETED",
            "CompletionDate": "2024-05-01T12:00:00Z",
            "Failures": ["line 3: missing Address"],
            "TotalProcessed": 10,
            "TotalFailures": 1
        }))
        .unwrap();

        let snapshot = JobSnapshot::from(response);
        assert_eq!(snapshot.handle.as_str(), "7f3c");
        assert_eq!(snapshot.status, Some(JobStatus::Succeeded));
        assert_eq!(snapshot.failures, vec!["line 3: missing Address"]);
        assert_eq!(snapshot.total_processed, Some(10));
        assert!(snapshot.completed_at.is_some());
    }

    #[test]
    fn test_minimal_response_conversion() {
        let response: ImportJobResponse = serde_json::from_value(serde_json::json!({
            "Id": "7f3c",
            "JobStatus": "SOMETHING_NEW"
        }))
        .unwrap();

        let snapshot = JobSnapshot::from(response);
        assert_eq!(snapshot.status, None);
        assert_eq!(snapshot.state, "SOMETHING_NEW");
        assert!(snapshot.failures.is_empty());
    }
}
