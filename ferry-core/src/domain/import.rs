//! Import job domain types
//!
//! An import job loads endpoint definitions from a staged object into an
//! application and optionally defines a segment from them.

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Format of the staged endpoints file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImportFormat {
    Json,
    Csv,
}

/// Definition of an import job
///
/// Serialized with the service's PascalCase member names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportJobRequest {
    /// Location of the staged endpoints file (e.g. "s3://bucket/imports/endpoints.json")
    pub s3_url: String,
    /// Role the service assumes to read the staged file
    pub role_arn: String,
    pub format: ImportFormat,
    pub register_endpoints: bool,
    pub define_segment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_name: Option<String>,
}

impl ImportJobRequest {
    /// Creates a request that registers the endpoints and defines a segment
    /// named `segment_name` from them
    pub fn define_segment(
        s3_url: impl Into<String>,
        role_arn: impl Into<String>,
        segment_name: impl Into<String>,
    ) -> Self {
        Self {
            s3_url: s3_url.into(),
            role_arn: role_arn.into(),
            format: ImportFormat::Json,
            register_endpoints: true,
            define_segment: true,
            segment_name: Some(segment_name.into()),
        }
    }
}

/// States the import service reports while a job has not finished
pub const IN_PROGRESS_STATES: &[&str] = &[
    "CREATED",
    "PREPARING_FOR_INITIALIZATION",
    "INITIALIZING",
    "PROCESSING",
    "PENDING_JOB",
    "COMPLETING",
    "FAILING",
];

/// Classifies an import job state
///
/// Returns `None` for states outside the service's documented set.
pub fn import_job_status(state: &str) -> Option<JobStatus> {
    match state {
        "COMPLETED" => Some(JobStatus::Succeeded),
        "FAILED" => Some(JobStatus::Failed),
        s if IN_PROGRESS_STATES.contains(&s) => Some(JobStatus::Running),
        _ => None,
    }
}
