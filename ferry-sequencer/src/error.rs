//! Error types for the sequencer and its collaborators

use ferry_core::domain::job::JobHandle;
use std::time::Duration;
use thiserror::Error;

/// The job service refused to create a job
///
/// No job exists when this is returned.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid job request: {0}")]
    InvalidRequest(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("job service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("job service unavailable: {0}")]
    Unavailable(String),
}

/// A status query failed
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown job handle: {0}")]
    UnknownHandle(JobHandle),

    #[error("job {handle} reported unrecognized status `{state}`")]
    UnrecognizedStatus { handle: JobHandle, state: String },

    #[error("job service rejected the status query (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("job service unavailable: {0}")]
    Unavailable(String),
}

/// The job ran and the service reported it as failed
#[derive(Debug, Error)]
#[error("job {handle} failed (state {state})")]
pub struct JobFailedError {
    pub handle: JobHandle,
    pub state: String,
}

/// Any failure of a sequencer run
#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("failed to submit job: {0}")]
    Submission(#[from] SubmissionError),

    #[error("failed to query job status: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    JobFailed(#[from] JobFailedError),

    #[error("job {handle} did not reach a terminal state within {limit:?}")]
    TimedOut { handle: JobHandle, limit: Duration },
}

/// A blob staging operation failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid bucket or key: {0}")]
    InvalidLocation(String),

    #[error("blob store rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("blob store unavailable: {0}")]
    Unavailable(String),

    #[error("blob store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
