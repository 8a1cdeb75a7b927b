//! Job service repository
//!
//! Handles communication with the remote job service:
//! - Creating a job from a request
//! - Reading the current state of a job

use async_trait::async_trait;
use ferry_client::{ClientError, FerryClient};
use ferry_core::domain::import::ImportJobRequest;
use ferry_core::domain::job::{JobHandle, JobSnapshot};

use crate::error::{QueryError, SubmissionError};

/// Remote service that runs asynchronous jobs
#[async_trait]
pub trait JobService: Send + Sync {
    /// What a job is created from
    type Request: Send + Sync;

    /// Creates a job and returns the handle used to query it
    async fn create_job(&self, request: &Self::Request) -> Result<JobHandle, SubmissionError>;

    /// Reads the current state of a job
    async fn get_job(&self, handle: &JobHandle) -> Result<JobSnapshot, QueryError>;
}

/// HTTP implementation of JobService for import jobs of one application
#[derive(Debug, Clone)]
pub struct HttpJobService {
    client: FerryClient,
    application_id: String,
}

impl HttpJobService {
    /// Creates a new HTTP job service
    ///
    /// # Arguments
    /// * `client` - Client pointed at the job service
    /// * `application_id` - Application that receives the imported endpoints
    pub fn new(client: FerryClient, application_id: impl Into<String>) -> Self {
        Self {
            client,
            application_id: application_id.into(),
        }
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }
}

#[async_trait]
impl JobService for HttpJobService {
    type Request = ImportJobRequest;

    async fn create_job(&self, request: &ImportJobRequest) -> Result<JobHandle, SubmissionError> {
        let response = self
            .client
            .create_import_job(&self.application_id, request)
            .await
            .map_err(submission_error)?;

        Ok(JobHandle::new(response.id))
    }

    async fn get_job(&self, handle: &JobHandle) -> Result<JobSnapshot, QueryError> {
        let response = self
            .client
            .get_import_job(&self.application_id, handle.as_str())
            .await
            .map_err(|e| query_error(handle, e))?;

        Ok(response.into())
    }
}

fn submission_error(err: ClientError) -> SubmissionError {
    if err.is_server_error() {
        return SubmissionError::Unavailable(err.to_string());
    }
    match err {
        ClientError::ApiError { status, message } => match status {
            400 | 422 => SubmissionError::InvalidRequest(message),
            401 | 403 => SubmissionError::PermissionDenied(message),
            404 => SubmissionError::NotFound(message),
            _ => SubmissionError::Rejected { status, message },
        },
        ClientError::InvalidUrl(message) => SubmissionError::InvalidRequest(message),
        other => SubmissionError::Unavailable(other.to_string()),
    }
}

fn query_error(handle: &JobHandle, err: ClientError) -> QueryError {
    if err.is_not_found() {
        return QueryError::UnknownHandle(handle.clone());
    }
    let client_error = err.is_client_error();
    match err {
        ClientError::ApiError { status, message } if client_error => {
            QueryError::Rejected { status, message }
        }
        other => QueryError::Unavailable(other.to_string()),
    }
}
