//! Job sequencer
//!
//! Submits a job once, then queries it at a fixed interval until the service
//! reports a terminal state. There is no backoff and no retry: a failed query
//! ends the run.

use async_trait::async_trait;
use ferry_core::domain::job::{JobHandle, JobResult, JobSnapshot, JobStatus};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{SequencerConfig, UnknownStatusPolicy};
use crate::error::{JobFailedError, QueryError, SequencerError, SubmissionError};
use crate::repository::JobService;

/// Waits between two status queries
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Submit-then-poll control flow over a [`JobService`]
///
/// Each run owns its handle and loop; sequencers share no state, so many runs
/// can proceed concurrently on one runtime.
pub struct Sequencer<S, P = TokioSleeper> {
    service: S,
    sleeper: P,
    config: SequencerConfig,
}

impl<S: JobService> Sequencer<S, TokioSleeper> {
    pub fn new(service: S, config: SequencerConfig) -> Self {
        Self::with_sleeper(service, TokioSleeper, config)
    }
}

impl<S: JobService, P: Sleeper> Sequencer<S, P> {
    pub fn with_sleeper(service: S, sleeper: P, config: SequencerConfig) -> Self {
        Self {
            service,
            sleeper,
            config,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sleeper(&self) -> &P {
        &self.sleeper
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Creates the remote job
    pub async fn submit(&self, request: &S::Request) -> Result<JobHandle, SubmissionError> {
        let handle = self.service.create_job(request).await?;
        info!("Submitted job {}", handle);
        Ok(handle)
    }

    /// Queries the current status of a job
    pub async fn poll(&self, handle: &JobHandle) -> Result<JobStatus, QueryError> {
        let (status, _) = self.observe(handle).await?;
        Ok(status)
    }

    /// Submits `request` and waits for the job to finish
    ///
    /// Returns the job's result when it succeeds, even if the result lists
    /// failed entries. A job that fails ends the run with
    /// [`SequencerError::JobFailed`] without reading anything else.
    pub async fn run(
        &self,
        request: &S::Request,
        interval: Duration,
    ) -> Result<JobResult, SequencerError> {
        let handle = self.submit(request).await?;
        self.run_existing(handle, interval).await
    }

    /// Waits for an already submitted job to finish
    pub async fn run_existing(
        &self,
        handle: JobHandle,
        interval: Duration,
    ) -> Result<JobResult, SequencerError> {
        match self.config.timeout {
            None => self.wait(&handle, interval).await,
            Some(limit) => match tokio::time::timeout(limit, self.wait(&handle, interval)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Job {} still running after {:?}, giving up", handle, limit);
                    Err(SequencerError::TimedOut { handle, limit })
                }
            },
        }
    }

    async fn wait(&self, handle: &JobHandle, interval: Duration) -> Result<JobResult, SequencerError> {
        loop {
            let (status, snapshot) = self.observe(handle).await?;

            match status {
                JobStatus::Succeeded => {
                    let result = JobResult::from(snapshot);
                    info!(
                        "Job {} completed ({} failed entries)",
                        handle,
                        result.failures.len()
                    );
                    return Ok(result);
                }
                JobStatus::Failed => {
                    return Err(JobFailedError {
                        handle: handle.clone(),
                        state: snapshot.state,
                    }
                    .into());
                }
                JobStatus::Running => self.sleeper.sleep(interval).await,
            }
        }
    }

    /// Reads a snapshot and classifies it according to the unknown status policy
    async fn observe(&self, handle: &JobHandle) -> Result<(JobStatus, JobSnapshot), QueryError> {
        let snapshot = self.service.get_job(handle).await?;
        info!("Job {} {} . . .", handle, snapshot.state.to_lowercase());

        let status = match (snapshot.status, self.config.unknown_status) {
            (Some(status), _) => status,
            (None, UnknownStatusPolicy::Running) => {
                warn!(
                    "Job {} reported unrecognized state {}, treating it as running",
                    handle, snapshot.state
                );
                JobStatus::Running
            }
            (None, UnknownStatusPolicy::Strict) => {
                return Err(QueryError::UnrecognizedStatus {
                    handle: handle.clone(),
                    state: snapshot.state,
                });
            }
        };

        debug!("Job {} classified as {}", handle, status);
        Ok((status, snapshot))
    }
}
