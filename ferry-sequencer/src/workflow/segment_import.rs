//! Segment import workflow
//!
//! Creates a segment from a local endpoints file:
//! 1. Make sure the staging bucket exists, creating it if needed
//! 2. Upload the file to `imports/<file name>` in that bucket
//! 3. Submit an import job that registers the endpoints and defines the segment
//! 4. Wait for the job to finish

use ferry_core::domain::blob::StagedObject;
use ferry_core::domain::import::ImportJobRequest;
use ferry_core::domain::job::{JobHandle, JobResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::error::{SequencerError, StoreError};
use crate::repository::{BlobStore, JobService};
use crate::scheduler::{Sequencer, Sleeper, TokioSleeper};

/// Errors raised by the segment import workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read endpoints file {}: {source}", .path.display())]
    ReadEndpoints {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("endpoints path has no file name: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to stage endpoints file: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

/// Inputs of one segment import
#[derive(Debug, Clone)]
pub struct SegmentImportParams {
    /// Local JSON file with the endpoint definitions
    pub endpoints_path: PathBuf,
    /// Bucket the file is staged in
    pub bucket: String,
    /// Role the job service assumes to read the bucket
    pub role_arn: String,
    /// Name of the segment to create or update
    pub segment_name: String,
}

/// Outcome of a successful import
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub staged: StagedObject,
    pub bucket_created: bool,
    pub result: JobResult,
}

impl ImportReport {
    pub fn handle(&self) -> &JobHandle {
        &self.result.handle
    }
}

/// Stage-then-import sequence over a blob store and an import job service
pub struct SegmentImport<S, P = TokioSleeper> {
    store: Arc<dyn BlobStore>,
    sequencer: Sequencer<S, P>,
}

impl<S, P> SegmentImport<S, P>
where
    S: JobService<Request = ImportJobRequest>,
    P: Sleeper,
{
    pub fn new(store: Arc<dyn BlobStore>, sequencer: Sequencer<S, P>) -> Self {
        Self { store, sequencer }
    }

    pub fn sequencer(&self) -> &Sequencer<S, P> {
        &self.sequencer
    }

    /// Runs the whole import, polling at the sequencer's configured interval
    pub async fn execute(&self, params: &SegmentImportParams) -> Result<ImportReport, WorkflowError> {
        let (staged, bucket_created) = self.stage(&params.endpoints_path, &params.bucket).await?;

        let request = ImportJobRequest::define_segment(
            staged.url(),
            params.role_arn.clone(),
            params.segment_name.clone(),
        );

        info!(
            "Creating segment {} with the endpoints in {}",
            params.segment_name, staged.key
        );

        let interval = self.sequencer.config().poll_interval;
        let result = self.sequencer.run(&request, interval).await?;

        info!("Finished importing segment {}", params.segment_name);

        Ok(ImportReport {
            staged,
            bucket_created,
            result,
        })
    }

    /// Uploads the endpoints file, returning where it landed and whether the
    /// bucket had to be created
    pub async fn stage(
        &self,
        endpoints_path: &Path,
        bucket: &str,
    ) -> Result<(StagedObject, bool), WorkflowError> {
        let file_name = endpoints_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| WorkflowError::InvalidPath(endpoints_path.to_path_buf()))?;

        let body = tokio::fs::read(endpoints_path)
            .await
            .map_err(|source| WorkflowError::ReadEndpoints {
                path: endpoints_path.to_path_buf(),
                source,
            })?;

        let mut bucket_created = false;
        if !self.store.bucket_exists(bucket).await? {
            self.store.create_bucket(bucket).await?;
            bucket_created = true;
            info!("Created bucket {}", bucket);
        }

        let staged = StagedObject::for_file(bucket, file_name);
        info!("Uploading {} to bucket {}", file_name, bucket);
        self.store.put(bucket, &staged.key, body).await?;
        info!("Finished uploading {}", staged.url());

        Ok((staged, bucket_created))
    }
}
