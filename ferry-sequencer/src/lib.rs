//! Ferry Sequencer
//!
//! Submits an asynchronous remote job, polls it at a fixed interval until it
//! reaches a terminal state and hands back the result.
//!
//! Architecture:
//! - Repository: capability traits for the remote job service and the blob
//!   staging store, with HTTP and local implementations
//! - Scheduler: the [`Sequencer`] submit/poll/run control flow
//! - Workflow: the segment import sequence (stage, submit, wait)
//!
//! The sequencer never retries. Every failure surfaces as a typed error and the
//! caller decides what to do with it.

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod workflow;

pub use config::{SequencerConfig, UnknownStatusPolicy};
pub use error::{JobFailedError, QueryError, SequencerError, StoreError, SubmissionError};
pub use repository::{BlobStore, HttpBlobStore, HttpJobService, JobService, LocalBlobStore};
pub use scheduler::{Sequencer, Sleeper, TokioSleeper};
pub use workflow::{ImportReport, SegmentImport, SegmentImportParams, WorkflowError};
