//! Configuration module
//!
//! Where the job service and the blob staging store live, plus the sequencer
//! settings read from the environment.

use ferry_sequencer::SequencerConfig;
use std::path::PathBuf;

/// Where staged payloads are uploaded
#[derive(Debug, Clone)]
pub enum StoreTarget {
    /// Blob store reached over HTTP
    Http(String),
    /// Directory on the local filesystem
    Local(PathBuf),
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the import job service
    pub service_url: String,

    pub store: StoreTarget,

    /// Sequencer defaults, before per-command overrides
    pub sequencer: SequencerConfig,
}
