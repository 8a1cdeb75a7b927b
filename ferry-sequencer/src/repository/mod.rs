//! Repository layer
//!
//! Capabilities the sequencer and the import workflow depend on. Each one is a
//! trait so that tests can substitute fakes for the network.

mod blobs;
mod jobs;

// Re-export traits
pub use blobs::BlobStore;
pub use jobs::JobService;

// Re-export implementations
pub use blobs::{HttpBlobStore, LocalBlobStore};
pub use jobs::HttpJobService;
