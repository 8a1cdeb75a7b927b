//! Staged payload types

use serde::{Deserialize, Serialize};

/// Key prefix under which job payloads are staged
pub const STAGING_PREFIX: &str = "imports/";

/// A payload uploaded to the blob staging store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedObject {
    pub bucket: String,
    pub key: String,
}

impl StagedObject {
    /// Staging location for a file named `file_name` in `bucket`
    pub fn for_file(bucket: impl Into<String>, file_name: &str) -> Self {
        Self {
            bucket: bucket.into(),
            key: format!("{}{}", STAGING_PREFIX, file_name),
        }
    }

    /// URL the job service uses to locate the payload
    pub fn url(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}
