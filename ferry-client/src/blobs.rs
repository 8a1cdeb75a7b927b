//! Blob staging store endpoints
//!
//! Buckets and objects are addressed path-style: `/{bucket}` and
//! `/{bucket}/{key}`.

use crate::FerryClient;
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use tracing::debug;

impl FerryClient {
    /// Check whether a bucket exists
    ///
    /// Returns `Ok(false)` when the store answers 404.
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let url = self.endpoint([bucket])?;
        debug!("HEAD {}", url);
        let response = self.client.head(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(ClientError::api_error(
                status.as_u16(),
                format!("Failed to check bucket {}", bucket),
            )),
        }
    }

    /// Create a bucket
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        let url = self.endpoint([bucket])?;
        debug!("PUT {}", url);
        let response = self.client.put(url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Upload an object
    ///
    /// # Arguments
    /// * `bucket` - Destination bucket
    /// * `key` - Destination key (e.g., "imports/endpoints.json"); `/` separates
    ///   path segments, every other character is sent percent-encoded
    /// * `body` - Object contents
    pub async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let url = self.endpoint(std::iter::once(bucket).chain(key.split('/')))?;
        debug!("PUT {} ({} bytes)", url, body.len());
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
