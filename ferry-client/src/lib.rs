//! Ferry HTTP Client
//!
//! A small, type-safe HTTP client for the two remote services a segment import
//! talks to: the import job service and the blob staging store.
//!
//! # Example
//!
//! ```no_run
//! use ferry_client::FerryClient;
//! use ferry_core::domain::import::ImportJobRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FerryClient::new("http://localhost:8080");
//!
//!     let job = client
//!         .create_import_job(
//!             "app-1",
//!             &ImportJobRequest::define_segment(
//!                 "s3://segments/imports/endpoints.json",
//!                 "arn:aws:iam::123456789012:role/import",
//!                 "vip",
//!             ),
//!         )
//!         .await?;
//!
//!     println!("Created import job: {}", job.id);
//!     Ok(())
//! }
//! ```

mod blobs;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use ferry_core::dto::import::ImportJobResponse;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the import job service and the blob staging store
///
/// Both services may live behind the same base URL; when they do not, build
/// one client per service.
#[derive(Debug, Clone)]
pub struct FerryClient {
    /// Base URL of the service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl FerryClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use ferry_client::FerryClient;
    ///
    /// let client = FerryClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use ferry_client::FerryClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = FerryClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append path segments to the base URL
    ///
    /// Segments are percent-encoded one by one, so a `/`, `?`, `#` or `%`
    /// inside a segment never changes the path structure.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}
