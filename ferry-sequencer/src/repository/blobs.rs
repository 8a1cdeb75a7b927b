//! Blob staging repository
//!
//! Job payloads are uploaded here before submission. The job service only
//! ever sees the resulting location.

use async_trait::async_trait;
use ferry_client::{ClientError, FerryClient};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

/// Store that holds payloads for the job service to read
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// Uploads `body` to `key` in `bucket`, replacing any previous object
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError>;
}

/// HTTP implementation of BlobStore
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: FerryClient,
}

impl HttpBlobStore {
    pub fn new(client: FerryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        validate_bucket(bucket)?;
        self.client.bucket_exists(bucket).await.map_err(store_error)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        validate_bucket(bucket)?;
        self.client.create_bucket(bucket).await.map_err(store_error)
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        self.client
            .put_object(bucket, key, body)
            .await
            .map_err(store_error)
    }
}

/// BlobStore backed by a local directory
///
/// Each bucket is a directory directly under `root`; keys map to relative
/// paths inside it.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path an object is stored at
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        validate_bucket(bucket)?;
        let exists = tokio::fs::try_exists(self.root.join(bucket)).await?;
        Ok(exists)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        validate_bucket(bucket)?;
        tokio::fs::create_dir_all(self.root.join(bucket)).await?;
        Ok(())
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key)?;
        if !tokio::fs::try_exists(self.root.join(bucket)).await? {
            return Err(StoreError::InvalidLocation(format!(
                "bucket {} does not exist",
                bucket
            )));
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        debug!("Writing {} bytes to {}", body.len(), path.display());
        tokio::fs::write(&path, body).await?;
        Ok(())
    }
}

fn validate_bucket(bucket: &str) -> Result<(), StoreError> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(StoreError::InvalidLocation(format!(
            "invalid bucket name `{}`",
            bucket
        )));
    }
    Ok(())
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let normal = !key.is_empty()
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !normal {
        return Err(StoreError::InvalidLocation(format!("invalid key `{}`", key)));
    }
    Ok(())
}

fn store_error(err: ClientError) -> StoreError {
    let client_error = err.is_client_error();
    match err {
        ClientError::ApiError { status, message } if client_error => {
            StoreError::Rejected { status, message }
        }
        ClientError::InvalidUrl(message) => StoreError::InvalidLocation(message),
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::domain::blob::StagedObject;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_local_store_bucket_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        assert!(!store.bucket_exists("segments").await.unwrap());
        store.create_bucket("segments").await.unwrap();
        assert!(store.bucket_exists("segments").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_store_put_writes_nested_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        store.create_bucket("segments").await.unwrap();

        store
            .put("segments", "imports/endpoints.json", b"[]".to_vec())
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("segments/imports/endpoints.json")).unwrap();
        assert_eq!(written, b"[]");
    }

    #[tokio::test]
    async fn test_local_store_put_requires_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        let err = store
            .put("missing", "imports/endpoints.json", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLocation(_)));
    }

    #[tokio::test]
    async fn test_local_store_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        store.create_bucket("segments").await.unwrap();

        for key in ["../outside.json", "/etc/passwd", "", "imports/../../x"] {
            let err = store.put("segments", key, Vec::new()).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidLocation(_)), "key {key:?}");
        }
        assert!(store.create_bucket("a/b").await.is_err());
    }

    #[tokio::test]
    async fn test_http_store_maps_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/segments/imports/endpoints.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("access denied"))
            .mount(&server)
            .await;

        let store = HttpBlobStore::new(FerryClient::new(server.uri()));
        let err = store
            .put("segments", "imports/endpoints.json", b"[]".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Rejected { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_http_store_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/segments"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = HttpBlobStore::new(FerryClient::new(server.uri()));
        let err = store.bucket_exists("segments").await.unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_http_store_puts_file_name_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/segments/imports/vip%23march%3Fv=2.json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let staged = StagedObject::for_file("segments", "vip#march?v=2.json");
        let store = HttpBlobStore::new(FerryClient::new(server.uri()));
        store.put(&staged.bucket, &staged.key, b"[]".to_vec()).await.unwrap();

        assert_eq!(staged.url(), "s3://segments/imports/vip#march?v=2.json");
    }
}
