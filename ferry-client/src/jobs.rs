//! Import job endpoints

use crate::FerryClient;
use crate::error::Result;
use ferry_core::domain::import::ImportJobRequest;
use ferry_core::dto::import::ImportJobResponse;
use tracing::debug;

impl FerryClient {
    /// Create an import job in an application
    ///
    /// # Arguments
    /// * `application_id` - The application to import endpoints into
    /// * `req` - The import job definition
    ///
    /// # Returns
    /// The created job, including the identifier used to query it later
    pub async fn create_import_job(
        &self,
        application_id: &str,
        req: &ImportJobRequest,
    ) -> Result<ImportJobResponse> {
        let url = self.endpoint(["v1", "apps", application_id, "jobs", "import"])?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get an import job by ID
    ///
    /// # Arguments
    /// * `application_id` - The application the job belongs to
    /// * `job_id` - The job identifier returned on creation
    pub async fn get_import_job(
        &self,
        application_id: &str,
        job_id: &str,
    ) -> Result<ImportJobResponse> {
        let url = self.endpoint(["v1", "apps", application_id, "jobs", "import", job_id])?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ImportJobRequest {
        ImportJobRequest::define_segment(
            "s3://segments/imports/endpoints.json",
            "arn:aws:iam::123456789012:role/import",
            "vip",
        )
    }

    #[tokio::test]
    async fn test_create_import_job_posts_definition() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/apps/app-1/jobs/import"))
            .and(body_partial_json(json!({
                "S3Url": "s3://segments/imports/endpoints.json",
                "DefineSegment": true,
                "SegmentName": "vip"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "Id": "job-1",
                "ApplicationId": "app-1",
                "JobStatus": "CREATED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FerryClient::new(server.uri());
        let job = client.create_import_job("app-1", &request()).await.unwrap();

        assert_eq!(job.id, "job-1");
        assert_eq!(job.job_status, "CREATED");
    }

    #[tokio::test]
    async fn test_create_import_job_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/apps/app-1/jobs/import"))
            .respond_with(ResponseTemplate::new(403).set_body_string("role not assumable"))
            .mount(&server)
            .await;

        let client = FerryClient::new(server.uri());
        let err = client
            .create_import_job("app-1", &request())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("role not assumable"));
    }

    #[tokio::test]
    async fn test_get_import_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps/app-1/jobs/import/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Id": "job-1",
                "JobStatus": "COMPLETED",
                "Failures": ["row 2: bad channel"],
                "TotalProcessed": 4
            })))
            .mount(&server)
            .await;

        let client = FerryClient::new(server.uri());
        let job = client.get_import_job("app-1", "job-1").await.unwrap();

        assert_eq!(job.job_status, "COMPLETED");
        assert_eq!(job.failures, Some(vec!["row 2: bad channel".to_string()]));
        assert_eq!(job.total_processed, Some(4));
    }

    #[tokio::test]
    async fn test_get_import_job_encodes_identifiers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps/app%201/jobs/import/job%2F1%23a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Id": "job/1#a",
                "JobStatus": "PROCESSING"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FerryClient::new(server.uri());
        let job = client.get_import_job("app 1", "job/1#a").await.unwrap();

        assert_eq!(job.id, "job/1#a");
    }

    #[tokio::test]
    async fn test_get_import_job_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/apps/app-1/jobs/import/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = FerryClient::new(server.uri());
        let err = client.get_import_job("app-1", "job-1").await.unwrap_err();

        assert!(matches!(err, crate::ClientError::ParseError(_)));
    }
}
