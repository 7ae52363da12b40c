use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::error::ApiError;
use super::types::{Project, ProjectFields};
use super::ProjectsApi;

/// Origin used when the configured base URL is empty ("same origin")
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8050";

/// Normalize a configured base URL: empty means the default origin, and
/// trailing slashes are dropped so endpoint paths can be appended.
pub fn resolve_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_ORIGIN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `reqwest`-backed client for the projects service.
///
/// One request per call. No retries and no client-side timeout.
#[derive(Debug, Clone)]
pub struct HttpProjectsClient {
    client: Client,
    base_url: String,
}

impl HttpProjectsClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: resolve_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Issue the request and reject any non-2xx status
    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<&ProjectFields>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(method = %endpoint.method(), %url, "Sending request");

        let mut request = self.client.request(endpoint.method().into(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %url, "Request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn fetch_json<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&ProjectFields>,
    ) -> Result<R, ApiError> {
        let response = self.send(endpoint, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ProjectsApi for HttpProjectsClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.fetch_json(Endpoint::ListProjects, None).await
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
        self.fetch_json(Endpoint::CreateProject, Some(fields)).await
    }

    async fn update_project(&self, id: i64, fields: &ProjectFields) -> Result<Project, ApiError> {
        self.fetch_json(Endpoint::UpdateProject(id), Some(fields))
            .await
    }

    async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        self.send(Endpoint::DeleteProject(id), None).await?;
        Ok(())
    }

    async fn generate_project(&self) -> Result<ProjectFields, ApiError> {
        self.fetch_json(Endpoint::GenerateProject, None).await
    }

    async fn list_users(&self) -> Result<Vec<serde_json::Value>, ApiError> {
        self.fetch_json(Endpoint::ListUsers, None).await
    }
}
