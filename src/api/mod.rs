//! Client for the energy resiliency projects service.

mod client;
mod endpoint;
pub mod error;
mod types;

pub use client::{resolve_base_url, HttpProjectsClient, DEFAULT_ORIGIN};
pub use endpoint::{Endpoint, Method};
pub use error::{ApiError, FailureKind};
pub use types::{Project, ProjectFields, MAX_IMPACT_SCORE};

use async_trait::async_trait;

/// CRUD operations on the project collection.
///
/// Implemented over HTTP by [`HttpProjectsClient`]; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// All projects, in the order the service returns them
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Create a project and return it with its assigned id
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError>;

    /// Replace every field of project `id`
    async fn update_project(&self, id: i64, fields: &ProjectFields) -> Result<Project, ApiError>;

    async fn delete_project(&self, id: i64) -> Result<(), ApiError>;

    /// Suggested project used to prefill the entry form. Nothing is stored.
    async fn generate_project(&self) -> Result<ProjectFields, ApiError>;

    /// Raw users listing
    async fn list_users(&self) -> Result<Vec<serde_json::Value>, ApiError>;
}
