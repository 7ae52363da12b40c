//! User-triggered operations and how each one runs through the flow.
//!
//! The TUI and the CLI subcommands share these so both show the same call
//! labels and traverse the same steps.

use crate::api::{ApiError, Endpoint, Project, ProjectFields, ProjectsApi};
use crate::flow::{FlowError, FlowSequencer, Step};

/// One action that triggers a flow run
#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    Load,
    Create(ProjectFields),
    Update(i64, ProjectFields),
    Delete(i64),
    Generate,
}

/// What a successful action produced
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Fresh project list (load, or a write followed by a reload)
    Projects(Vec<Project>),
    /// Suggested values for the form
    Generated(ProjectFields),
}

impl FlowAction {
    /// Every action does its work at the database step
    pub const MIDPOINT: Step = Step::Db;

    pub fn endpoint(&self) -> Endpoint {
        match self {
            FlowAction::Load => Endpoint::ListProjects,
            FlowAction::Create(_) => Endpoint::CreateProject,
            FlowAction::Update(id, _) => Endpoint::UpdateProject(*id),
            FlowAction::Delete(id) => Endpoint::DeleteProject(*id),
            FlowAction::Generate => Endpoint::GenerateProject,
        }
    }

    /// Label shown in the call panel, with the request body for writes
    pub fn call_label(&self) -> String {
        match self {
            FlowAction::Create(fields) | FlowAction::Update(_, fields) => {
                self.endpoint().label_with_body(fields)
            }
            _ => self.endpoint().label(),
        }
    }

    /// Perform the HTTP work. Writes reload the list afterwards.
    pub async fn execute(&self, api: &dyn ProjectsApi) -> Result<FlowOutcome, ApiError> {
        match self {
            FlowAction::Load => {}
            FlowAction::Create(fields) => {
                let created = api.create_project(fields).await?;
                tracing::info!(id = created.id, name = %created.name, "Project created");
            }
            FlowAction::Update(id, fields) => {
                api.update_project(*id, fields).await?;
                tracing::info!(id, "Project updated");
            }
            FlowAction::Delete(id) => {
                api.delete_project(*id).await?;
                tracing::info!(id, "Project deleted");
            }
            FlowAction::Generate => {
                return Ok(FlowOutcome::Generated(api.generate_project().await?));
            }
        }
        Ok(FlowOutcome::Projects(api.list_projects().await?))
    }
}

/// Run `action` through `sequencer`
pub async fn run_action(
    sequencer: &mut FlowSequencer,
    api: &dyn ProjectsApi,
    action: &FlowAction,
) -> Result<FlowOutcome, FlowError> {
    sequencer
        .run(FlowAction::MIDPOINT, Some(action.call_label()), || {
            action.execute(api)
        })
        .await
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `ProjectsApi` for unit tests.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::{ApiError, Project, ProjectFields, ProjectsApi};

    #[derive(Default)]
    pub struct StubApi {
        pub projects: Mutex<Vec<Project>>,
        pub calls: Mutex<Vec<String>>,
        /// Status returned by every call when set
        pub fail_status: Option<u16>,
    }

    impl StubApi {
        pub fn with_projects(projects: Vec<Project>) -> Self {
            Self {
                projects: Mutex::new(projects),
                ..Default::default()
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                fail_status: Some(status),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call.to_string());
            match self.fail_status {
                Some(status) => Err(ApiError::Status {
                    status,
                    body: "stub failure".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    pub fn sample_fields() -> ProjectFields {
        ProjectFields {
            name: "Solar Array".to_string(),
            location: "Austin, TX".to_string(),
            impact_score: 7.5,
            description: "Rooftop array".to_string(),
        }
    }

    #[async_trait]
    impl ProjectsApi for StubApi {
        async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
            self.record("list")?;
            Ok(self.projects.lock().unwrap().clone())
        }

        async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
            self.record("create")?;
            let mut projects = self.projects.lock().unwrap();
            let id = projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let project = fields.clone().with_id(id);
            projects.push(project.clone());
            Ok(project)
        }

        async fn update_project(&self, id: i64, fields: &ProjectFields) -> Result<Project, ApiError> {
            self.record("update")?;
            let mut projects = self.projects.lock().unwrap();
            let project = fields.clone().with_id(id);
            if let Some(existing) = projects.iter_mut().find(|p| p.id == id) {
                *existing = project.clone();
            }
            Ok(project)
        }

        async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
            self.record("delete")?;
            self.projects.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }

        async fn generate_project(&self) -> Result<ProjectFields, ApiError> {
            self.record("generate")?;
            Ok(sample_fields())
        }

        async fn list_users(&self) -> Result<Vec<serde_json::Value>, ApiError> {
            self.record("users")?;
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{sample_fields, StubApi};
    use super::*;
    use crate::flow::FlowPacing;

    #[test]
    fn test_call_labels() {
        assert_eq!(FlowAction::Load.call_label(), "GET /api/projects");
        assert_eq!(FlowAction::Delete(3).call_label(), "DELETE /api/projects/3");
        assert_eq!(FlowAction::Generate.call_label(), "GET /api/generate_project");

        let label = FlowAction::Update(2, sample_fields()).call_label();
        assert!(label.starts_with("PUT /api/projects/2\n{"));
        assert!(label.contains("\"name\": \"Solar Array\""));
    }

    #[tokio::test]
    async fn test_create_reloads_list() {
        let api = StubApi::default();
        let mut seq = FlowSequencer::new(FlowPacing::instant());

        let outcome = run_action(&mut seq, &api, &FlowAction::Create(sample_fields()))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["create", "list"]);
        match outcome {
            FlowOutcome::Projects(projects) => {
                assert_eq!(projects.len(), 1);
                assert_eq!(projects[0].name, "Solar Array");
            }
            other => panic!("Expected projects, got {:?}", other),
        }
        let state = seq.snapshot();
        assert!(state.last_call.unwrap().starts_with("POST /api/projects\n"));
    }

    #[tokio::test]
    async fn test_generate_does_not_reload() {
        let api = StubApi::default();
        let mut seq = FlowSequencer::new(FlowPacing::instant());

        let outcome = run_action(&mut seq, &api, &FlowAction::Generate)
            .await
            .unwrap();
        assert_eq!(outcome, FlowOutcome::Generated(sample_fields()));
        assert_eq!(api.calls(), vec!["generate"]);
    }

    #[tokio::test]
    async fn test_failed_delete_skips_reload() {
        let api = StubApi::failing(500);
        let mut seq = FlowSequencer::new(FlowPacing::instant());

        let err = run_action(&mut seq, &api, &FlowAction::Delete(1))
            .await
            .unwrap_err();
        assert_eq!(err.step(), Step::Db);
        assert_eq!(err.api_error().status(), Some(500));
        assert_eq!(api.calls(), vec!["delete"]);
    }
}
