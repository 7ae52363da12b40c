//! In-process fake of the projects service for integration tests.
//!
//! Binds an ephemeral port on 127.0.0.1 and serves the same routes as the
//! real backend, backed by an in-memory list. Faults can be switched on to
//! exercise error classification.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use resiliency_flow::api::{Project, ProjectFields};

/// Fault injected into every route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Respond with this status and a text body
    Status(u16),
    /// Respond 200 with a body that is not JSON
    Malformed,
}

#[derive(Default)]
struct Store {
    projects: Vec<Project>,
    next_id: i64,
    fault: Option<Fault>,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeService {
    store: Arc<Mutex<Store>>,
}

impl FakeService {
    pub fn set_fault(&self, fault: Option<Fault>) {
        self.store.lock().unwrap().fault = fault;
    }

    pub fn projects(&self) -> Vec<Project> {
        self.store.lock().unwrap().projects.clone()
    }

    /// `METHOD /path` of every request received, in order
    pub fn requests(&self) -> Vec<String> {
        self.store.lock().unwrap().requests.clone()
    }

    /// Record the request and return the injected fault response, if any
    fn check(&self, request: String) -> Option<Response> {
        let mut store = self.store.lock().unwrap();
        store.requests.push(request);
        match store.fault? {
            Fault::Status(code) => {
                let status =
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Some((status, "injected failure").into_response())
            }
            Fault::Malformed => Some((StatusCode::OK, "<html>not json</html>").into_response()),
        }
    }
}

/// Sample rows matching the reference backend's seed data
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Solar Microgrid Upgrade".to_string(),
            location: "Dallas, TX".to_string(),
            impact_score: 8.7,
            description: "Solar microgrid installation for Tier 3 data center, reducing grid dependency and improving uptime.".to_string(),
        },
        Project {
            id: 2,
            name: "Battery Storage Expansion".to_string(),
            location: "Ashburn, VA".to_string(),
            impact_score: 9.2,
            description: "Lithium-ion battery storage for backup power.".to_string(),
        },
        Project {
            id: 3,
            name: "Wind Power Integration".to_string(),
            location: "Des Moines, IA".to_string(),
            impact_score: 7.5,
            description: "Wind turbines supplementing grid energy.".to_string(),
        },
    ]
}

/// The project the fake's generate endpoint suggests
pub fn generated_fields() -> ProjectFields {
    ProjectFields {
        name: "Fuel Cell Backup".to_string(),
        location: "San Jose, CA".to_string(),
        impact_score: 6.8,
        description: "Hydrogen fuel cell backup for critical loads.".to_string(),
    }
}

/// Start the fake; returns its base URL and a handle for inspection
pub async fn spawn(initial: Vec<Project>) -> (String, FakeService) {
    let service = FakeService::default();
    {
        let mut store = service.store.lock().unwrap();
        store.next_id = initial.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        store.projects = initial;
    }

    let router = Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/:id",
            axum::routing::put(update_project).delete(delete_project),
        )
        .route("/api/generate_project", get(generate_project))
        .route("/api/users", get(list_users))
        .with_state(service.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), service)
}

async fn list_projects(State(service): State<FakeService>) -> Response {
    if let Some(fault) = service.check("GET /api/projects".to_string()) {
        return fault;
    }
    Json(service.projects()).into_response()
}

async fn create_project(
    State(service): State<FakeService>,
    Json(fields): Json<ProjectFields>,
) -> Response {
    if let Some(fault) = service.check("POST /api/projects".to_string()) {
        return fault;
    }
    let mut store = service.store.lock().unwrap();
    let project = fields.with_id(store.next_id);
    store.next_id += 1;
    store.projects.push(project.clone());
    (StatusCode::CREATED, Json(project)).into_response()
}

async fn update_project(
    State(service): State<FakeService>,
    Path(id): Path<i64>,
    Json(fields): Json<ProjectFields>,
) -> Response {
    if let Some(fault) = service.check(format!("PUT /api/projects/{}", id)) {
        return fault;
    }
    let mut store = service.store.lock().unwrap();
    let project = fields.with_id(id);
    match store.projects.iter_mut().find(|p| p.id == id) {
        Some(existing) => {
            *existing = project.clone();
            Json(project).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such project").into_response(),
    }
}

async fn delete_project(State(service): State<FakeService>, Path(id): Path<i64>) -> Response {
    if let Some(fault) = service.check(format!("DELETE /api/projects/{}", id)) {
        return fault;
    }
    let mut store = service.store.lock().unwrap();
    let before = store.projects.len();
    store.projects.retain(|p| p.id != id);
    if store.projects.len() == before {
        (StatusCode::NOT_FOUND, "no such project").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn generate_project(State(service): State<FakeService>) -> Response {
    if let Some(fault) = service.check("GET /api/generate_project".to_string()) {
        return fault;
    }
    Json(generated_fields()).into_response()
}

async fn list_users(State(service): State<FakeService>) -> Response {
    if let Some(fault) = service.check("GET /api/users".to_string()) {
        return fault;
    }
    Json(json!([
        { "id": 1, "name": "Ada", "role": "planner" },
        { "id": 2, "name": "Grace", "role": "engineer" }
    ]))
    .into_response()
}
