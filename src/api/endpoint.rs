//! HTTP surface of the projects service.

use std::fmt;

use serde::Serialize;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call the client can make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListProjects,
    CreateProject,
    UpdateProject(i64),
    DeleteProject(i64),
    GenerateProject,
    ListUsers,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::ListProjects | Endpoint::GenerateProject | Endpoint::ListUsers => {
                Method::Get
            }
            Endpoint::CreateProject => Method::Post,
            Endpoint::UpdateProject(_) => Method::Put,
            Endpoint::DeleteProject(_) => Method::Delete,
        }
    }

    /// Path relative to the base URL
    pub fn path(self) -> String {
        match self {
            Endpoint::ListProjects | Endpoint::CreateProject => "/api/projects".to_string(),
            Endpoint::UpdateProject(id) | Endpoint::DeleteProject(id) => {
                format!("/api/projects/{}", id)
            }
            Endpoint::GenerateProject => "/api/generate_project".to_string(),
            Endpoint::ListUsers => "/api/users".to_string(),
        }
    }

    /// Display label for the call panel: `METHOD /path`
    pub fn label(self) -> String {
        format!("{} {}", self.method(), self.path())
    }

    /// Display label with the pretty-printed JSON body on following lines
    pub fn label_with_body<B: Serialize>(self, body: &B) -> String {
        match serde_json::to_string_pretty(body) {
            Ok(json) => format!("{}\n{}", self.label(), json),
            Err(_) => self.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProjectFields;

    #[test]
    fn test_methods_and_paths() {
        let table = [
            (Endpoint::ListProjects, "GET", "/api/projects"),
            (Endpoint::CreateProject, "POST", "/api/projects"),
            (Endpoint::UpdateProject(7), "PUT", "/api/projects/7"),
            (Endpoint::DeleteProject(7), "DELETE", "/api/projects/7"),
            (Endpoint::GenerateProject, "GET", "/api/generate_project"),
            (Endpoint::ListUsers, "GET", "/api/users"),
        ];
        for (endpoint, method, path) in table {
            assert_eq!(endpoint.method().as_str(), method);
            assert_eq!(endpoint.path(), path);
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(Endpoint::DeleteProject(4).label(), "DELETE /api/projects/4");
    }

    #[test]
    fn test_label_with_body() {
        let fields = ProjectFields {
            name: "Solar Array".to_string(),
            location: "Austin".to_string(),
            impact_score: 7.5,
            description: "Rooftop".to_string(),
        };
        let label = Endpoint::CreateProject.label_with_body(&fields);
        let (first, rest) = label.split_once('\n').unwrap();
        assert_eq!(first, "POST /api/projects");
        assert!(rest.starts_with('{'));
        assert!(rest.contains("  \"name\": \"Solar Array\""));
    }

    #[test]
    fn test_reqwest_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
