use serde::{Deserialize, Serialize};

/// Highest impact score the form accepts
pub const MAX_IMPACT_SCORE: f64 = 10.0;

/// A project record as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the service on create
    pub id: i64,
    pub name: String,
    pub location: String,
    /// Resiliency impact, 0 to 10
    pub impact_score: f64,
    pub description: String,
}

impl Project {
    /// Editable fields, without the id
    pub fn fields(&self) -> ProjectFields {
        ProjectFields {
            name: self.name.clone(),
            location: self.location.clone(),
            impact_score: self.impact_score,
            description: self.description.clone(),
        }
    }
}

/// Project body sent on create and update, and returned by generate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectFields {
    pub name: String,
    pub location: String,
    pub impact_score: f64,
    pub description: String,
}

impl ProjectFields {
    /// Attach a server-assigned id
    pub fn with_id(self, id: i64) -> Project {
        Project {
            id,
            name: self.name,
            location: self.location,
            impact_score: self.impact_score,
            description: self.description,
        }
    }

    /// Check the same constraints the entry form enforces
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("Location is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if !(0.0..=MAX_IMPACT_SCORE).contains(&self.impact_score) {
            return Err(format!(
                "Impact score must be between 0 and {}",
                MAX_IMPACT_SCORE
            ));
        }
        Ok(())
    }
}
