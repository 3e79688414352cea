use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The shared construction job that scopes all other entities.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl NewProject {
    #[must_use]
    pub fn new(name: String, address: String, description: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectMember {
    pub project_id: i32,
    pub user_id: i32,
}
