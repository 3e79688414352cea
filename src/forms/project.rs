use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, UpdateProject};

#[derive(Deserialize, Validate)]
/// Form data for creating a project.
pub struct AddProjectForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub description: Option<String>,
}

impl From<&AddProjectForm> for NewProject {
    fn from(form: &AddProjectForm) -> Self {
        NewProject::new(
            form.name.clone(),
            form.address.clone(),
            form.description.clone(),
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing project.
pub struct SaveProjectForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub description: Option<String>,
}

impl From<&SaveProjectForm> for UpdateProject {
    fn from(form: &SaveProjectForm) -> Self {
        UpdateProject {
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            description: form
                .description
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
