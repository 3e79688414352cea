use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::project::{
    NewProject as DomainNewProject, Project as DomainProject, ProjectMember as DomainProjectMember,
    UpdateProject as DomainUpdateProject,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::projects)]
/// Diesel model for [`crate::domain::project::Project`].
pub struct Project {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
pub struct UpdateProject<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::project_members)]
pub struct ProjectMember {
    pub project_id: i32,
    pub user_id: i32,
}

impl From<Project> for DomainProject {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            address: project.address,
            description: project.description,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProject> for NewProject<'a> {
    fn from(project: &'a DomainNewProject) -> Self {
        Self {
            name: project.name.as_str(),
            address: project.address.as_str(),
            description: project.description.as_deref(),
        }
    }
}

impl From<ProjectMember> for DomainProjectMember {
    fn from(member: ProjectMember) -> Self {
        Self {
            project_id: member.project_id,
            user_id: member.user_id,
        }
    }
}

impl<'a> UpdateProject<'a> {
    /// Builds a changeset stamping `updated_at` with the given time.
    pub fn from_domain(updates: &'a DomainUpdateProject, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_str(),
            address: updates.address.as_str(),
            description: updates.description.as_deref(),
            updated_at,
        }
    }
}
