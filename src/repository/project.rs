use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;

use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProjectReader, ProjectWriter};

impl ProjectReader for DieselRepository {
    fn get_project_by_id(&self, id: i32) -> RepositoryResult<Option<Project>> {
        use crate::models::project::Project as DbProject;
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let project = projects::table
            .find(id)
            .first::<DbProject>(&mut conn)
            .optional()?;

        Ok(project.map(Into::into))
    }

    fn list_all_projects(&self) -> RepositoryResult<Vec<Project>> {
        use crate::models::project::Project as DbProject;
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let projects = projects::table
            .order(projects::created_at.desc())
            .load::<DbProject>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(projects)
    }

    fn list_projects_for_user(&self, user_id: i32) -> RepositoryResult<Vec<Project>> {
        use crate::models::project::Project as DbProject;
        use crate::schema::{project_members, projects};

        let mut conn = self.conn()?;
        let projects = projects::table
            .inner_join(project_members::table)
            .filter(project_members::user_id.eq(user_id))
            .order(projects::created_at.desc())
            .select(projects::all_columns)
            .load::<DbProject>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(projects)
    }

    fn is_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<bool> {
        use crate::schema::project_members;

        let mut conn = self.conn()?;
        let member = diesel::select(exists(
            project_members::table
                .filter(project_members::project_id.eq(project_id))
                .filter(project_members::user_id.eq(user_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(member)
    }
}

impl ProjectWriter for DieselRepository {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project> {
        use crate::models::project::{NewProject as DbNewProject, Project as DbProject};
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let insertable: DbNewProject = new_project.into();
        let created = diesel::insert_into(projects::table)
            .values(&insertable)
            .get_result::<DbProject>(&mut conn)?;

        Ok(created.into())
    }

    fn update_project(
        &self,
        project_id: i32,
        updates: &UpdateProject,
    ) -> RepositoryResult<Project> {
        use crate::models::project::{Project as DbProject, UpdateProject as DbUpdateProject};
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProject::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(projects::table.find(project_id))
            .set(&db_updates)
            .get_result::<DbProject>(&mut conn)?;

        Ok(updated.into())
    }

    fn add_project_member(&self, project_id: i32, user_id: i32) -> RepositoryResult<usize> {
        use crate::models::project::ProjectMember as DbProjectMember;
        use crate::schema::project_members;

        let mut conn = self.conn()?;
        let affected = diesel::insert_into(project_members::table)
            .values(&DbProjectMember {
                project_id,
                user_id,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(affected)
    }
}
