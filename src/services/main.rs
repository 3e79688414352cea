use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::project::Project;
use crate::domain::user::UserRole;
use crate::dto::main::{DashboardPageData, IndexPageData};
use crate::forms::project::{AddProjectForm, SaveProjectForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter, ProjectReader, ProjectWriter};
use crate::services::activity::record_activity;
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

/// Returns `Ok` when the user may see the project: admins always, everyone
/// else only as a member.
pub fn ensure_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
) -> ServiceResult<()>
where
    R: ProjectReader + ?Sized,
{
    if user.role == UserRole::Admin {
        return Ok(());
    }
    if repo.is_project_member(project_id, user.sub)? {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Loads the project list for the index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    selected: Option<i32>,
) -> ServiceResult<IndexPageData>
where
    R: ProjectReader + ?Sized,
{
    let projects = if user.role == UserRole::Admin {
        repo.list_all_projects()?
    } else {
        repo.list_projects_for_user(user.sub)?
    };

    Ok(IndexPageData { projects, selected })
}

/// Resolves a project for selection, enforcing membership.
pub fn select_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let project = repo
        .get_project_by_id(project_id)?
        .ok_or(ServiceError::NotFound)?;
    ensure_member(repo, user, project_id)?;
    Ok(project)
}

/// Creates a project and enrolls the creator as its first member.
pub fn add_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectWriter + ActivityWriter + ?Sized,
{
    if !user.role.can_approve() {
        return Err(ServiceError::Unauthorized);
    }

    form.validate()
        .map_err(|_| ServiceError::Form("Project name and address are required".to_string()))?;

    let project = repo.create_project(&form.into())?;
    repo.add_project_member(project.id, user.sub)?;

    record_activity(
        repo,
        NewActivity::new(
            project.id,
            user.sub,
            ActivityEntity::Project,
            ActivityAction::Created,
            json!({ "name": &project.name }),
        ),
    );

    Ok(project)
}

/// Applies edits to the project record.
pub fn save_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectReader + ProjectWriter + ActivityWriter + ?Sized,
{
    ensure_member(repo, user, form.id)?;

    form.validate()
        .map_err(|_| ServiceError::Form("Project name and address are required".to_string()))?;

    let project = repo.update_project(form.id, &form.into())?;

    record_activity(
        repo,
        NewActivity::new(
            project.id,
            user.sub,
            ActivityEntity::Project,
            ActivityAction::Updated,
            json!({ "name": &project.name }),
        ),
    );

    Ok(project)
}

/// Loads the dashboard for the selected project: its record plus the paginated
/// activity feed.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    page: usize,
) -> ServiceResult<DashboardPageData>
where
    R: ProjectReader + ActivityReader + ?Sized,
{
    ensure_member(repo, user, project_id)?;

    let project = repo
        .get_project_by_id(project_id)?
        .ok_or(ServiceError::NotFound)?;

    let (total_activity, activity) = repo.list_activities(
        ActivityListQuery::new(project_id).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    )?;

    let total_pages = total_activity.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let activity = Paginated::new(activity, page, total_pages);

    Ok(DashboardPageData {
        project,
        activity,
        total_activity,
    })
}
