use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::forms::milestone::{
    AddMilestoneForm, MilestoneProgressForm, ReorderMilestonesForm, SaveMilestoneForm,
};
use crate::repository::{DieselRepository, MilestoneReader, MilestoneWriter};
use crate::routes::{DeleteForm, base_context, project_scope, redirect, render_template};
use crate::services::ServiceError;
use crate::services::activity::record_activity;
use crate::services::milestone as milestone_service;

#[get("/milestones")]
pub async fn show_milestones(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let milestones = match repo.list_milestones(project_id) {
        Ok(milestones) => milestones,
        Err(err) => {
            log::error!("Failed to list milestones: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "milestones");
    context.insert("milestones", &milestones);

    render_template(&tera, "milestone/index.html", &context)
}

#[post("/milestones/add")]
pub async fn add_milestone(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddMilestoneForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Milestone title is required").send();
        return redirect("/milestones");
    }

    match repo.create_milestone(&form.to_new_milestone(project_id)) {
        Ok(milestone) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Milestone,
                    ActivityAction::Created,
                    json!({ "title": &milestone.title }),
                ),
            );
            FlashMessage::success("Milestone added.").send();
        }
        Err(err) => {
            log::error!("Failed to add milestone: {err}");
            FlashMessage::error("Failed to add the milestone").send();
        }
    }

    redirect("/milestones")
}

#[post("/milestones/save")]
pub async fn save_milestone(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveMilestoneForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Milestone title is required").send();
        return redirect("/milestones");
    }

    match repo.get_milestone_by_id(form.id) {
        Ok(Some(milestone)) if milestone.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Milestone not found.").send();
            return redirect("/milestones");
        }
        Err(err) => {
            log::error!("Failed to load milestone: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match repo.update_milestone(form.id, &(&form).into()) {
        Ok(milestone) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Milestone,
                    ActivityAction::Updated,
                    json!({ "title": &milestone.title }),
                ),
            );
            FlashMessage::success("Milestone updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update milestone: {err}");
            FlashMessage::error("Failed to update the milestone").send();
        }
    }

    redirect("/milestones")
}

#[post("/milestones/progress")]
pub async fn milestone_progress(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<MilestoneProgressForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match repo.get_milestone_by_id(form.id) {
        Ok(Some(milestone)) if milestone.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Milestone not found.").send();
            return redirect("/milestones");
        }
        Err(err) => {
            log::error!("Failed to load milestone: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match milestone_service::update_progress(
        repo.get_ref(),
        &user,
        form.id,
        form.completion_percentage,
    ) {
        Ok(_) => {
            FlashMessage::success("Progress recorded.").send();
        }
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Milestone not found.").send();
        }
        Err(err) => {
            log::error!("Failed to record progress: {err}");
            FlashMessage::error("Failed to record progress").send();
        }
    }

    redirect("/milestones")
}

#[post("/milestones/reorder")]
pub async fn reorder_milestones(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ReorderMilestonesForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match repo.reorder_milestones(project_id, &form.id) {
        Ok(_) => {
            FlashMessage::success("Milestones reordered.").send();
        }
        Err(err) => {
            log::error!("Failed to reorder milestones: {err}");
            FlashMessage::error("Failed to reorder the milestones").send();
        }
    }

    redirect("/milestones")
}

#[post("/milestones/delete")]
pub async fn delete_milestone(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_milestone_by_id(form.id) {
        Ok(Some(milestone)) if milestone.project_id == project_id => milestone,
        Ok(_) => {
            FlashMessage::error("Milestone not found.").send();
            return redirect("/milestones");
        }
        Err(err) => {
            log::error!("Failed to load milestone: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_milestone(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Milestone,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Milestone deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete milestone: {err}");
            FlashMessage::error("Failed to delete the milestone").send();
        }
    }

    redirect("/milestones")
}
