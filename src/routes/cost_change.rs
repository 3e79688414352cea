use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::dto::main::CostChangeDisplay;
use crate::forms::cost_change::{AddCostChangeForm, CostChangeStatusForm};
use crate::repository::{CostChangeReader, CostChangeWriter, DieselRepository};
use crate::routes::{DeleteForm, base_context, project_scope, redirect, render_template};
use crate::services::activity::record_activity;

#[get("/cost-changes")]
pub async fn show_cost_changes(
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

    let cost_changes = match repo.list_cost_changes(project_id) {
        Ok(changes) => changes
            .into_iter()
            .map(CostChangeDisplay::from)
            .collect::<Vec<_>>(),
        Err(err) => {
            log::error!("Failed to list cost changes: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "cost-changes");
    context.insert("cost_changes", &cost_changes);

    render_template(&tera, "cost_change/index.html", &context)
}

#[post("/cost-changes/add")]
pub async fn add_cost_change(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCostChangeForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Cost change title is required").send();
        return redirect("/cost-changes");
    }

    let new_change = match form.to_new_cost_change(project_id) {
        Ok(new_change) => new_change,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/cost-changes");
        }
    };

    match repo.create_cost_change(&new_change) {
        Ok(change) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::CostChange,
                    ActivityAction::Created,
                    json!({
                        "title": &change.title,
                        "difference": change.difference(),
                    }),
                ),
            );
            FlashMessage::success("Cost change recorded.").send();
        }
        Err(err) => {
            log::error!("Failed to add cost change: {err}");
            FlashMessage::error("Failed to record the cost change").send();
        }
    }

    redirect("/cost-changes")
}

#[post("/cost-changes/status")]
pub async fn cost_change_status(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CostChangeStatusForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if !user.role.can_approve() {
        FlashMessage::error("Only builders can review cost changes").send();
        return redirect("/cost-changes");
    }

    let status = match form.status.parse() {
        Ok(status) => status,
        Err(_) => {
            FlashMessage::error("Unknown cost change status").send();
            return redirect("/cost-changes");
        }
    };

    match repo.get_cost_change_by_id(form.id) {
        Ok(Some(change)) if change.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Cost change not found.").send();
            return redirect("/cost-changes");
        }
        Err(err) => {
            log::error!("Failed to load cost change: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match repo.set_cost_change_status(form.id, status) {
        Ok(change) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::CostChange,
                    ActivityAction::StatusChanged,
                    json!({
                        "title": &change.title,
                        "status": change.status.to_string(),
                    }),
                ),
            );
            FlashMessage::success("Cost change status updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update cost change status: {err}");
            FlashMessage::error("Failed to update the cost change status").send();
        }
    }

    redirect("/cost-changes")
}

#[post("/cost-changes/delete")]
pub async fn delete_cost_change(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_cost_change_by_id(form.id) {
        Ok(Some(change)) if change.project_id == project_id => change,
        Ok(_) => {
            FlashMessage::error("Cost change not found.").send();
            return redirect("/cost-changes");
        }
        Err(err) => {
            log::error!("Failed to load cost change: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_cost_change(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::CostChange,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Cost change deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete cost change: {err}");
            FlashMessage::error("Failed to delete the cost change").send();
        }
    }

    redirect("/cost-changes")
}
