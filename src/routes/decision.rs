use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::forms::decision::{AddDecisionForm, DecisionStatusForm, SaveDecisionForm};
use crate::repository::{DecisionReader, DecisionWriter, DieselRepository};
use crate::routes::{DeleteForm, base_context, project_scope, redirect, render_template};
use crate::services::activity::record_activity;

#[get("/decisions")]
pub async fn show_decisions(
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

    let decisions = match repo.list_decisions(project_id) {
        Ok(decisions) => decisions,
        Err(err) => {
            log::error!("Failed to list decisions: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "decisions");
    context.insert("decisions", &decisions);

    render_template(&tera, "decision/index.html", &context)
}

#[post("/decisions/add")]
pub async fn add_decision(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddDecisionForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Decision title is required").send();
        return redirect("/decisions");
    }

    let new_decision = match form.to_new_decision(project_id) {
        Ok(new_decision) => new_decision,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/decisions");
        }
    };

    match repo.create_decision(&new_decision) {
        Ok(decision) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Decision,
                    ActivityAction::Created,
                    json!({ "title": &decision.title }),
                ),
            );
            FlashMessage::success("Decision added.").send();
        }
        Err(err) => {
            log::error!("Failed to add decision: {err}");
            FlashMessage::error("Failed to add the decision").send();
        }
    }

    redirect("/decisions")
}

#[post("/decisions/save")]
pub async fn save_decision(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveDecisionForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Decision title is required").send();
        return redirect("/decisions");
    }

    match repo.get_decision_by_id(form.id) {
        Ok(Some(decision)) if decision.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Decision not found.").send();
            return redirect("/decisions");
        }
        Err(err) => {
            log::error!("Failed to load decision: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    let updates = match form.to_update_decision() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/decisions");
        }
    };

    match repo.update_decision(form.id, &updates) {
        Ok(decision) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Decision,
                    ActivityAction::Updated,
                    json!({ "title": &decision.title }),
                ),
            );
            FlashMessage::success("Decision updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update decision: {err}");
            FlashMessage::error("Failed to update the decision").send();
        }
    }

    redirect("/decisions")
}

#[post("/decisions/status")]
pub async fn decision_status(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DecisionStatusForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let status = match form.status.parse() {
        Ok(status) => status,
        Err(_) => {
            FlashMessage::error("Unknown decision status").send();
            return redirect("/decisions");
        }
    };

    match repo.get_decision_by_id(form.id) {
        Ok(Some(decision)) if decision.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Decision not found.").send();
            return redirect("/decisions");
        }
        Err(err) => {
            log::error!("Failed to load decision: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match repo.set_decision_status(form.id, status) {
        Ok(decision) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Decision,
                    ActivityAction::StatusChanged,
                    json!({
                        "title": &decision.title,
                        "status": decision.status.to_string(),
                    }),
                ),
            );
            FlashMessage::success("Decision status updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update decision status: {err}");
            FlashMessage::error("Failed to update the decision status").send();
        }
    }

    redirect("/decisions")
}

#[post("/decisions/delete")]
pub async fn delete_decision(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_decision_by_id(form.id) {
        Ok(Some(decision)) if decision.project_id == project_id => decision,
        Ok(_) => {
            FlashMessage::error("Decision not found.").send();
            return redirect("/decisions");
        }
        Err(err) => {
            log::error!("Failed to load decision: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_decision(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Decision,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Decision deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete decision: {err}");
            FlashMessage::error("Failed to delete the decision").send();
        }
    }

    redirect("/decisions")
}
