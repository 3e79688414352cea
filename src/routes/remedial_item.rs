use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::forms::remedial_item::{AddRemedialItemForm, RemedialStatusForm};
use crate::repository::{DieselRepository, RemedialReader, RemedialWriter};
use crate::routes::{DeleteForm, base_context, project_scope, redirect, render_template};
use crate::services::ServiceError;
use crate::services::activity::record_activity;
use crate::services::remedial_item as remedial_service;

#[get("/remedials")]
pub async fn show_remedial_items(
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

    let items = match repo.list_remedial_items(project_id) {
        Ok(items) => items,
        Err(err) => {
            log::error!("Failed to list remedial items: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "remedials");
    context.insert("items", &items);

    render_template(&tera, "remedial/index.html", &context)
}

#[post("/remedials/add")]
pub async fn add_remedial_item(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddRemedialItemForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Remedial item title is required").send();
        return redirect("/remedials");
    }

    let new_item = match form.to_new_remedial_item(project_id) {
        Ok(new_item) => new_item,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/remedials");
        }
    };

    match repo.create_remedial_item(&new_item) {
        Ok(item) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::RemedialItem,
                    ActivityAction::Created,
                    json!({
                        "title": &item.title,
                        "priority": item.priority.to_string(),
                    }),
                ),
            );
            FlashMessage::success("Remedial item raised.").send();
        }
        Err(err) => {
            log::error!("Failed to add remedial item: {err}");
            FlashMessage::error("Failed to raise the remedial item").send();
        }
    }

    redirect("/remedials")
}

#[post("/remedials/status")]
pub async fn remedial_item_status(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RemedialStatusForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let status = match form.status.parse() {
        Ok(status) => status,
        Err(_) => {
            FlashMessage::error("Unknown remedial status").send();
            return redirect("/remedials");
        }
    };

    match repo.get_remedial_item_by_id(form.id) {
        Ok(Some(item)) if item.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Remedial item not found.").send();
            return redirect("/remedials");
        }
        Err(err) => {
            log::error!("Failed to load remedial item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match remedial_service::set_status(repo.get_ref(), &user, form.id, status) {
        Ok(_) => {
            FlashMessage::success("Remedial status updated.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Remedial item not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update remedial status: {err}");
            FlashMessage::error("Failed to update the remedial status").send();
        }
    }

    redirect("/remedials")
}

#[post("/remedials/delete")]
pub async fn delete_remedial_item(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_remedial_item_by_id(form.id) {
        Ok(Some(item)) if item.project_id == project_id => item,
        Ok(_) => {
            FlashMessage::error("Remedial item not found.").send();
            return redirect("/remedials");
        }
        Err(err) => {
            log::error!("Failed to load remedial item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_remedial_item(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::RemedialItem,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Remedial item deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete remedial item: {err}");
            FlashMessage::error("Failed to delete the remedial item").send();
        }
    }

    redirect("/remedials")
}
