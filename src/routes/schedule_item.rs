use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::forms::schedule_item::{
    AddScheduleItemForm, SaveScheduleItemForm, ScheduleStatusForm,
};
use crate::repository::{DieselRepository, ScheduleReader, ScheduleWriter};
use crate::routes::{DeleteForm, base_context, project_scope, redirect, render_template};
use crate::services::activity::record_activity;

#[get("/schedule")]
pub async fn show_schedule(
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

    let items = match repo.list_schedule_items(project_id) {
        Ok(items) => items,
        Err(err) => {
            log::error!("Failed to list schedule items: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "schedule");
    context.insert("items", &items);

    render_template(&tera, "schedule/index.html", &context)
}

#[post("/schedule/add")]
pub async fn add_schedule_item(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddScheduleItemForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Schedule item title is required").send();
        return redirect("/schedule");
    }

    let new_item = match form.to_new_schedule_item(project_id) {
        Ok(new_item) => new_item,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/schedule");
        }
    };

    match repo.create_schedule_item(&new_item) {
        Ok(item) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::ScheduleItem,
                    ActivityAction::Created,
                    json!({ "title": &item.title }),
                ),
            );
            FlashMessage::success("Schedule item added.").send();
        }
        Err(err) => {
            log::error!("Failed to add schedule item: {err}");
            FlashMessage::error("Failed to add the schedule item").send();
        }
    }

    redirect("/schedule")
}

#[post("/schedule/save")]
pub async fn save_schedule_item(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveScheduleItemForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Schedule item title is required").send();
        return redirect("/schedule");
    }

    match repo.get_schedule_item_by_id(form.id) {
        Ok(Some(item)) if item.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Schedule item not found.").send();
            return redirect("/schedule");
        }
        Err(err) => {
            log::error!("Failed to load schedule item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    let updates = match form.to_update_schedule_item() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/schedule");
        }
    };

    match repo.update_schedule_item(form.id, &updates) {
        Ok(item) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::ScheduleItem,
                    ActivityAction::Updated,
                    json!({ "title": &item.title }),
                ),
            );
            FlashMessage::success("Schedule item updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update schedule item: {err}");
            FlashMessage::error("Failed to update the schedule item").send();
        }
    }

    redirect("/schedule")
}

#[post("/schedule/status")]
pub async fn schedule_item_status(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ScheduleStatusForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let status = match form.status.parse() {
        Ok(status) => status,
        Err(_) => {
            FlashMessage::error("Unknown schedule status").send();
            return redirect("/schedule");
        }
    };

    match repo.get_schedule_item_by_id(form.id) {
        Ok(Some(item)) if item.project_id == project_id => {}
        Ok(_) => {
            FlashMessage::error("Schedule item not found.").send();
            return redirect("/schedule");
        }
        Err(err) => {
            log::error!("Failed to load schedule item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match repo.set_schedule_item_status(form.id, status) {
        Ok(item) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::ScheduleItem,
                    ActivityAction::StatusChanged,
                    json!({
                        "title": &item.title,
                        "status": item.status.to_string(),
                    }),
                ),
            );
            FlashMessage::success("Schedule status updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update schedule status: {err}");
            FlashMessage::error("Failed to update the schedule status").send();
        }
    }

    redirect("/schedule")
}

#[post("/schedule/delete")]
pub async fn delete_schedule_item(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_schedule_item_by_id(form.id) {
        Ok(Some(item)) if item.project_id == project_id => item,
        Ok(_) => {
            FlashMessage::error("Schedule item not found.").send();
            return redirect("/schedule");
        }
        Err(err) => {
            log::error!("Failed to load schedule item: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_schedule_item(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::ScheduleItem,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Schedule item deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete schedule item: {err}");
            FlashMessage::error("Failed to delete the schedule item").send();
        }
    }

    redirect("/schedule")
}
