use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::drawing::NewDrawing;
use crate::forms::drawing::UploadDrawingForm;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, DrawingReader, DrawingWriter};
use crate::routes::{
    DeleteForm, base_context, project_scope, redirect, render_template, save_upload,
};
use crate::services::activity::record_activity;

#[get("/drawings")]
pub async fn show_drawings(
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

    let drawings = match repo.list_drawings(project_id) {
        Ok(drawings) => drawings,
        Err(err) => {
            log::error!("Failed to list drawings: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "drawings");
    context.insert("drawings", &drawings);

    render_template(&tera, "drawing/index.html", &context)
}

#[post("/drawings/upload")]
pub async fn upload_drawing(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadDrawingForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let title = form.title.0.trim().to_string();
    if title.is_empty() {
        FlashMessage::error("Drawing title is required").send();
        return redirect("/drawings");
    }

    if form.file.size == 0 {
        FlashMessage::error("A file is required").send();
        return redirect("/drawings");
    }

    let file_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "drawing.pdf".to_string());

    let file_url = match save_upload(form.file, &server_config.uploads_dir) {
        Ok(url) => url,
        Err(err) => {
            log::error!("Failed to store drawing: {err}");
            FlashMessage::error("Failed to store the drawing").send();
            return redirect("/drawings");
        }
    };

    let new_drawing = NewDrawing::new(project_id, title, file_url, file_name, user.sub);

    match repo.create_drawing(&new_drawing) {
        Ok(drawing) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Drawing,
                    ActivityAction::Created,
                    json!({
                        "title": &drawing.title,
                        "file_name": &drawing.file_name,
                    }),
                ),
            );
            FlashMessage::success("Drawing uploaded.").send();
        }
        Err(err) => {
            log::error!("Failed to save drawing: {err}");
            FlashMessage::error("Failed to save the drawing").send();
        }
    }

    redirect("/drawings")
}

#[post("/drawings/delete")]
pub async fn delete_drawing(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_drawing_by_id(form.id) {
        Ok(Some(drawing)) if drawing.project_id == project_id => drawing,
        Ok(_) => {
            FlashMessage::error("Drawing not found.").send();
            return redirect("/drawings");
        }
        Err(err) => {
            log::error!("Failed to load drawing: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_drawing(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Drawing,
                    ActivityAction::Deleted,
                    json!({ "title": &existing.title }),
                ),
            );
            FlashMessage::success("Drawing deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete drawing: {err}");
            FlashMessage::error("Failed to delete the drawing").send();
        }
    }

    redirect("/drawings")
}
