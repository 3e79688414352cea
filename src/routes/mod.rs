//! Route handlers and shared response helpers.

use actix_multipart::form::tempfile::TempFile;
use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;

pub mod api;
pub mod auth;
pub mod chat;
pub mod cost_change;
pub mod decision;
pub mod drawing;
pub mod main;
pub mod milestone;
pub mod product;
pub mod remedial_item;
pub mod schedule_item;

/// Session key holding the selected project id.
pub const SELECTED_PROJECT_KEY: &str = "selected_project_id";

/// Issues a `303 See Other` redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Maps a flash message level onto the alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(&'static str, &str)> {
    flash_messages
        .iter()
        .map(|message| (alert_level_to_str(&message.level()), message.content()))
        .collect()
}

/// Template context shared by authenticated pages.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(flash_messages));
    context.insert("current_user", user);
    context.insert("active_page", active_page);
    context
}

/// Template context for pages rendered before sign-in.
pub fn anonymous_context(flash_messages: &IncomingFlashMessages) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(flash_messages));
    context
}

/// Renders a template or logs and returns a 500.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template {template}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Reads the selected project id from the session, or redirects to the
/// project list with a prompt.
pub fn selected_project(session: &Session) -> Result<i32, HttpResponse> {
    match session.get::<i32>(SELECTED_PROJECT_KEY) {
        Ok(Some(project_id)) => Ok(project_id),
        _ => {
            FlashMessage::warning("Select a project first").send();
            Err(redirect("/"))
        }
    }
}

/// Persists an uploaded temp file under the uploads directory and returns the
/// public URL it will be served from.
pub fn save_upload(file: TempFile, uploads_dir: &str) -> std::io::Result<String> {
    let original = file.file_name.as_deref().unwrap_or("upload.bin");
    let extension = std::path::Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let stored = format!("{}.{extension}", uuid::Uuid::new_v4());

    std::fs::create_dir_all(uploads_dir)?;
    let destination = std::path::Path::new(uploads_dir).join(&stored);
    file.file
        .persist(&destination)
        .map_err(|persist_error| persist_error.error)?;

    Ok(format!("/uploads/{stored}"))
}

/// Resolves the selected project and enforces membership in one step, the
/// common preamble of every entity route.
pub fn project_scope(
    repo: &crate::repository::DieselRepository,
    user: &AuthenticatedUser,
    session: &Session,
) -> Result<i32, HttpResponse> {
    let project_id = selected_project(session)?;
    match crate::services::main::ensure_member(repo, user, project_id) {
        Ok(()) => Ok(project_id),
        Err(crate::services::ServiceError::Unauthorized) => {
            FlashMessage::error("This project is not available to you").send();
            Err(redirect("/"))
        }
        Err(err) => {
            log::error!("Failed to check project membership: {err}");
            Err(HttpResponse::InternalServerError().finish())
        }
    }
}

#[derive(Deserialize)]
/// Page number accepted by paginated list pages.
pub struct PageQuery {
    pub page: Option<usize>,
}

#[derive(Deserialize)]
/// Form data carrying only the id of the record to delete.
pub struct DeleteForm {
    pub id: i32,
}
