use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::domain::chat::NewChatMessage;
use crate::forms::chat::SendMessageForm;
use crate::models::config::ServerConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ChatListQuery, ChatReader, ChatWriter, DieselRepository};
use crate::routes::{
    PageQuery, base_context, project_scope, redirect, render_template, save_upload,
};
use crate::services::activity::record_activity;

#[get("/chat")]
pub async fn show_chat(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let page = query.page.unwrap_or(1);
    let (total, messages) = match repo.list_chat_messages(
        ChatListQuery::new(project_id).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    ) {
        Ok(result) => result,
        Err(err) => {
            log::error!("Failed to list chat messages: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let messages = Paginated::new(messages, page, total_pages);

    let mut context = base_context(&flash_messages, &user, "chat");
    context.insert("messages", &messages);
    context.insert("total", &total);

    render_template(&tera, "chat/index.html", &context)
}

#[post("/chat/send")]
pub async fn send_message(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<SendMessageForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let mut photo_urls = Vec::new();
    for photo in form.photos {
        if photo.size == 0 {
            continue;
        }
        match save_upload(photo, &server_config.uploads_dir) {
            Ok(url) => photo_urls.push(url),
            Err(err) => {
                log::error!("Failed to store chat photo: {err}");
                FlashMessage::error("Failed to store a photo").send();
                return redirect("/chat");
            }
        }
    }

    let message = match NewChatMessage::new(project_id, user.sub, form.content.0, photo_urls) {
        Ok(message) => message,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/chat");
        }
    };

    match repo.create_chat_message(&message) {
        Ok(created) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::ChatMessage,
                    ActivityAction::Created,
                    json!({ "photos": created.photo_urls.len() }),
                ),
            );
        }
        Err(err) => {
            log::error!("Failed to send message: {err}");
            FlashMessage::error("Failed to send the message").send();
        }
    }

    redirect("/chat")
}
