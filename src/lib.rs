use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::api_v1_products;
use crate::routes::auth::{
    logout, request_reset, resend_verification, reset_password, show_reset_confirm,
    show_reset_request, show_signin, show_signup, signin, signup, verify_email,
};
use crate::routes::chat::{send_message, show_chat};
use crate::routes::cost_change::{
    add_cost_change, cost_change_status, delete_cost_change, show_cost_changes,
};
use crate::routes::decision::{
    add_decision, decision_status, delete_decision, save_decision, show_decisions,
};
use crate::routes::drawing::{delete_drawing, show_drawings, upload_drawing};
use crate::routes::main::{
    add_project, save_project, select_project, show_dashboard, show_index,
};
use crate::routes::milestone::{
    add_milestone, delete_milestone, milestone_progress, reorder_milestones, save_milestone,
    show_milestones,
};
use crate::routes::product::{
    add_product, delete_product, product_status, save_product, show_products,
};
use crate::routes::remedial_item::{
    add_remedial_item, delete_remedial_item, remedial_item_status, show_remedial_items,
};
use crate::routes::schedule_item::{
    add_schedule_item, delete_schedule_item, save_schedule_item, schedule_item_status,
    show_schedule,
};

pub mod auth;
pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    std::fs::create_dir_all(&server_config.uploads_dir)?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new(
                "/uploads",
                server_config.uploads_dir.clone(),
            ))
            .service(show_signin)
            .service(signin)
            .service(show_signup)
            .service(signup)
            .service(verify_email)
            .service(resend_verification)
            .service(show_reset_request)
            .service(request_reset)
            .service(show_reset_confirm)
            .service(reset_password)
            .service(web::scope("/api").service(api_v1_products))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(add_project)
                    .service(select_project)
                    .service(save_project)
                    .service(show_dashboard)
                    .service(show_products)
                    .service(add_product)
                    .service(save_product)
                    .service(product_status)
                    .service(delete_product)
                    .service(show_milestones)
                    .service(add_milestone)
                    .service(save_milestone)
                    .service(milestone_progress)
                    .service(reorder_milestones)
                    .service(delete_milestone)
                    .service(show_decisions)
                    .service(add_decision)
                    .service(save_decision)
                    .service(decision_status)
                    .service(delete_decision)
                    .service(show_cost_changes)
                    .service(add_cost_change)
                    .service(cost_change_status)
                    .service(delete_cost_change)
                    .service(show_schedule)
                    .service(add_schedule_item)
                    .service(save_schedule_item)
                    .service(schedule_item_status)
                    .service(delete_schedule_item)
                    .service(show_remedial_items)
                    .service(add_remedial_item)
                    .service(remedial_item_status)
                    .service(delete_remedial_item)
                    .service(show_drawings)
                    .service(upload_drawing)
                    .service(delete_drawing)
                    .service(show_chat)
                    .service(send_message)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
