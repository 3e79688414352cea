use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::project::{AddProjectForm, SaveProjectForm};
use crate::repository::DieselRepository;
use crate::routes::{
    PageQuery, SELECTED_PROJECT_KEY, base_context, redirect, render_template, selected_project,
};
use crate::services::ServiceError;
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let selected = session.get::<i32>(SELECTED_PROJECT_KEY).unwrap_or(None);

    let page_data = match main_service::load_index_page(repo.get_ref(), &user, selected) {
        Ok(page_data) => page_data,
        Err(err) => {
            log::error!("Failed to load projects: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "index");
    context.insert("projects", &page_data.projects);
    context.insert("selected", &page_data.selected);

    render_template(&tera, "main/index.html", &context)
}

#[post("/project/add")]
pub async fn add_project(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProjectForm>,
) -> impl Responder {
    match main_service::add_project(repo.get_ref(), &user, &form) {
        Ok(_) => {
            FlashMessage::success("Project created.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Only builders can create projects").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to create project: {err}");
            FlashMessage::error("Failed to create the project").send();
        }
    }
    redirect("/")
}

#[post("/project/select/{project_id}")]
pub async fn select_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let project_id = project_id.into_inner();

    match main_service::select_project(repo.get_ref(), &user, project_id) {
        Ok(project) => {
            if let Err(err) = session.insert(SELECTED_PROJECT_KEY, project.id) {
                log::error!("Failed to store selected project: {err}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect("/dashboard")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("This project is not available to you").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Project not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to select project: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/project/save")]
pub async fn save_project(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveProjectForm>,
) -> impl Responder {
    match main_service::save_project(repo.get_ref(), &user, &form) {
        Ok(_) => {
            FlashMessage::success("Project updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("This project is not available to you").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update project: {err}");
            FlashMessage::error("Failed to update the project").send();
        }
    }
    redirect("/dashboard")
}

#[get("/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let project_id = match selected_project(&session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let page = query.page.unwrap_or(1);
    let page_data = match main_service::load_dashboard(repo.get_ref(), &user, project_id, page) {
        Ok(page_data) => page_data,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("This project is not available to you").send();
            return redirect("/");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Project not found.").send();
            return redirect("/");
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "dashboard");
    context.insert("project", &page_data.project);
    context.insert("activity", &page_data.activity);
    context.insert("total_activity", &page_data.total_activity);

    render_template(&tera, "main/dashboard.html", &context)
}
