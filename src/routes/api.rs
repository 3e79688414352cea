use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::dto::api::ProductsQuery;
use crate::repository::DieselRepository;
use crate::routes::SELECTED_PROJECT_KEY;
use crate::services::ServiceError;
use crate::services::api as api_service;

#[derive(Deserialize)]
struct ApiV1ProductsQueryParams {
    query: Option<String>,
    page: Option<usize>,
}

#[get("/v1/products")]
pub async fn api_v1_products(
    params: web::Query<ApiV1ProductsQueryParams>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(Some(project_id)) = session.get::<i32>(SELECTED_PROJECT_KEY) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "no project selected"
        }));
    };

    let params = params.into_inner();
    let query = ProductsQuery {
        search: params.query,
        page: params.page,
    };

    match api_service::list_products(repo.get_ref(), &user, project_id, query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(e) => {
            error!("Failed to list products: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
