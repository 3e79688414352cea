use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use serde_json::json;
use tera::Tera;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::activity::{ActivityAction, ActivityEntity, NewActivity};
use crate::forms::product::{AddProductForm, ProductStatusForm, SaveProductForm};
use crate::models::config::ServerConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter,
};
use crate::routes::{
    DeleteForm, base_context, project_scope, redirect, render_template, save_upload,
};
use crate::services::ServiceError;
use crate::services::activity::record_activity;
use crate::services::product as product_service;

#[derive(Deserialize)]
pub struct ProductsPageQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
}

#[get("/products")]
pub async fn show_products(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ProductsPageQuery>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let page = query.page.unwrap_or(1);
    let search = query
        .search
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut list_query = ProductListQuery::new(project_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }

    let (total, products) = match repo.list_products(list_query) {
        Ok(result) => result,
        Err(err) => {
            log::error!("Failed to list products: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let products = Paginated::new(products, page, total_pages);

    let mut context = base_context(&flash_messages, &user, "products");
    context.insert("products", &products);
    context.insert("total", &total);
    context.insert("search_query", &search);

    render_template(&tera, "product/index.html", &context)
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(mut form): MultipartForm<AddProductForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let image_url = match form.image.take() {
        Some(file) if file.size > 0 => {
            match save_upload(file, &server_config.uploads_dir) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::error!("Failed to store product image: {err}");
                    FlashMessage::error("Failed to store the product image").send();
                    return redirect("/products");
                }
            }
        }
        _ => None,
    };

    let new_product = match form.to_new_product(project_id, user.sub, image_url) {
        Ok(new_product) => new_product,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match repo.create_product(&new_product) {
        Ok(product) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Product,
                    ActivityAction::Created,
                    json!({ "name": &product.name }),
                ),
            );
            FlashMessage::success("Product added.").send();
        }
        Err(err) => {
            log::error!("Failed to add product: {err}");
            FlashMessage::error("Failed to add the product").send();
        }
    }

    redirect("/products")
}

#[post("/products/save")]
pub async fn save_product(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveProductForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        FlashMessage::error("Product name is required").send();
        return redirect("/products");
    }

    let existing = match repo.get_product_by_id(form.id) {
        Ok(Some(product)) if product.project_id == project_id => product,
        Ok(_) => {
            FlashMessage::error("Product not found.").send();
            return redirect("/products");
        }
        Err(err) => {
            log::error!("Failed to load product: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let updates = match form.to_update_product(existing.image_url.clone()) {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match repo.update_product(form.id, &updates) {
        Ok(product) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Product,
                    ActivityAction::Updated,
                    json!({ "name": &product.name }),
                ),
            );
            FlashMessage::success("Product updated.").send();
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            FlashMessage::error("Failed to update the product").send();
        }
    }

    redirect("/products")
}

#[post("/products/status")]
pub async fn product_status(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProductStatusForm>,
) -> impl Responder {
    if let Err(response) = project_scope(&repo, &user, &session) {
        return response;
    }

    let status = match form.status.parse() {
        Ok(status) => status,
        Err(_) => {
            FlashMessage::error("Unknown product status").send();
            return redirect("/products");
        }
    };

    match product_service::review_product(repo.get_ref(), &user, form.id, status) {
        Ok(_) => {
            FlashMessage::success("Product status updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Only builders can approve products").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update product status: {err}");
            FlashMessage::error("Failed to update the product status").send();
        }
    }

    redirect("/products")
}

#[post("/products/delete")]
pub async fn delete_product(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let project_id = match project_scope(&repo, &user, &session) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    let existing = match repo.get_product_by_id(form.id) {
        Ok(Some(product)) if product.project_id == project_id => product,
        Ok(_) => {
            FlashMessage::error("Product not found.").send();
            return redirect("/products");
        }
        Err(err) => {
            log::error!("Failed to load product: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match repo.delete_product(existing.id) {
        Ok(()) => {
            record_activity(
                repo.get_ref(),
                NewActivity::new(
                    project_id,
                    user.sub,
                    ActivityEntity::Product,
                    ActivityAction::Deleted,
                    json!({ "name": &existing.name }),
                ),
            );
            FlashMessage::success("Product deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            FlashMessage::error("Failed to delete the product").send();
        }
    }

    redirect("/products")
}
