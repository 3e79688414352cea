use crate::auth::AuthenticatedUser;
use crate::dto::api::{ProductsQuery, ProductsResponse};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ProductListQuery, ProductReader, ProjectReader};
use crate::services::main::ensure_member;
use crate::services::{ServiceError, ServiceResult};

/// Returns the filtered product list for the caller's selected project.
pub fn list_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    params: ProductsQuery,
) -> ServiceResult<ProductsResponse>
where
    R: ProjectReader + ProductReader + ?Sized,
{
    ensure_member(repo, user, project_id)?;

    let mut query = ProductListQuery::new(project_id);

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    let search = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = search {
        query = query.search(term);
    }

    let (total, products) = repo.list_products(query).map_err(ServiceError::from)?;

    Ok(ProductsResponse { total, products })
}
