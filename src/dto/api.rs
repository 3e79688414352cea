//! DTOs exposed by the BuildSync API endpoints.

use serde::Serialize;

use crate::domain::product::Product;

/// Query parameters accepted by the `/api/v1/products` service.
#[derive(Debug, Default)]
pub struct ProductsQuery {
    /// Optional free-form search string applied to the product list.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`crate::services::api::list_products`].
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Total number of products matching the filter.
    pub total: usize,
    /// Page of products requested by the caller.
    pub products: Vec<Product>,
}
