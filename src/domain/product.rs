use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ApprovalStatus;

/// A product or material proposed for the project, priced in minor units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub status: ApprovalStatus,
    pub image_url: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub project_id: i32,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub created_by: i32,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        project_id: i32,
        name: String,
        category: String,
        price: i64,
        image_url: Option<String>,
        created_by: i32,
    ) -> Self {
        Self {
            project_id,
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            price,
            image_url: image_url.filter(|s| !s.is_empty()),
            created_by,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateProduct {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub image_url: Option<String>,
}
