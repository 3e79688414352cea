use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub status: String,
    pub image_url: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub project_id: i32,
    pub name: &'a str,
    pub category: &'a str,
    pub price: i64,
    pub image_url: Option<&'a str>,
    pub created_by: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub price: i64,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id,
            project_id: product.project_id,
            name: product.name,
            category: product.category,
            price: product.price,
            status: product.status.parse()?,
            image_url: product.image_url,
            created_by: product.created_by,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            project_id: product.project_id,
            name: product.name.as_str(),
            category: product.category.as_str(),
            price: product.price,
            image_url: product.image_url.as_deref(),
            created_by: product.created_by,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn from_domain(updates: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_str(),
            category: updates.category.as_str(),
            price: updates.price,
            image_url: updates.image_url.as_deref(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ApprovalStatus;
    use chrono::Utc;

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewProduct::new(
            1,
            "Oak flooring".into(),
            "Finishes".into(),
            125_000,
            Some("/uploads/oak.jpg".into()),
            7,
        );
        let new: NewProduct = (&domain).into();
        assert_eq!(new.project_id, 1);
        assert_eq!(new.name, "Oak flooring");
        assert_eq!(new.price, 125_000);
        assert_eq!(new.image_url, Some("/uploads/oak.jpg"));
    }

    #[test]
    fn product_into_domain_parses_status() {
        let now = Utc::now().naive_utc();
        let db_product = Product {
            id: 3,
            project_id: 1,
            name: "Oak flooring".into(),
            category: "Finishes".into(),
            price: 125_000,
            status: "approved".into(),
            image_url: None,
            created_by: 7,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainProduct = db_product.try_into().unwrap();
        assert_eq!(domain.status, ApprovalStatus::Approved);
    }
}
