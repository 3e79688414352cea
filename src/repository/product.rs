use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ApprovalStatus;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Product::try_from).transpose()?)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items_query = products::table
            .filter(products::project_id.eq(query.project_id))
            .order((products::created_at.desc(), products::id.desc()))
            .into_boxed();
        let mut count_query = products::table
            .filter(products::project_id.eq(query.project_id))
            .count()
            .into_boxed();

        if let Some(status) = &query.status {
            let status = status.to_string();
            items_query = items_query.filter(products::status.eq(status.clone()));
            count_query = count_query.filter(products::status.eq(status));
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            items_query = items_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::category.like(pattern.clone())),
            );
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::category.like(pattern)),
            );
        }

        let total: i64 = count_query.get_result(&mut conn)?;

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();
        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::models::product::{Product as DbProduct, UpdateProduct as DbUpdateProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(products::table.find(product_id))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_product_status(
        &self,
        product_id: i32,
        status: ApprovalStatus,
    ) -> RepositoryResult<Product> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updated = diesel::update(products::table.find(product_id))
            .set((
                products::status.eq(status.to_string()),
                products::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        diesel::delete(products::table.find(product_id)).execute(&mut conn)?;

        Ok(())
    }
}
