use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{FormError, parse_minor_units};

#[derive(MultipartForm)]
/// Form data for proposing a product, with an optional image upload.
pub struct AddProductForm {
    pub name: Text<String>,
    pub category: Text<String>,
    /// Price in major units as typed by the user, e.g. "1250.50".
    pub price: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl AddProductForm {
    /// Converts the form into a domain payload once the image (if any) has
    /// been persisted and turned into a URL.
    pub fn to_new_product(
        &self,
        project_id: i32,
        created_by: i32,
        image_url: Option<String>,
    ) -> Result<NewProduct, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::InvalidName);
        }
        let price = parse_minor_units(&self.price)?;

        Ok(NewProduct::new(
            project_id,
            self.name.0.clone(),
            self.category.0.clone(),
            price,
            image_url,
            created_by,
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing product.
pub struct SaveProductForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub category: String,
    pub price: String,
}

impl SaveProductForm {
    /// The current image URL is carried over; image replacement goes through
    /// the add form.
    pub fn to_update_product(
        &self,
        image_url: Option<String>,
    ) -> Result<UpdateProduct, FormError> {
        let price = parse_minor_units(&self.price)?;
        Ok(UpdateProduct {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price,
            image_url,
        })
    }
}

#[derive(Deserialize)]
/// Form data for approving or rejecting a product.
pub struct ProductStatusForm {
    pub id: i32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_form_parses_price() {
        let form = SaveProductForm {
            id: 1,
            name: "Oak flooring".into(),
            category: "Finishes".into(),
            price: "1250.50".into(),
        };
        let update = form.to_update_product(None).unwrap();
        assert_eq!(update.price, 125_050);
    }

    #[test]
    fn save_form_rejects_bad_price() {
        let form = SaveProductForm {
            id: 1,
            name: "Oak flooring".into(),
            category: "Finishes".into(),
            price: "a lot".into(),
        };
        assert!(matches!(
            form.to_update_product(None),
            Err(FormError::InvalidAmount)
        ));
    }
}
