use serde::Deserialize;
use validator::Validate;

use crate::domain::remedial_item::{NewRemedialItem, Priority};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for raising a remedial item.
pub struct AddRemedialItemForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub priority: String,
}

impl AddRemedialItemForm {
    pub fn to_new_remedial_item(&self, project_id: i32) -> Result<NewRemedialItem, FormError> {
        let priority: Priority = self
            .priority
            .parse()
            .map_err(|_| FormError::InvalidPriority)?;
        Ok(NewRemedialItem::new(
            project_id,
            self.title.clone(),
            priority,
        ))
    }
}

#[derive(Deserialize)]
/// Form data for moving a remedial item through its lifecycle.
pub struct RemedialStatusForm {
    pub id: i32,
    pub status: String,
}
