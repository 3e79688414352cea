use serde::Deserialize;
use validator::Validate;

use crate::domain::cost_change::NewCostChange;
use crate::forms::{FormError, parse_minor_units};

#[derive(Deserialize, Validate)]
/// Form data for recording a cost variation.
pub struct AddCostChangeForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub original_cost: String,
    pub new_cost: String,
    #[serde(default)]
    pub estimated_days: i32,
}

impl AddCostChangeForm {
    pub fn to_new_cost_change(&self, project_id: i32) -> Result<NewCostChange, FormError> {
        let original_cost = parse_minor_units(&self.original_cost)?;
        let new_cost = parse_minor_units(&self.new_cost)?;

        Ok(NewCostChange::new(
            project_id,
            self.title.clone(),
            original_cost,
            new_cost,
            self.estimated_days,
        ))
    }
}

#[derive(Deserialize)]
/// Form data for approving or rejecting a cost change.
pub struct CostChangeStatusForm {
    pub id: i32,
    pub status: String,
}
