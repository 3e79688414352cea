use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::milestone::{NewMilestone, UpdateMilestone};

#[derive(Deserialize, Validate)]
/// Form data for adding a milestone.
pub struct AddMilestoneForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub sort_order: i32,
}

impl AddMilestoneForm {
    pub fn to_new_milestone(&self, project_id: i32) -> NewMilestone {
        NewMilestone::new(project_id, self.title.clone(), self.due_date, self.sort_order)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a milestone's title and due date.
pub struct SaveMilestoneForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    pub due_date: NaiveDate,
}

impl From<&SaveMilestoneForm> for UpdateMilestone {
    fn from(form: &SaveMilestoneForm) -> Self {
        UpdateMilestone {
            title: form.title.trim().to_string(),
            due_date: form.due_date,
        }
    }
}

#[derive(Deserialize)]
/// Form data for reporting milestone progress.
pub struct MilestoneProgressForm {
    pub id: i32,
    pub completion_percentage: i32,
}

#[derive(Deserialize)]
/// Ordered milestone ids as laid out by the user.
pub struct ReorderMilestonesForm {
    #[serde(default)]
    pub id: Vec<i32>,
}
