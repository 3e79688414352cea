use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::ApprovalStatus;

/// A decision the client owes the builder, e.g. a finish or fixture choice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub category: String,
    pub status: ApprovalStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDecision {
    pub project_id: i32,
    pub title: String,
    pub category: String,
    pub due_date: Option<NaiveDate>,
}

impl NewDecision {
    #[must_use]
    pub fn new(
        project_id: i32,
        title: String,
        category: String,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            category: category.trim().to_string(),
            due_date,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateDecision {
    pub title: String,
    pub category: String,
    pub due_date: Option<NaiveDate>,
}
