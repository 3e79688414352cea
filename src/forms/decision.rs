use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::decision::{NewDecision, UpdateDecision};
use crate::forms::FormError;

/// Parses an optional date field, treating an empty input as absent.
fn parse_optional_date(input: &Option<String>) -> Result<Option<NaiveDate>, FormError> {
    match input.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| FormError::InvalidDate),
    }
}

#[derive(Deserialize, Validate)]
/// Form data for raising a decision.
pub struct AddDecisionForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub category: String,
    pub due_date: Option<String>,
}

impl AddDecisionForm {
    pub fn to_new_decision(&self, project_id: i32) -> Result<NewDecision, FormError> {
        let due_date = parse_optional_date(&self.due_date)?;
        Ok(NewDecision::new(
            project_id,
            self.title.clone(),
            self.category.clone(),
            due_date,
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a decision.
pub struct SaveDecisionForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    pub category: String,
    pub due_date: Option<String>,
}

impl SaveDecisionForm {
    pub fn to_update_decision(&self) -> Result<UpdateDecision, FormError> {
        let due_date = parse_optional_date(&self.due_date)?;
        Ok(UpdateDecision {
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            due_date,
        })
    }
}

#[derive(Deserialize)]
/// Form data for approving or rejecting a decision.
pub struct DecisionStatusForm {
    pub id: i32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_due_date_is_none() {
        assert_eq!(parse_optional_date(&Some("".into())), Ok(None));
        assert_eq!(parse_optional_date(&None), Ok(None));
    }

    #[test]
    fn valid_due_date_parses() {
        let parsed = parse_optional_date(&Some("2026-09-15".into())).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 9, 15));
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        assert_eq!(
            parse_optional_date(&Some("15/09/2026".into())),
            Err(FormError::InvalidDate)
        );
    }
}
