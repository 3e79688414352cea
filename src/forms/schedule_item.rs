use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::schedule_item::{NewScheduleItem, UpdateScheduleItem};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for adding an entry to the works calendar.
pub struct AddScheduleItemForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
}

impl AddScheduleItemForm {
    pub fn to_new_schedule_item(&self, project_id: i32) -> Result<NewScheduleItem, FormError> {
        if self.end_date < self.start_date {
            return Err(FormError::InvalidDateRange);
        }
        Ok(NewScheduleItem::new(
            project_id,
            self.title.clone(),
            self.start_date,
            self.end_date,
            self.location.clone(),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a calendar entry.
pub struct SaveScheduleItemForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
}

impl SaveScheduleItemForm {
    pub fn to_update_schedule_item(&self) -> Result<UpdateScheduleItem, FormError> {
        if self.end_date < self.start_date {
            return Err(FormError::InvalidDateRange);
        }
        Ok(UpdateScheduleItem {
            title: self.title.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            location: self
                .location
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Deserialize)]
/// Form data for setting a calendar entry's status.
pub struct ScheduleStatusForm {
    pub id: i32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_before_start_is_rejected() {
        let form = AddScheduleItemForm {
            title: "Roofing".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            location: None,
        };
        assert!(matches!(
            form.to_new_schedule_item(1),
            Err(FormError::InvalidDateRange)
        ));
    }

    #[test]
    fn single_day_entries_are_allowed() {
        let day = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let form = AddScheduleItemForm {
            title: "Inspection".into(),
            start_date: day,
            end_date: day,
            location: Some("Site office".into()),
        };
        let item = form.to_new_schedule_item(1).unwrap();
        assert_eq!(item.start_date, item.end_date);
        assert_eq!(item.location.as_deref(), Some("Site office"));
    }
}
