use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
            ScheduleStatus::InProgress => write!(f, "in-progress"),
            ScheduleStatus::Completed => write!(f, "completed"),
            ScheduleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            "in-progress" => Ok(ScheduleStatus::InProgress),
            "completed" => Ok(ScheduleStatus::Completed),
            "cancelled" => Ok(ScheduleStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// A dated entry on the site works calendar.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduleItem {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ScheduleStatus,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewScheduleItem {
    pub project_id: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
}

impl NewScheduleItem {
    #[must_use]
    pub fn new(
        project_id: i32,
        title: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        location: Option<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            start_date,
            end_date,
            location: location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateScheduleItem {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            ScheduleStatus::Scheduled,
            ScheduleStatus::InProgress,
            ScheduleStatus::Completed,
            ScheduleStatus::Cancelled,
        ] {
            assert_eq!(
                status.to_string().parse::<ScheduleStatus>().unwrap(),
                status
            );
        }
        assert!("paused".parse::<ScheduleStatus>().is_err());
    }
}
