use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompletionPercent, TypeConstraintError};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
    Delayed,
}

impl Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneStatus::Upcoming => write!(f, "upcoming"),
            MilestoneStatus::InProgress => write!(f, "in-progress"),
            MilestoneStatus::Completed => write!(f, "completed"),
            MilestoneStatus::Delayed => write!(f, "delayed"),
        }
    }
}

impl FromStr for MilestoneStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(MilestoneStatus::Upcoming),
            "in-progress" => Ok(MilestoneStatus::InProgress),
            "completed" => Ok(MilestoneStatus::Completed),
            "delayed" => Ok(MilestoneStatus::Delayed),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

impl MilestoneStatus {
    /// Derives the status that corresponds to a new completion percentage.
    ///
    /// Full completion always wins. A delayed milestone stays delayed until it
    /// reaches 100%; any other partial progress means in-progress, and zero
    /// progress resets to upcoming.
    pub fn derive(previous: MilestoneStatus, percentage: CompletionPercent) -> MilestoneStatus {
        match percentage.get() {
            100 => MilestoneStatus::Completed,
            p if p > 0 && previous == MilestoneStatus::Delayed => MilestoneStatus::Delayed,
            p if p > 0 => MilestoneStatus::InProgress,
            _ => MilestoneStatus::Upcoming,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    pub completion_percentage: i32,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewMilestone {
    pub project_id: i32,
    pub title: String,
    pub due_date: NaiveDate,
    pub sort_order: i32,
}

impl NewMilestone {
    #[must_use]
    pub fn new(project_id: i32, title: String, due_date: NaiveDate, sort_order: i32) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            due_date,
            sort_order,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateMilestone {
    pub title: String,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: i32) -> CompletionPercent {
        CompletionPercent::new(p).unwrap()
    }

    #[test]
    fn full_completion_always_completes() {
        for previous in [
            MilestoneStatus::Upcoming,
            MilestoneStatus::InProgress,
            MilestoneStatus::Completed,
            MilestoneStatus::Delayed,
        ] {
            assert_eq!(
                MilestoneStatus::derive(previous, pct(100)),
                MilestoneStatus::Completed
            );
        }
    }

    #[test]
    fn delayed_is_preserved_below_full_completion() {
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::Delayed, pct(1)),
            MilestoneStatus::Delayed
        );
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::Delayed, pct(99)),
            MilestoneStatus::Delayed
        );
    }

    #[test]
    fn partial_progress_means_in_progress() {
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::Upcoming, pct(1)),
            MilestoneStatus::InProgress
        );
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::Completed, pct(50)),
            MilestoneStatus::InProgress
        );
    }

    #[test]
    fn zero_progress_resets_to_upcoming() {
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::InProgress, pct(0)),
            MilestoneStatus::Upcoming
        );
        assert_eq!(
            MilestoneStatus::derive(MilestoneStatus::Delayed, pct(0)),
            MilestoneStatus::Upcoming
        );
    }

    #[test]
    fn status_round_trip() {
        for status in [
            MilestoneStatus::Upcoming,
            MilestoneStatus::InProgress,
            MilestoneStatus::Completed,
            MilestoneStatus::Delayed,
        ] {
            assert_eq!(
                status.to_string().parse::<MilestoneStatus>().unwrap(),
                status
            );
        }
    }
}
