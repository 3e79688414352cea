use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RemedialStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl RemedialStatus {
    /// Statuses that stamp `resolved_at` on the item.
    pub fn resolves(self) -> bool {
        matches!(self, RemedialStatus::Resolved | RemedialStatus::Closed)
    }
}

impl Display for RemedialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemedialStatus::Open => write!(f, "open"),
            RemedialStatus::InProgress => write!(f, "in-progress"),
            RemedialStatus::Resolved => write!(f, "resolved"),
            RemedialStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for RemedialStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(RemedialStatus::Open),
            "in-progress" => Ok(RemedialStatus::InProgress),
            "resolved" => Ok(RemedialStatus::Resolved),
            "closed" => Ok(RemedialStatus::Closed),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// A defect or snag raised against completed work.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RemedialItem {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub status: RemedialStatus,
    pub priority: Priority,
    pub resolved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewRemedialItem {
    pub project_id: i32,
    pub title: String,
    pub priority: Priority,
}

impl NewRemedialItem {
    #[must_use]
    pub fn new(project_id: i32, title: String, priority: Priority) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolving_statuses() {
        assert!(!RemedialStatus::Open.resolves());
        assert!(!RemedialStatus::InProgress.resolves());
        assert!(RemedialStatus::Resolved.resolves());
        assert!(RemedialStatus::Closed.resolves());
    }

    #[test]
    fn status_and_priority_round_trip() {
        for status in [
            RemedialStatus::Open,
            RemedialStatus::InProgress,
            RemedialStatus::Resolved,
            RemedialStatus::Closed,
        ] {
            assert_eq!(status.to_string().parse::<RemedialStatus>().unwrap(), status);
        }
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
    }
}
