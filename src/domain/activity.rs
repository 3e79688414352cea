use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Audit-log row written after each mutation, shown in the history feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub entity: ActivityEntity,
    pub action: ActivityAction,
    pub details: Value,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEntity {
    Project,
    Product,
    Milestone,
    Decision,
    CostChange,
    ScheduleItem,
    RemedialItem,
    Drawing,
    ChatMessage,
    Other(String),
}

impl Display for ActivityEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityEntity::Project => write!(f, "project"),
            ActivityEntity::Product => write!(f, "product"),
            ActivityEntity::Milestone => write!(f, "milestone"),
            ActivityEntity::Decision => write!(f, "decision"),
            ActivityEntity::CostChange => write!(f, "cost_change"),
            ActivityEntity::ScheduleItem => write!(f, "schedule_item"),
            ActivityEntity::RemedialItem => write!(f, "remedial_item"),
            ActivityEntity::Drawing => write!(f, "drawing"),
            ActivityEntity::ChatMessage => write!(f, "chat_message"),
            ActivityEntity::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ActivityEntity {
    fn from(s: &str) -> Self {
        match s {
            "project" => ActivityEntity::Project,
            "product" => ActivityEntity::Product,
            "milestone" => ActivityEntity::Milestone,
            "decision" => ActivityEntity::Decision,
            "cost_change" => ActivityEntity::CostChange,
            "schedule_item" => ActivityEntity::ScheduleItem,
            "remedial_item" => ActivityEntity::RemedialItem,
            "drawing" => ActivityEntity::Drawing,
            "chat_message" => ActivityEntity::ChatMessage,
            _ => ActivityEntity::Other(s.to_string()),
        }
    }
}

impl From<String> for ActivityEntity {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
    StatusChanged,
    Other(String),
}

impl Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityAction::Created => write!(f, "created"),
            ActivityAction::Updated => write!(f, "updated"),
            ActivityAction::Deleted => write!(f, "deleted"),
            ActivityAction::StatusChanged => write!(f, "status_changed"),
            ActivityAction::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ActivityAction {
    fn from(s: &str) -> Self {
        match s {
            "created" => ActivityAction::Created,
            "updated" => ActivityAction::Updated,
            "deleted" => ActivityAction::Deleted,
            "status_changed" => ActivityAction::StatusChanged,
            _ => ActivityAction::Other(s.to_string()),
        }
    }
}

impl From<String> for ActivityAction {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug)]
pub struct NewActivity {
    pub project_id: i32,
    pub user_id: i32,
    pub entity: ActivityEntity,
    pub action: ActivityAction,
    pub details: Value,
}

impl NewActivity {
    #[must_use]
    pub fn new(
        project_id: i32,
        user_id: i32,
        entity: ActivityEntity,
        action: ActivityAction,
        details: Value,
    ) -> Self {
        Self {
            project_id,
            user_id,
            entity,
            action,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_round_trip() {
        for entity in [
            ActivityEntity::Project,
            ActivityEntity::Product,
            ActivityEntity::Milestone,
            ActivityEntity::CostChange,
            ActivityEntity::ChatMessage,
        ] {
            assert_eq!(ActivityEntity::from(entity.to_string()), entity);
        }
        assert_eq!(
            ActivityEntity::from("inspection"),
            ActivityEntity::Other("inspection".to_string())
        );
    }

    #[test]
    fn action_round_trip() {
        for action in [
            ActivityAction::Created,
            ActivityAction::Updated,
            ActivityAction::Deleted,
            ActivityAction::StatusChanged,
        ] {
            assert_eq!(ActivityAction::from(action.to_string()), action);
        }
    }
}
