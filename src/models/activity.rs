//! Diesel models for the audit activity feed.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::activities)]
pub struct Activity {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub entity: String,
    pub action: String,
    pub details: String, // store JSON text in the DB
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity {
    pub project_id: i32,
    pub user_id: i32,
    pub entity: String,
    pub action: String,
    pub details: String,
}

impl From<Activity> for DomainActivity {
    fn from(activity: Activity) -> Self {
        let details = serde_json::from_str(&activity.details).unwrap_or_default();

        Self {
            id: activity.id,
            project_id: activity.project_id,
            user_id: activity.user_id,
            entity: activity.entity.as_str().into(),
            action: activity.action.as_str().into(),
            details,
            created_at: activity.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            project_id: activity.project_id,
            user_id: activity.user_id,
            entity: activity.entity.to_string(),
            action: activity.action.to_string(),
            details: activity.details.to_string(),
        }
    }
}

impl From<DomainNewActivity> for NewActivity {
    fn from(activity: DomainNewActivity) -> Self {
        Self::from(&activity)
    }
}
