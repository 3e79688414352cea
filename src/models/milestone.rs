use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::milestone::{
    Milestone as DomainMilestone, NewMilestone as DomainNewMilestone,
    UpdateMilestone as DomainUpdateMilestone,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::milestones)]
/// Diesel model for [`crate::domain::milestone::Milestone`].
pub struct Milestone {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub completion_percentage: i32,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::milestones)]
pub struct NewMilestone<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub due_date: NaiveDate,
    pub sort_order: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::milestones)]
pub struct UpdateMilestone<'a> {
    pub title: &'a str,
    pub due_date: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Milestone> for DomainMilestone {
    type Error = TypeConstraintError;

    fn try_from(milestone: Milestone) -> Result<Self, Self::Error> {
        Ok(Self {
            id: milestone.id,
            project_id: milestone.project_id,
            title: milestone.title,
            due_date: milestone.due_date,
            status: milestone.status.parse()?,
            completion_percentage: milestone.completion_percentage,
            sort_order: milestone.sort_order,
            created_at: milestone.created_at,
            updated_at: milestone.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewMilestone> for NewMilestone<'a> {
    fn from(milestone: &'a DomainNewMilestone) -> Self {
        Self {
            project_id: milestone.project_id,
            title: milestone.title.as_str(),
            due_date: milestone.due_date,
            sort_order: milestone.sort_order,
        }
    }
}

impl<'a> UpdateMilestone<'a> {
    pub fn from_domain(updates: &'a DomainUpdateMilestone, updated_at: NaiveDateTime) -> Self {
        Self {
            title: updates.title.as_str(),
            due_date: updates.due_date,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::milestone::MilestoneStatus;
    use chrono::Utc;

    #[test]
    fn milestone_into_domain_parses_status() {
        let now = Utc::now().naive_utc();
        let db_milestone = Milestone {
            id: 1,
            project_id: 2,
            title: "Frame complete".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: "in-progress".into(),
            completion_percentage: 40,
            sort_order: 2,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainMilestone = db_milestone.try_into().unwrap();
        assert_eq!(domain.status, MilestoneStatus::InProgress);
        assert_eq!(domain.completion_percentage, 40);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let now = Utc::now().naive_utc();
        let db_milestone = Milestone {
            id: 1,
            project_id: 2,
            title: "Frame complete".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: "stalled".into(),
            completion_percentage: 0,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainMilestone::try_from(db_milestone).is_err());
    }
}
