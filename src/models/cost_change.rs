use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cost_change::{
    CostChange as DomainCostChange, NewCostChange as DomainNewCostChange,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::cost_changes)]
/// Diesel model for [`crate::domain::cost_change::CostChange`].
pub struct CostChange {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub original_cost: i64,
    pub new_cost: i64,
    pub status: String,
    pub estimated_days: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cost_changes)]
pub struct NewCostChange<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub original_cost: i64,
    pub new_cost: i64,
    pub estimated_days: i32,
}

impl TryFrom<CostChange> for DomainCostChange {
    type Error = TypeConstraintError;

    fn try_from(change: CostChange) -> Result<Self, Self::Error> {
        Ok(Self {
            id: change.id,
            project_id: change.project_id,
            title: change.title,
            original_cost: change.original_cost,
            new_cost: change.new_cost,
            status: change.status.parse()?,
            estimated_days: change.estimated_days,
            created_at: change.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCostChange> for NewCostChange<'a> {
    fn from(change: &'a DomainNewCostChange) -> Self {
        Self {
            project_id: change.project_id,
            title: change.title.as_str(),
            original_cost: change.original_cost,
            new_cost: change.new_cost,
            estimated_days: change.estimated_days,
        }
    }
}
