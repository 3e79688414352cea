use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::decision::{
    Decision as DomainDecision, NewDecision as DomainNewDecision,
    UpdateDecision as DomainUpdateDecision,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::decisions)]
/// Diesel model for [`crate::domain::decision::Decision`].
pub struct Decision {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub category: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::decisions)]
pub struct NewDecision<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub category: &'a str,
    pub due_date: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::decisions)]
pub struct UpdateDecision<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub due_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Decision> for DomainDecision {
    type Error = TypeConstraintError;

    fn try_from(decision: Decision) -> Result<Self, Self::Error> {
        Ok(Self {
            id: decision.id,
            project_id: decision.project_id,
            title: decision.title,
            category: decision.category,
            status: decision.status.parse()?,
            due_date: decision.due_date,
            created_at: decision.created_at,
            updated_at: decision.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDecision> for NewDecision<'a> {
    fn from(decision: &'a DomainNewDecision) -> Self {
        Self {
            project_id: decision.project_id,
            title: decision.title.as_str(),
            category: decision.category.as_str(),
            due_date: decision.due_date,
        }
    }
}

impl<'a> UpdateDecision<'a> {
    pub fn from_domain(updates: &'a DomainUpdateDecision, updated_at: NaiveDateTime) -> Self {
        Self {
            title: updates.title.as_str(),
            category: updates.category.as_str(),
            due_date: updates.due_date,
            updated_at,
        }
    }
}
