use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::schedule_item::{
    NewScheduleItem as DomainNewScheduleItem, ScheduleItem as DomainScheduleItem,
    UpdateScheduleItem as DomainUpdateScheduleItem,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::schedule_items)]
/// Diesel model for [`crate::domain::schedule_item::ScheduleItem`].
pub struct ScheduleItem {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::schedule_items)]
pub struct NewScheduleItem<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::schedule_items)]
pub struct UpdateScheduleItem<'a> {
    pub title: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<&'a str>,
}

impl TryFrom<ScheduleItem> for DomainScheduleItem {
    type Error = TypeConstraintError;

    fn try_from(item: ScheduleItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id,
            project_id: item.project_id,
            title: item.title,
            start_date: item.start_date,
            end_date: item.end_date,
            status: item.status.parse()?,
            location: item.location,
            created_at: item.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewScheduleItem> for NewScheduleItem<'a> {
    fn from(item: &'a DomainNewScheduleItem) -> Self {
        Self {
            project_id: item.project_id,
            title: item.title.as_str(),
            start_date: item.start_date,
            end_date: item.end_date,
            location: item.location.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateScheduleItem> for UpdateScheduleItem<'a> {
    fn from(updates: &'a DomainUpdateScheduleItem) -> Self {
        Self {
            title: updates.title.as_str(),
            start_date: updates.start_date,
            end_date: updates.end_date,
            location: updates.location.as_deref(),
        }
    }
}
