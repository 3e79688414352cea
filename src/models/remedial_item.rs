use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::remedial_item::{
    NewRemedialItem as DomainNewRemedialItem, RemedialItem as DomainRemedialItem,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::remedial_items)]
/// Diesel model for [`crate::domain::remedial_item::RemedialItem`].
pub struct RemedialItem {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub resolved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::remedial_items)]
pub struct NewRemedialItem<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub priority: String,
}

impl TryFrom<RemedialItem> for DomainRemedialItem {
    type Error = TypeConstraintError;

    fn try_from(item: RemedialItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id,
            project_id: item.project_id,
            title: item.title,
            status: item.status.parse()?,
            priority: item.priority.parse()?,
            resolved_at: item.resolved_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewRemedialItem> for NewRemedialItem<'a> {
    fn from(item: &'a DomainNewRemedialItem) -> Self {
        Self {
            project_id: item.project_id,
            title: item.title.as_str(),
            priority: item.priority.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::remedial_item::{Priority, RemedialStatus};
    use chrono::Utc;

    #[test]
    fn item_into_domain_parses_status_and_priority() {
        let now = Utc::now().naive_utc();
        let db_item = RemedialItem {
            id: 1,
            project_id: 2,
            title: "Cracked tile".into(),
            status: "resolved".into(),
            priority: "high".into(),
            resolved_at: Some(now),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainRemedialItem = db_item.try_into().unwrap();
        assert_eq!(domain.status, RemedialStatus::Resolved);
        assert_eq!(domain.priority, Priority::High);
        assert!(domain.resolved_at.is_some());
    }
}
