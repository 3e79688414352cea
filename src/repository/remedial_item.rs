use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::remedial_item::{NewRemedialItem, RemedialItem, RemedialStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, RemedialReader, RemedialWriter};

impl RemedialReader for DieselRepository {
    fn get_remedial_item_by_id(&self, id: i32) -> RepositoryResult<Option<RemedialItem>> {
        use crate::models::remedial_item::RemedialItem as DbRemedialItem;
        use crate::schema::remedial_items;

        let mut conn = self.conn()?;
        let item = remedial_items::table
            .find(id)
            .first::<DbRemedialItem>(&mut conn)
            .optional()?;

        Ok(item.map(RemedialItem::try_from).transpose()?)
    }

    fn list_remedial_items(&self, project_id: i32) -> RepositoryResult<Vec<RemedialItem>> {
        use crate::models::remedial_item::RemedialItem as DbRemedialItem;
        use crate::schema::remedial_items;

        let mut conn = self.conn()?;
        let items = remedial_items::table
            .filter(remedial_items::project_id.eq(project_id))
            .order((remedial_items::created_at.desc(), remedial_items::id.desc()))
            .load::<DbRemedialItem>(&mut conn)?
            .into_iter()
            .map(RemedialItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

impl RemedialWriter for DieselRepository {
    fn create_remedial_item(&self, new_item: &NewRemedialItem) -> RepositoryResult<RemedialItem> {
        use crate::models::remedial_item::{
            NewRemedialItem as DbNewRemedialItem, RemedialItem as DbRemedialItem,
        };
        use crate::schema::remedial_items;

        let mut conn = self.conn()?;
        let insertable: DbNewRemedialItem = new_item.into();
        let created = diesel::insert_into(remedial_items::table)
            .values(&insertable)
            .get_result::<DbRemedialItem>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn set_remedial_item_status(
        &self,
        item_id: i32,
        status: RemedialStatus,
        resolved_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<RemedialItem> {
        use crate::models::remedial_item::RemedialItem as DbRemedialItem;
        use crate::schema::remedial_items;

        let mut conn = self.conn()?;
        let updated = diesel::update(remedial_items::table.find(item_id))
            .set((
                remedial_items::status.eq(status.to_string()),
                remedial_items::resolved_at.eq(resolved_at),
                remedial_items::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbRemedialItem>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_remedial_item(&self, item_id: i32) -> RepositoryResult<()> {
        use crate::schema::remedial_items;

        let mut conn = self.conn()?;
        diesel::delete(remedial_items::table.find(item_id)).execute(&mut conn)?;

        Ok(())
    }
}
