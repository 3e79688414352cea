use diesel::prelude::*;

use crate::domain::schedule_item::{
    NewScheduleItem, ScheduleItem, ScheduleStatus, UpdateScheduleItem,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ScheduleReader, ScheduleWriter};

impl ScheduleReader for DieselRepository {
    fn get_schedule_item_by_id(&self, id: i32) -> RepositoryResult<Option<ScheduleItem>> {
        use crate::models::schedule_item::ScheduleItem as DbScheduleItem;
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        let item = schedule_items::table
            .find(id)
            .first::<DbScheduleItem>(&mut conn)
            .optional()?;

        Ok(item.map(ScheduleItem::try_from).transpose()?)
    }

    fn list_schedule_items(&self, project_id: i32) -> RepositoryResult<Vec<ScheduleItem>> {
        use crate::models::schedule_item::ScheduleItem as DbScheduleItem;
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        let items = schedule_items::table
            .filter(schedule_items::project_id.eq(project_id))
            .order((schedule_items::start_date.asc(), schedule_items::id.asc()))
            .load::<DbScheduleItem>(&mut conn)?
            .into_iter()
            .map(ScheduleItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

impl ScheduleWriter for DieselRepository {
    fn create_schedule_item(&self, new_item: &NewScheduleItem) -> RepositoryResult<ScheduleItem> {
        use crate::models::schedule_item::{
            NewScheduleItem as DbNewScheduleItem, ScheduleItem as DbScheduleItem,
        };
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        let insertable: DbNewScheduleItem = new_item.into();
        let created = diesel::insert_into(schedule_items::table)
            .values(&insertable)
            .get_result::<DbScheduleItem>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_schedule_item(
        &self,
        item_id: i32,
        updates: &UpdateScheduleItem,
    ) -> RepositoryResult<ScheduleItem> {
        use crate::models::schedule_item::{
            ScheduleItem as DbScheduleItem, UpdateScheduleItem as DbUpdateScheduleItem,
        };
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateScheduleItem = updates.into();

        let updated = diesel::update(schedule_items::table.find(item_id))
            .set(&db_updates)
            .get_result::<DbScheduleItem>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_schedule_item_status(
        &self,
        item_id: i32,
        status: ScheduleStatus,
    ) -> RepositoryResult<ScheduleItem> {
        use crate::models::schedule_item::ScheduleItem as DbScheduleItem;
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        let updated = diesel::update(schedule_items::table.find(item_id))
            .set(schedule_items::status.eq(status.to_string()))
            .get_result::<DbScheduleItem>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_schedule_item(&self, item_id: i32) -> RepositoryResult<()> {
        use crate::schema::schedule_items;

        let mut conn = self.conn()?;
        diesel::delete(schedule_items::table.find(item_id)).execute(&mut conn)?;

        Ok(())
    }
}
