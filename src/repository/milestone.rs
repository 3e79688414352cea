use chrono::Utc;
use diesel::prelude::*;

use crate::domain::milestone::{Milestone, MilestoneStatus, NewMilestone, UpdateMilestone};
use crate::domain::types::CompletionPercent;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, MilestoneReader, MilestoneWriter};

impl MilestoneReader for DieselRepository {
    fn get_milestone_by_id(&self, id: i32) -> RepositoryResult<Option<Milestone>> {
        use crate::models::milestone::Milestone as DbMilestone;
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let milestone = milestones::table
            .find(id)
            .first::<DbMilestone>(&mut conn)
            .optional()?;

        Ok(milestone.map(Milestone::try_from).transpose()?)
    }

    fn list_milestones(&self, project_id: i32) -> RepositoryResult<Vec<Milestone>> {
        use crate::models::milestone::Milestone as DbMilestone;
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let milestones = milestones::table
            .filter(milestones::project_id.eq(project_id))
            .order((milestones::sort_order.asc(), milestones::id.asc()))
            .load::<DbMilestone>(&mut conn)?
            .into_iter()
            .map(Milestone::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(milestones)
    }
}

impl MilestoneWriter for DieselRepository {
    fn create_milestone(&self, new_milestone: &NewMilestone) -> RepositoryResult<Milestone> {
        use crate::models::milestone::{Milestone as DbMilestone, NewMilestone as DbNewMilestone};
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let insertable: DbNewMilestone = new_milestone.into();
        let created = diesel::insert_into(milestones::table)
            .values(&insertable)
            .get_result::<DbMilestone>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_milestone(
        &self,
        milestone_id: i32,
        updates: &UpdateMilestone,
    ) -> RepositoryResult<Milestone> {
        use crate::models::milestone::{
            Milestone as DbMilestone, UpdateMilestone as DbUpdateMilestone,
        };
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateMilestone::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(milestones::table.find(milestone_id))
            .set(&db_updates)
            .get_result::<DbMilestone>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_milestone_progress(
        &self,
        milestone_id: i32,
        percentage: CompletionPercent,
        status: MilestoneStatus,
    ) -> RepositoryResult<Milestone> {
        use crate::models::milestone::Milestone as DbMilestone;
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let updated = diesel::update(milestones::table.find(milestone_id))
            .set((
                milestones::completion_percentage.eq(percentage.get()),
                milestones::status.eq(status.to_string()),
                milestones::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbMilestone>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn reorder_milestones(&self, project_id: i32, ordered_ids: &[i32]) -> RepositoryResult<usize> {
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        let updated = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut updated = 0;
            for (position, milestone_id) in ordered_ids.iter().enumerate() {
                updated += diesel::update(
                    milestones::table
                        .filter(milestones::id.eq(milestone_id))
                        .filter(milestones::project_id.eq(project_id)),
                )
                .set(milestones::sort_order.eq(position as i32))
                .execute(conn)?;
            }
            Ok(updated)
        })?;

        Ok(updated)
    }

    fn delete_milestone(&self, milestone_id: i32) -> RepositoryResult<()> {
        use crate::schema::milestones;

        let mut conn = self.conn()?;
        diesel::delete(milestones::table.find(milestone_id)).execute(&mut conn)?;

        Ok(())
    }
}
