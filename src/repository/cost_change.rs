use diesel::prelude::*;

use crate::domain::cost_change::{CostChange, NewCostChange};
use crate::domain::types::ApprovalStatus;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CostChangeReader, CostChangeWriter, DieselRepository};

impl CostChangeReader for DieselRepository {
    fn get_cost_change_by_id(&self, id: i32) -> RepositoryResult<Option<CostChange>> {
        use crate::models::cost_change::CostChange as DbCostChange;
        use crate::schema::cost_changes;

        let mut conn = self.conn()?;
        let change = cost_changes::table
            .find(id)
            .first::<DbCostChange>(&mut conn)
            .optional()?;

        Ok(change.map(CostChange::try_from).transpose()?)
    }

    fn list_cost_changes(&self, project_id: i32) -> RepositoryResult<Vec<CostChange>> {
        use crate::models::cost_change::CostChange as DbCostChange;
        use crate::schema::cost_changes;

        let mut conn = self.conn()?;
        let changes = cost_changes::table
            .filter(cost_changes::project_id.eq(project_id))
            .order((cost_changes::created_at.desc(), cost_changes::id.desc()))
            .load::<DbCostChange>(&mut conn)?
            .into_iter()
            .map(CostChange::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(changes)
    }
}

impl CostChangeWriter for DieselRepository {
    fn create_cost_change(&self, new_change: &NewCostChange) -> RepositoryResult<CostChange> {
        use crate::models::cost_change::{
            CostChange as DbCostChange, NewCostChange as DbNewCostChange,
        };
        use crate::schema::cost_changes;

        let mut conn = self.conn()?;
        let insertable: DbNewCostChange = new_change.into();
        let created = diesel::insert_into(cost_changes::table)
            .values(&insertable)
            .get_result::<DbCostChange>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn set_cost_change_status(
        &self,
        cost_change_id: i32,
        status: ApprovalStatus,
    ) -> RepositoryResult<CostChange> {
        use crate::models::cost_change::CostChange as DbCostChange;
        use crate::schema::cost_changes;

        let mut conn = self.conn()?;
        let updated = diesel::update(cost_changes::table.find(cost_change_id))
            .set(cost_changes::status.eq(status.to_string()))
            .get_result::<DbCostChange>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_cost_change(&self, cost_change_id: i32) -> RepositoryResult<()> {
        use crate::schema::cost_changes;

        let mut conn = self.conn()?;
        diesel::delete(cost_changes::table.find(cost_change_id)).execute(&mut conn)?;

        Ok(())
    }
}
