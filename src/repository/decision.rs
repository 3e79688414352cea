use chrono::Utc;
use diesel::prelude::*;

use crate::domain::decision::{Decision, NewDecision, UpdateDecision};
use crate::domain::types::ApprovalStatus;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DecisionReader, DecisionWriter, DieselRepository};

impl DecisionReader for DieselRepository {
    fn get_decision_by_id(&self, id: i32) -> RepositoryResult<Option<Decision>> {
        use crate::models::decision::Decision as DbDecision;
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        let decision = decisions::table
            .find(id)
            .first::<DbDecision>(&mut conn)
            .optional()?;

        Ok(decision.map(Decision::try_from).transpose()?)
    }

    fn list_decisions(&self, project_id: i32) -> RepositoryResult<Vec<Decision>> {
        use crate::models::decision::Decision as DbDecision;
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        let decisions = decisions::table
            .filter(decisions::project_id.eq(project_id))
            .order((decisions::created_at.desc(), decisions::id.desc()))
            .load::<DbDecision>(&mut conn)?
            .into_iter()
            .map(Decision::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(decisions)
    }
}

impl DecisionWriter for DieselRepository {
    fn create_decision(&self, new_decision: &NewDecision) -> RepositoryResult<Decision> {
        use crate::models::decision::{Decision as DbDecision, NewDecision as DbNewDecision};
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        let insertable: DbNewDecision = new_decision.into();
        let created = diesel::insert_into(decisions::table)
            .values(&insertable)
            .get_result::<DbDecision>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_decision(
        &self,
        decision_id: i32,
        updates: &UpdateDecision,
    ) -> RepositoryResult<Decision> {
        use crate::models::decision::{Decision as DbDecision, UpdateDecision as DbUpdateDecision};
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateDecision::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(decisions::table.find(decision_id))
            .set(&db_updates)
            .get_result::<DbDecision>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_decision_status(
        &self,
        decision_id: i32,
        status: ApprovalStatus,
    ) -> RepositoryResult<Decision> {
        use crate::models::decision::Decision as DbDecision;
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        let updated = diesel::update(decisions::table.find(decision_id))
            .set((
                decisions::status.eq(status.to_string()),
                decisions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbDecision>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_decision(&self, decision_id: i32) -> RepositoryResult<()> {
        use crate::schema::decisions;

        let mut conn = self.conn()?;
        diesel::delete(decisions::table.find(decision_id)).execute(&mut conn)?;

        Ok(())
    }
}
