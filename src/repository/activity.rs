use diesel::prelude::*;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository};

impl ActivityReader for DieselRepository {
    fn list_activities(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<(Activity, User)>)> {
        use crate::models::activity::Activity as DbActivity;
        use crate::models::user::User as DbUser;
        use crate::schema::{activities, users};

        let mut conn = self.conn()?;

        let mut count_query = activities::table
            .filter(activities::project_id.eq(query.project_id))
            .count()
            .into_boxed();
        let mut items_query = activities::table
            .inner_join(users::table)
            .filter(activities::project_id.eq(query.project_id))
            .order((activities::created_at.desc(), activities::id.desc()))
            .select((activities::all_columns, users::all_columns))
            .into_boxed();

        if let Some(entity) = &query.entity {
            let entity = entity.to_string();
            count_query = count_query.filter(activities::entity.eq(entity.clone()));
            items_query = items_query.filter(activities::entity.eq(entity));
        }

        let total: i64 = count_query.get_result(&mut conn)?;

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let rows = items_query.load::<(DbActivity, DbUser)>(&mut conn)?;
        let items = rows
            .into_iter()
            .map(|(activity, user)| Ok((activity.into(), user.try_into()?)))
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;

        Ok((total as usize, items))
    }
}

impl ActivityWriter for DieselRepository {
    fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        use crate::models::activity::{Activity as DbActivity, NewActivity as DbNewActivity};
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let insertable: DbNewActivity = activity.into();
        let created = diesel::insert_into(activities::table)
            .values(&insertable)
            .get_result::<DbActivity>(&mut conn)?;

        Ok(created.into())
    }
}
