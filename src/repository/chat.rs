use diesel::prelude::*;

use crate::domain::chat::{ChatMessage, NewChatMessage};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ChatListQuery, ChatReader, ChatWriter, DieselRepository};

impl ChatReader for DieselRepository {
    fn list_chat_messages(
        &self,
        query: ChatListQuery,
    ) -> RepositoryResult<(usize, Vec<(ChatMessage, User)>)> {
        use crate::models::chat::ChatMessage as DbChatMessage;
        use crate::models::user::User as DbUser;
        use crate::schema::{chat_messages, users};

        let mut conn = self.conn()?;

        let total: i64 = chat_messages::table
            .filter(chat_messages::project_id.eq(query.project_id))
            .count()
            .get_result(&mut conn)?;

        let mut items_query = chat_messages::table
            .inner_join(users::table)
            .filter(chat_messages::project_id.eq(query.project_id))
            .order((chat_messages::created_at.desc(), chat_messages::id.desc()))
            .select((chat_messages::all_columns, users::all_columns))
            .into_boxed();

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let rows = items_query.load::<(DbChatMessage, DbUser)>(&mut conn)?;
        let items = rows
            .into_iter()
            .map(|(message, user)| Ok((message.into(), user.try_into()?)))
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;

        Ok((total as usize, items))
    }
}

impl ChatWriter for DieselRepository {
    fn create_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage> {
        use crate::models::chat::{ChatMessage as DbChatMessage, NewChatMessage as DbNewChatMessage};
        use crate::schema::chat_messages;

        let mut conn = self.conn()?;
        let insertable: DbNewChatMessage = message.into();
        let created = diesel::insert_into(chat_messages::table)
            .values(&insertable)
            .get_result::<DbChatMessage>(&mut conn)?;

        Ok(created.into())
    }
}
