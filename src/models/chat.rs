//! Diesel models for the project chat feed.
//!
//! Photo URLs are stored as JSON text in the DB.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chat::{ChatMessage as DomainChatMessage, NewChatMessage as DomainNewChatMessage};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::chat_messages)]
pub struct ChatMessage {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub content: String,
    pub photo_urls: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_messages)]
pub struct NewChatMessage<'a> {
    pub project_id: i32,
    pub user_id: i32,
    pub content: &'a str,
    pub photo_urls: String,
}

impl From<ChatMessage> for DomainChatMessage {
    fn from(message: ChatMessage) -> Self {
        let photo_urls = serde_json::from_str(&message.photo_urls).unwrap_or_default();

        Self {
            id: message.id,
            project_id: message.project_id,
            user_id: message.user_id,
            content: message.content,
            photo_urls,
            created_at: message.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewChatMessage> for NewChatMessage<'a> {
    fn from(message: &'a DomainNewChatMessage) -> Self {
        Self {
            project_id: message.project_id,
            user_id: message.user_id,
            content: message.content.as_str(),
            photo_urls: serde_json::to_string(&message.photo_urls).unwrap_or_else(|_| "[]".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn photo_urls_round_trip_through_json_text() {
        let domain = DomainNewChatMessage::new(
            1,
            2,
            "slab poured".into(),
            vec!["/uploads/a.jpg".into(), "/uploads/b.jpg".into()],
        )
        .unwrap();
        let db: NewChatMessage = (&domain).into();
        assert_eq!(db.photo_urls, r#"["/uploads/a.jpg","/uploads/b.jpg"]"#);

        let row = ChatMessage {
            id: 1,
            project_id: 1,
            user_id: 2,
            content: "slab poured".into(),
            photo_urls: db.photo_urls.clone(),
            created_at: Utc::now().naive_utc(),
        };
        let back: DomainChatMessage = row.into();
        assert_eq!(back.photo_urls.len(), 2);
    }

    #[test]
    fn malformed_photo_urls_default_to_empty() {
        let row = ChatMessage {
            id: 1,
            project_id: 1,
            user_id: 2,
            content: "hi".into(),
            photo_urls: "not-json".into(),
            created_at: Utc::now().naive_utc(),
        };
        let domain: DomainChatMessage = row.into();
        assert!(domain.photo_urls.is_empty());
    }
}
