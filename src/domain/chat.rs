use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ChatBody, TypeConstraintError};

/// A message on the project chat feed, optionally carrying photo URLs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub content: String,
    pub photo_urls: Vec<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewChatMessage {
    pub project_id: i32,
    pub user_id: i32,
    pub content: String,
    pub photo_urls: Vec<String>,
}

impl NewChatMessage {
    /// Sanitizes the body before it reaches storage.
    pub fn new(
        project_id: i32,
        user_id: i32,
        content: String,
        photo_urls: Vec<String>,
    ) -> Result<Self, TypeConstraintError> {
        let body = ChatBody::new(content)?;
        Ok(Self {
            project_id,
            user_id,
            content: body.into_inner(),
            photo_urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_stripped_from_new_messages() {
        let message =
            NewChatMessage::new(1, 2, "<b>plaster</b> done <script>x()</script>".into(), vec![])
                .unwrap();
        assert_eq!(message.content, "<b>plaster</b> done ".trim_end());
    }

    #[test]
    fn empty_messages_are_rejected() {
        assert!(NewChatMessage::new(1, 2, "  ".into(), vec![]).is_err());
    }
}
