use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An uploaded plan or drawing, stored on disk and served by URL.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Drawing {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub file_url: String,
    /// Original file name, kept for display.
    pub file_name: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDrawing {
    pub project_id: i32,
    pub title: String,
    pub file_url: String,
    pub file_name: String,
    pub created_by: i32,
}

impl NewDrawing {
    #[must_use]
    pub fn new(
        project_id: i32,
        title: String,
        file_url: String,
        file_name: String,
        created_by: i32,
    ) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            file_url,
            file_name,
            created_by,
        }
    }
}
