use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::drawing::{Drawing as DomainDrawing, NewDrawing as DomainNewDrawing};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::drawings)]
/// Diesel model for [`crate::domain::drawing::Drawing`].
pub struct Drawing {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub file_url: String,
    pub file_name: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::drawings)]
pub struct NewDrawing<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub file_url: &'a str,
    pub file_name: &'a str,
    pub created_by: i32,
}

impl From<Drawing> for DomainDrawing {
    fn from(drawing: Drawing) -> Self {
        Self {
            id: drawing.id,
            project_id: drawing.project_id,
            title: drawing.title,
            file_url: drawing.file_url,
            file_name: drawing.file_name,
            created_by: drawing.created_by,
            created_at: drawing.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewDrawing> for NewDrawing<'a> {
    fn from(drawing: &'a DomainNewDrawing) -> Self {
        Self {
            project_id: drawing.project_id,
            title: drawing.title.as_str(),
            file_url: drawing.file_url.as_str(),
            file_name: drawing.file_name.as_str(),
            created_by: drawing.created_by,
        }
    }
}
