use diesel::prelude::*;

use crate::domain::drawing::{Drawing, NewDrawing};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, DrawingReader, DrawingWriter};

impl DrawingReader for DieselRepository {
    fn get_drawing_by_id(&self, id: i32) -> RepositoryResult<Option<Drawing>> {
        use crate::models::drawing::Drawing as DbDrawing;
        use crate::schema::drawings;

        let mut conn = self.conn()?;
        let drawing = drawings::table
            .find(id)
            .first::<DbDrawing>(&mut conn)
            .optional()?;

        Ok(drawing.map(Into::into))
    }

    fn list_drawings(&self, project_id: i32) -> RepositoryResult<Vec<Drawing>> {
        use crate::models::drawing::Drawing as DbDrawing;
        use crate::schema::drawings;

        let mut conn = self.conn()?;
        let drawings = drawings::table
            .filter(drawings::project_id.eq(project_id))
            .order((drawings::created_at.desc(), drawings::id.desc()))
            .load::<DbDrawing>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(drawings)
    }
}

impl DrawingWriter for DieselRepository {
    fn create_drawing(&self, new_drawing: &NewDrawing) -> RepositoryResult<Drawing> {
        use crate::models::drawing::{Drawing as DbDrawing, NewDrawing as DbNewDrawing};
        use crate::schema::drawings;

        let mut conn = self.conn()?;
        let insertable: DbNewDrawing = new_drawing.into();
        let created = diesel::insert_into(drawings::table)
            .values(&insertable)
            .get_result::<DbDrawing>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_drawing(&self, drawing_id: i32) -> RepositoryResult<()> {
        use crate::schema::drawings;

        let mut conn = self.conn()?;
        diesel::delete(drawings::table.find(drawing_id)).execute(&mut conn)?;

        Ok(())
    }
}
