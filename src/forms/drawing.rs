use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;

#[derive(MultipartForm)]
/// Form data for uploading a drawing file.
pub struct UploadDrawingForm {
    pub title: Text<String>,
    #[multipart(limit = "25MB")]
    pub file: TempFile,
}
