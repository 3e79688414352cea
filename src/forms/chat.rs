use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;

#[derive(MultipartForm)]
/// Form data for posting a chat message with optional photos.
pub struct SendMessageForm {
    pub content: Text<String>,
    #[multipart(limit = "10MB")]
    pub photos: Vec<TempFile>,
}
