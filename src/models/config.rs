//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Directory where uploaded product images and drawings are stored.
    pub uploads_dir: String,
    /// Secret used for session cookies and signed tokens.
    pub secret: String,
}
