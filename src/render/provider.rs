//! Renderer trait

use async_trait::async_trait;

use super::types::RenderError;
use crate::models::HttpUrl;

/// Turns a page into a complete PDF document.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Navigate to `url`, wait for the network to go idle, export
    async fn render_url(&self, url: &HttpUrl) -> Result<Vec<u8>, RenderError>;

    /// Replace the page content with `html`, wait for the network to go idle, export
    async fn render_html(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}
