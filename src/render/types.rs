//! Render types

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use thiserror::Error;

/// Leading bytes of every PDF document
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Rendering errors
///
/// Each variant carries the browser driver's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Page creation failed: {0}")]
    Page(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Setting page content failed: {0}")]
    Content(String),

    #[error("PDF export failed: {0}")]
    Export(String),
}

/// A4 paper, in inches
pub const A4_INCHES: (f64, f64) = (8.27, 11.7);

/// Options applied to every export: fixed A4, backgrounds on, no margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    pub paper_width: f64,
    pub paper_height: f64,
    pub print_background: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            paper_width: A4_INCHES.0,
            paper_height: A4_INCHES.1,
            print_background: true,
        }
    }
}

impl PdfOptions {
    /// Convert to DevTools `Page.printToPDF` parameters
    pub fn to_params(&self) -> PrintToPdfParams {
        PrintToPdfParams {
            print_background: Some(self.print_background),
            paper_width: Some(self.paper_width),
            paper_height: Some(self.paper_height),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            prefer_css_page_size: Some(false),
            ..Default::default()
        }
    }
}

/// Reject buffers that are not a PDF document
pub fn ensure_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(bytes)
    } else {
        Err(RenderError::Export(format!(
            "browser returned {} bytes without a PDF header",
            bytes.len()
        )))
    }
}
