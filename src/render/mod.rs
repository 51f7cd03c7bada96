//! Render engine adapter
//!
//! The HTTP layer talks to [`PdfRenderer`]; production uses
//! [`ChromiumRenderer`], which drives a headless browser over the
//! DevTools protocol.

mod chromium;
mod idle;
mod provider;
mod types;

pub use chromium::ChromiumRenderer;
pub use provider::PdfRenderer;
pub use types::{PdfOptions, RenderError};
