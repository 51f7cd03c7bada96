//! PDF Render Server Library
//!
//! Converts a URL or a piece of HTML into a PDF using headless Chromium,
//! behind a bearer-token guard. The server binary is in main.rs; the
//! router is exposed here so it can be driven in-process by tests.
//!
//! # Modules
//!
//! - `auth`: bearer token guard and extractor
//! - `models`: request bodies and JSON validation
//! - `render`: renderer trait and the Chromium implementation
//! - `routes`: `/health`, `/convert/url`, `/convert/html`

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
