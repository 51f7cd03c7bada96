//! Application state management

use std::sync::Arc;

use crate::auth::TokenGuard;
use crate::config::Config;
use crate::render::{ChromiumRenderer, PdfRenderer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    guard: TokenGuard,
    renderer: Arc<dyn PdfRenderer>,
}

impl AppState {
    /// Create state that renders with headless Chromium
    pub fn new(config: Config) -> Self {
        let renderer = Arc::new(ChromiumRenderer::new(config.browser.clone()));
        Self::with_renderer(config, renderer)
    }

    /// Create state with a specific renderer
    pub fn with_renderer(config: Config, renderer: Arc<dyn PdfRenderer>) -> Self {
        let guard = TokenGuard::new(&config.auth.api_token);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                guard,
                renderer,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the authorization guard
    pub fn guard(&self) -> &TokenGuard {
        &self.inner.guard
    }

    /// Get the PDF renderer
    pub fn renderer(&self) -> &dyn PdfRenderer {
        self.inner.renderer.as_ref()
    }
}
