//! Headless Chromium renderer
//!
//! Every render launches its own browser with its own profile directory,
//! loads exactly one page, prints it and tears the browser down again.
//! Nothing is shared between requests.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as DriverConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use super::idle::NetworkIdle;
use super::provider::PdfRenderer;
use super::types::{ensure_pdf, PdfOptions, RenderError};
use crate::config::BrowserConfig;
use crate::models::HttpUrl;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// What to load into the page
#[derive(Debug, Clone, Copy)]
enum PageSource<'a> {
    Url(&'a HttpUrl),
    Html(&'a str),
}

/// Renderer backed by a fresh headless Chromium per call
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    config: BrowserConfig,
    options: PdfOptions,
}

impl ChromiumRenderer {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            options: PdfOptions::default(),
        }
    }

    async fn render(&self, source: PageSource<'_>) -> Result<Vec<u8>, RenderError> {
        let session = BrowserSession::launch(&self.config).await?;
        render_with(session, source, &self.config, &self.options).await
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render_url(&self, url: &HttpUrl) -> Result<Vec<u8>, RenderError> {
        self.render(PageSource::Url(url)).await
    }

    async fn render_html(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.render(PageSource::Html(html)).await
    }
}

/// A launched browser that can print one page and be closed
#[async_trait]
trait RenderSession: Send {
    async fn print(
        &mut self,
        source: PageSource<'_>,
        config: &BrowserConfig,
        options: &PdfOptions,
    ) -> Result<Vec<u8>, RenderError>;

    async fn close(&mut self);
}

/// Print once, then close the session whatever the outcome.
async fn render_with<S: RenderSession>(
    mut session: S,
    source: PageSource<'_>,
    config: &BrowserConfig,
    options: &PdfOptions,
) -> Result<Vec<u8>, RenderError> {
    let result = session.print(source, config, options).await;
    session.close().await;
    result
}

/// One launched browser process and everything it owns.
///
/// Call [`RenderSession::close`] when done. If the session is dropped
/// instead (the request future was cancelled), the same shutdown runs on a
/// spawned task, so the profile directory outlives the browser process.
/// Without a runtime to spawn on, the driver kills the child on drop and
/// profile removal is best-effort.
struct BrowserSession {
    parts: Option<SessionParts>,
}

struct SessionParts {
    browser: Browser,
    handler: JoinHandle<()>,
    profile: TempDir,
}

impl BrowserSession {
    async fn launch(config: &BrowserConfig) -> Result<Self, RenderError> {
        let profile = tempfile::Builder::new()
            .prefix("pdf-render-")
            .tempdir()
            .map_err(|e| RenderError::Launch(format!("Failed to create profile directory: {}", e)))?;

        let mut builder = DriverConfig::builder()
            .user_data_dir(profile.path())
            .args(["--disable-gpu", "--disable-dev-shm-usage", "--no-first-run"]);
        if let Some(path) = &config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        let driver_config = builder.build().map_err(RenderError::Launch)?;

        tracing::debug!("Launching headless browser (profile {})", profile.path().display());
        let (browser, mut handler) = Browser::launch(driver_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("Browser handler error: {}", e);
                }
            }
        });

        Ok(Self {
            parts: Some(SessionParts {
                browser,
                handler,
                profile,
            }),
        })
    }
}

#[async_trait]
impl RenderSession for BrowserSession {
    async fn print(
        &mut self,
        source: PageSource<'_>,
        config: &BrowserConfig,
        options: &PdfOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let parts = self
            .parts
            .as_ref()
            .ok_or_else(|| RenderError::Page("browser session already closed".to_string()))?;

        let page = parts
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Page(e.to_string()))?;

        let idle = NetworkIdle::subscribe(&page, config.network_idle)
            .await
            .map_err(|e| RenderError::Page(e.to_string()))?;

        load(&page, source).await?;
        idle.wait().await;

        tracing::debug!("Exporting PDF");
        let bytes = page
            .pdf(options.to_params())
            .await
            .map_err(|e| RenderError::Export(e.to_string()))?;

        ensure_pdf(bytes)
    }

    async fn close(&mut self) {
        if let Some(parts) = self.parts.take() {
            parts.shutdown().await;
        }
    }
}

impl SessionParts {
    /// Close the browser, reap the process, then remove the profile.
    ///
    /// Failures are logged and otherwise ignored; the render result has
    /// already been decided by the time this runs.
    async fn shutdown(self) {
        let SessionParts {
            mut browser,
            handler,
            profile,
        } = self;

        match tokio::time::timeout(CLOSE_TIMEOUT, browser.close()).await {
            Ok(Ok(_)) => {
                if let Err(e) = browser.wait().await {
                    tracing::warn!("Failed to wait for browser exit: {}", e);
                }
            }
            Ok(Err(e)) => tracing::warn!("Failed to close browser: {}", e),
            Err(_) => tracing::warn!("Browser did not close within {:?}", CLOSE_TIMEOUT),
        }
        handler.abort();
        // Kills the child if it is still running
        drop(browser);

        let path = profile.path().to_path_buf();
        if let Err(e) = profile.close() {
            tracing::warn!("Failed to remove profile {}: {}", path.display(), e);
        }
        tracing::debug!("Browser closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let Some(parts) = self.parts.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(parts.shutdown());
            }
            Err(_) => parts.handler.abort(),
        }
    }
}

async fn load(page: &Page, source: PageSource<'_>) -> Result<(), RenderError> {
    match source {
        PageSource::Url(url) => {
            tracing::debug!("Navigating to {}", url);
            page.goto(url.as_str())
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))?;
        }
        PageSource::Html(html) => {
            tracing::debug!("Setting page content ({} bytes)", html.len());
            page.set_content(html)
                .await
                .map_err(|e| RenderError::Content(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Session that prints a canned result and counts closes
    struct FakeSession {
        result: Result<Vec<u8>, RenderError>,
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RenderSession for FakeSession {
        async fn print(
            &mut self,
            _source: PageSource<'_>,
            _config: &BrowserConfig,
            _options: &PdfOptions,
        ) -> Result<Vec<u8>, RenderError> {
            self.result.clone()
        }

        async fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn render_fake(result: Result<Vec<u8>, RenderError>) -> (Result<Vec<u8>, RenderError>, usize) {
        let closes = Arc::new(AtomicUsize::new(0));
        let session = FakeSession {
            result,
            closes: closes.clone(),
        };
        let config = Config::default().browser;
        let out = render_with(session, PageSource::Html("<p>hi</p>"), &config, &PdfOptions::default()).await;
        (out, closes.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_session_closed_after_failed_print() {
        let (result, closes) = render_fake(Err(RenderError::Navigation("net::ERR_FAILED".to_string()))).await;
        assert_eq!(result, Err(RenderError::Navigation("net::ERR_FAILED".to_string())));
        assert_eq!(closes, 1);
    }

    #[tokio::test]
    async fn test_session_closed_after_successful_print() {
        let (result, closes) = render_fake(Ok(b"%PDF-1.7".to_vec())).await;
        assert_eq!(result.unwrap(), b"%PDF-1.7".to_vec());
        assert_eq!(closes, 1);
    }

    fn renderer() -> ChromiumRenderer {
        let mut config = Config::default().browser;
        config.no_sandbox = true;
        ChromiumRenderer::new(config)
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium"]
    async fn test_render_html_produces_pdf() {
        let bytes = renderer()
            .render_html("<html><body><h1>Hello World</h1></body></html>")
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium and network access"]
    async fn test_render_url_produces_pdf() {
        let url = HttpUrl::parse("https://example.com").unwrap();
        let bytes = renderer().render_url(&url).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium"]
    async fn test_unreachable_host_is_navigation_error() {
        let url = HttpUrl::parse("http://does-not-exist.invalid").unwrap();
        let err = renderer().render_url(&url).await.unwrap_err();
        assert!(matches!(err, RenderError::Navigation(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_missing_executable_is_launch_error() {
        let mut config = Config::default().browser;
        config.chrome_path = Some("/nonexistent/chromium-binary".into());
        let err = ChromiumRenderer::new(config).render_html("<p>hi</p>").await.unwrap_err();
        assert!(matches!(err, RenderError::Launch(_)), "got {:?}", err);
    }
}
