//! Headless browser page source.
//!
//! Each call to [`BrowserPageSource::load`] starts a Playwright driver,
//! launches headless Chromium, renders one page, and closes the browser again
//! whether or not rendering succeeded.

use crate::error::FetchError;
use crate::scrapers::PageSource;
use pw::{GotoOptions, LaunchOptions, Playwright, WaitUntil};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Expression evaluated in the page to capture the rendered DOM.
const OUTER_HTML: &str = "document.documentElement.outerHTML";

/// Loads pages in a fresh headless Chromium per call.
#[derive(Debug, Clone)]
pub struct BrowserPageSource {
    navigation_timeout: Duration,
}

impl BrowserPageSource {
    pub fn new(navigation_timeout: Duration) -> Self {
        Self { navigation_timeout }
    }
}

impl PageSource for BrowserPageSource {
    #[instrument(level = "info", skip(self))]
    async fn load(&self, url: &str) -> Result<String, FetchError> {
        let session = BrowserSession::launch().await?;
        render_scoped(session, url, self.navigation_timeout).await
    }
}

/// An open browser page that can be rendered once and then released.
trait RenderSession {
    /// Navigate and capture the DOM. Navigation is bounded by `timeout`.
    async fn render(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;

    /// Close failures are logged only; the run outcome is already decided.
    async fn close(self);
}

/// Render `url` in `session`, then close the session on every outcome.
async fn render_scoped<S: RenderSession>(
    session: S,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let rendered = session.render(url, timeout).await;
    session.close().await;
    rendered
}

/// One driver, browser, context, and page, owned together.
struct BrowserSession {
    _playwright: Playwright,
    browser: pw::protocol::Browser,
    page: pw::protocol::Page,
}

impl BrowserSession {
    async fn launch() -> Result<Self, FetchError> {
        debug!("starting Playwright...");
        let playwright = Playwright::launch()
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let launch_options = LaunchOptions {
            headless: Some(true),
            ..Default::default()
        };
        let browser = playwright
            .chromium()
            .launch_with_options(launch_options)
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;
        info!(version = %browser.version(), "Launched headless Chromium");

        let page = match open_page(&browser).await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "Failed to close browser after page setup failed");
                }
                return Err(e);
            }
        };

        Ok(Self {
            _playwright: playwright,
            browser,
            page,
        })
    }
}

impl RenderSession for BrowserSession {
    async fn render(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let goto_opts = GotoOptions {
            wait_until: Some(WaitUntil::DomContentLoaded),
            ..Default::default()
        };

        match tokio::time::timeout(timeout, self.page.goto(url, Some(goto_opts))).await {
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                });
            }
            Ok(Err(e)) => {
                return Err(FetchError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
            Ok(Ok(_)) => info!(%url, "Page loaded"),
        }

        let html = self
            .page
            .evaluate_value(OUTER_HTML)
            .await
            .map_err(|e| FetchError::Evaluation(e.to_string()))?;
        debug!(bytes = html.len(), "Captured rendered DOM");
        Ok(html)
    }

    async fn close(self) {
        match self.browser.close().await {
            Ok(()) => debug!("Browser closed"),
            Err(e) => warn!(error = %e, "Failed to close browser"),
        }
    }
}

async fn open_page(browser: &pw::protocol::Browser) -> Result<pw::protocol::Page, FetchError> {
    let context = browser
        .new_context()
        .await
        .map_err(|e| FetchError::Launch(e.to_string()))?;
    context
        .new_page()
        .await
        .map_err(|e| FetchError::Launch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Stands in for a browser page and records whether it was closed.
    struct RecordingSession {
        outcome: Result<String, FetchError>,
        closed: Arc<AtomicBool>,
    }

    impl RecordingSession {
        fn new(outcome: Result<String, FetchError>) -> (Self, Arc<AtomicBool>) {
            let closed = Arc::new(AtomicBool::new(false));
            let session = Self {
                outcome,
                closed: Arc::clone(&closed),
            };
            (session, closed)
        }
    }

    impl RenderSession for RecordingSession {
        async fn render(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
            match &self.outcome {
                Ok(html) => Ok(html.clone()),
                Err(FetchError::Timeout { .. }) => Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                }),
                Err(e) => Err(FetchError::Evaluation(e.to_string())),
            }
        }

        async fn close(self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_render_scoped_closes_after_success() {
        let (session, closed) = RecordingSession::new(Ok("<html></html>".to_string()));

        let html = render_scoped(session, "https://example.com/", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(html, "<html></html>");
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_render_scoped_closes_after_timeout() {
        let (session, closed) = RecordingSession::new(Err(FetchError::Timeout {
            url: String::new(),
            timeout: Duration::ZERO,
        }));

        let err = render_scoped(session, "https://example.com/", Duration::from_secs(30))
            .await
            .unwrap_err();
        match err {
            FetchError::Timeout { url, timeout } => {
                assert_eq!(url, "https://example.com/");
                assert_eq!(timeout, Duration::from_secs(30));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_render_scoped_closes_after_evaluation_failure() {
        let (session, closed) =
            RecordingSession::new(Err(FetchError::Evaluation("target closed".to_string())));

        let err = render_scoped(session, "https://example.com/", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Evaluation(_)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    #[ignore = "requires a Playwright driver and network access"]
    async fn test_load_live_listing_page() {
        let source = BrowserPageSource::new(crate::config::NAVIGATION_TIMEOUT);
        let html = source
            .load(crate::config::TARGET_URL)
            .await
            .expect("Failed to render listing page");
        assert!(html.contains("<html"));
    }

    #[tokio::test]
    #[ignore = "requires a Playwright driver"]
    async fn test_unreachable_host_is_navigation_error() {
        let source = BrowserPageSource::new(Duration::from_secs(10));
        let err = source.load("https://nonexistent.invalid/").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Navigation { .. } | FetchError::Timeout { .. }
        ));
    }
}
