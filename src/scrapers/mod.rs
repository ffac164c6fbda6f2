//! Page loading and article extraction.
//!
//! Scraping is split in two so the selector contract can be exercised without
//! a browser:
//!
//! 1. **Loading**: a [`PageSource`] turns a URL into rendered HTML. The
//!    production source is [`browser::BrowserPageSource`], which drives a
//!    headless Chromium through Playwright.
//! 2. **Extraction**: [`reuters::extract_articles`] reads `<article>` elements
//!    out of that HTML. It is a pure function over markup.
//!
//! [`reuters::fetch_articles`] glues the two together for a run.

pub mod browser;
pub mod reuters;

use crate::error::FetchError;

/// Something that can produce the rendered DOM of a page.
pub trait PageSource {
    /// Load `url` and return its serialized DOM once `DOMContentLoaded` has fired.
    async fn load(&self, url: &str) -> Result<String, FetchError>;
}
