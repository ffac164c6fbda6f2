//! Reuters Technology listing scraper.
//!
//! The listing page renders each story as an `<article>` element holding a
//! heading, a link, an optional teaser paragraph, and a `<time>` element with a
//! machine-readable `datetime`. Only the first stories in document order are
//! kept.

use crate::config::Settings;
use crate::error::FetchError;
use crate::models::{Article, NO_DESCRIPTION, NO_TITLE};
use crate::scrapers::PageSource;
use crate::utils::{normalize_whitespace, parse_publication_date, truncate_for_log};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3, h4").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

/// Load the listing page through `source` and extract its articles.
///
/// # Returns
///
/// Up to `settings.max_articles` articles in document order. An empty vector
/// means the page loaded but held no `<article>` elements; that is left for the
/// caller to judge.
#[instrument(level = "info", skip_all, fields(url = %settings.target_url))]
pub async fn fetch_articles<S: PageSource>(
    source: &S,
    settings: &Settings,
) -> Result<Vec<Article>, FetchError> {
    let html = source.load(&settings.target_url).await?;
    let articles = extract_articles(&html, &settings.target_url, settings.max_articles, Utc::now());

    if articles.is_empty() {
        debug!(page = %truncate_for_log(&html, 300), "Page held no <article> elements");
    }
    info!(count = articles.len(), "Extracted articles");
    Ok(articles)
}

/// Extract up to `limit` articles from rendered listing markup.
///
/// `base_url` resolves relative links. `now` is the fallback publication date
/// for articles without a usable `datetime`.
pub fn extract_articles(
    html: &str,
    base_url: &str,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    let articles: Vec<Article> = document
        .select(&ARTICLE)
        .take(limit)
        .map(|element| extract_article(element, base.as_ref(), now))
        .collect();

    debug!(count = articles.len(), limit, "Parsed article elements");
    articles
}

fn extract_article(element: ElementRef<'_>, base: Option<&Url>, now: DateTime<Utc>) -> Article {
    let title = first_text(element, &HEADING).unwrap_or_else(|| NO_TITLE.to_string());

    let link = element
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve_link(base, href))
        .unwrap_or_default();

    let description =
        first_text(element, &PARAGRAPH).unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let raw_date = element
        .select(&TIME)
        .next()
        .and_then(|t| t.value().attr("datetime"));
    let publication_date = match raw_date {
        Some(raw) => parse_publication_date(raw).unwrap_or_else(|| {
            warn!(datetime = %raw, %title, "Unparseable datetime; using current time");
            now
        }),
        None => now,
    };

    Article {
        title,
        link,
        description,
        publication_date,
    }
}

/// Whitespace-normalized rendered text of the first match, if it has any.
fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| {
            let mut text = String::new();
            collect_rendered_text(e, &mut text);
            normalize_whitespace(&text)
        })
        .filter(|text| !text.is_empty())
}

/// Append the text a browser would render for `element`.
///
/// Subtrees that never render as text (`script`, `style`, `noscript`,
/// `template`) are skipped.
fn collect_rendered_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !matches!(
                child.value().name(),
                "script" | "style" | "noscript" | "template"
            ) {
                collect_rendered_text(child, out);
            }
        }
    }
}

/// Resolve `href` against the page URL, the way a browser reports `a.href`.
fn resolve_link(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    match base.map(|b| b.join(href)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => match Url::parse(href) {
            Ok(absolute) => absolute.to_string(),
            Err(_) => href.to_string(),
        },
    }
}
