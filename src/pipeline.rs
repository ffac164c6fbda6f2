//! The two-stage run: fetch articles, then write the feed.

use crate::config::Settings;
use crate::error::RunError;
use crate::outputs::rss::{build_feed, write_feed};
use crate::scrapers::{PageSource, reuters};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub articles: usize,
    pub bytes: usize,
}

/// Fetch the listing page through `source` and regenerate the feed.
///
/// A page with no articles fails the run with [`RunError::NoArticles`] and
/// leaves any existing feed file untouched.
#[instrument(level = "info", skip_all, fields(url = %settings.target_url, path = %settings.output_path.display()))]
pub async fn run<S: PageSource>(source: &S, settings: &Settings) -> Result<RunSummary, RunError> {
    let articles = reuters::fetch_articles(source, settings).await?;

    if articles.is_empty() {
        warn!("No articles extracted; keeping the previous feed");
        return Err(RunError::NoArticles {
            url: settings.target_url.clone(),
        });
    }
    if let Ok(dump) = serde_json::to_string(&articles) {
        debug!(articles = %dump, "Extracted records");
    }

    let feed = build_feed(&settings.channel, &articles, Utc::now())?;
    write_feed(&settings.output_path, &feed).await?;

    info!(count = articles.len(), bytes = feed.len(), "RSS feed generated");
    Ok(RunSummary {
        articles: articles.len(),
        bytes: feed.len(),
    })
}
