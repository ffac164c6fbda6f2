//! Fixed run settings.
//!
//! The scraping target and output location are compile-time constants. They
//! are collected into [`Settings`] so the pipeline can be driven against
//! fixtures and temporary paths in tests.

use crate::models::FeedChannel;
use std::path::PathBuf;
use std::time::Duration;

/// Listing page that gets scraped.
pub const TARGET_URL: &str = "https://www.reuters.com/technology/";

/// Feed file, relative to the working directory.
pub const OUTPUT_PATH: &str = "feed.xml";

/// Upper bound on how long page navigation may take.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of articles taken from the page, in document order.
pub const MAX_ARTICLES: usize = 15;

pub const FEED_TITLE: &str = "Reuters Technology RSS";
pub const FEED_DESCRIPTION: &str = "Latest Reuters Technology news";
pub const SITE_URL: &str = "https://rebus77.github.io/r_tech/";
pub const FEED_URL: &str = "https://rebus77.github.io/r_tech/feed.xml";
pub const FEED_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct Settings {
    pub target_url: String,
    pub output_path: PathBuf,
    pub navigation_timeout: Duration,
    pub max_articles: usize,
    pub channel: FeedChannel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_url: TARGET_URL.to_string(),
            output_path: PathBuf::from(OUTPUT_PATH),
            navigation_timeout: NAVIGATION_TIMEOUT,
            max_articles: MAX_ARTICLES,
            channel: FeedChannel {
                title: FEED_TITLE.to_string(),
                description: FEED_DESCRIPTION.to_string(),
                site_url: SITE_URL.to_string(),
                feed_url: FEED_URL.to_string(),
                language: FEED_LANGUAGE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.target_url, "https://www.reuters.com/technology/");
        assert_eq!(settings.output_path, PathBuf::from("feed.xml"));
        assert_eq!(settings.max_articles, 15);
        assert_eq!(settings.navigation_timeout, Duration::from_secs(30));
        assert_eq!(settings.channel.language, "en");
        assert!(settings.channel.feed_url.ends_with("/feed.xml"));
    }
}
