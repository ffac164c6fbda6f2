//! Data models for scraped articles and the feed envelope that wraps them.
//!
//! - [`Article`]: one record extracted from an `<article>` element on the listing page
//! - [`FeedChannel`]: static channel metadata written around the item list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when an article has no heading, or an empty one.
pub const NO_TITLE: &str = "No title";

/// Description used when an article has no paragraph, or an empty one.
pub const NO_DESCRIPTION: &str = "No description";

/// A single article as scraped from the listing page.
///
/// Every field is a best-effort extraction. Missing values are replaced with
/// placeholders at extraction time, so nothing here is ever absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Heading text, or [`NO_TITLE`].
    pub title: String,
    /// Absolute URL of the first anchor, or an empty string.
    pub link: String,
    /// Text of the first paragraph, or [`NO_DESCRIPTION`].
    pub description: String,
    /// Parsed `datetime` of the first `<time>` element, or the extraction time.
    pub publication_date: DateTime<Utc>,
}

impl Article {
    /// The identifier written as the item `guid`.
    ///
    /// This is the link verbatim, so it is only stable across runs when the
    /// link is. Articles without a link have no identifier.
    pub fn guid(&self) -> Option<&str> {
        if self.link.is_empty() {
            None
        } else {
            Some(&self.link)
        }
    }
}

/// Channel-level metadata for the generated feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    /// Canonical site the feed belongs to.
    pub site_url: String,
    /// Where the feed itself is published (`atom:link rel="self"`).
    pub feed_url: String,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(link: &str) -> Article {
        Article {
            title: "Chipmakers rally".to_string(),
            link: link.to_string(),
            description: "Shares rose".to_string(),
            publication_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_guid_is_link_verbatim() {
        let a = article("https://www.reuters.com/technology/chips-2024-01-01/");
        assert_eq!(
            a.guid(),
            Some("https://www.reuters.com/technology/chips-2024-01-01/")
        );
    }

    #[test]
    fn test_guid_absent_without_link() {
        assert_eq!(article("").guid(), None);
    }

    #[test]
    fn test_article_serialization() {
        let a = article("https://example.com/a");
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"publication_date\":\"2024-01-01T00:00:00Z\""));

        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
