//! Error types for each stage of a run.

use std::path::PathBuf;
use std::time::Duration;

/// Failures while acquiring the browser or loading the listing page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("Navigation to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("Failed to read rendered page: {0}")]
    Evaluation(String),
}

/// Failures while serializing or writing the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to encode feed XML: {0}")]
    Encode(String),
    #[error("Failed to write feed to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that aborts a run. Every variant maps to a nonzero exit.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("No articles found on {url}")]
    NoArticles { url: String },
    #[error(transparent)]
    Feed(#[from] FeedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let e = FetchError::Timeout {
            url: "https://example.com/".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            e.to_string(),
            "Navigation to https://example.com/ timed out after 30s"
        );
    }

    #[test]
    fn test_run_error_is_transparent() {
        let e: RunError = FetchError::Launch("driver missing".to_string()).into();
        assert_eq!(e.to_string(), "Failed to launch browser: driver missing");
    }

    #[test]
    fn test_write_error_names_path() {
        let e = FeedError::Write {
            path: PathBuf::from("out/feed.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(e.to_string(), "Failed to write feed to out/feed.xml: denied");
    }
}
