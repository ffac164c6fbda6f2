//! Utility functions for text cleanup, date parsing, and file system preparation.
//!
//! - Whitespace collapsing for text pulled out of the DOM
//! - Lenient parsing of `datetime` attribute values
//! - String truncation for log output
//! - Creating the output file's parent directory

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Collapse runs of whitespace into single spaces and trim both ends.
///
/// Approximates how a browser renders text content, so headings split
/// across lines in the markup come out as one line.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a `datetime` attribute value into a UTC timestamp.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2024-01-01T00:00:00Z`, `2024-01-01T09:30:00+05:30`)
/// - RFC 2822 (`Mon, 01 Jan 2024 00:00:00 GMT`)
/// - ISO date-time without an offset, taken as UTC (`2024-01-01T00:00:00`)
/// - a bare date, taken as midnight UTC (`2024-01-01`)
///
/// # Returns
///
/// `None` when the value matches none of the above.
pub fn parse_publication_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and the number of dropped bytes appended.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Make sure the directory that will hold `path` exists.
///
/// Paths without a parent component (a bare file name) need nothing.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(dir = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}
