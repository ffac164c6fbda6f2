//! RSS 2.0 feed generation.
//!
//! The feed is rebuilt from scratch on every run and written over the previous
//! file. There is no merging with earlier items.
//!
//! # Document Shape
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
//!   <channel>
//!     <title/> <description/> <link/> <atom:link rel="self"/>
//!     <language/> <generator/> <lastBuildDate/> <pubDate/>
//!     <item> <title/> <link/> <description/> <guid/> <pubDate/> </item>
//!     ...
//!   </channel>
//! </rss>
//! ```

use crate::error::FeedError;
use crate::models::{Article, FeedChannel};
use crate::utils::ensure_parent_dir;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Serialize `articles` into an RSS 2.0 document.
///
/// `now` stamps the channel's `lastBuildDate` and `pubDate`. An empty slice
/// yields a valid channel with no items.
pub fn build_feed(
    channel: &FeedChannel,
    articles: &[Article],
    now: DateTime<Utc>,
) -> Result<Vec<u8>, FeedError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    write_event(&mut writer, Event::Start(rss))?;
    write_event(&mut writer, Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "link", &channel.site_url)?;

    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", channel.feed_url.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    write_event(&mut writer, Event::Empty(self_link))?;

    write_text_element(&mut writer, "language", &channel.language)?;
    write_text_element(&mut writer, "generator", GENERATOR)?;
    write_text_element(&mut writer, "lastBuildDate", &now.to_rfc2822())?;
    write_text_element(&mut writer, "pubDate", &now.to_rfc2822())?;

    for article in articles {
        write_item(&mut writer, article)?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

/// Write a serialized feed to `path`, replacing whatever was there.
///
/// Missing parent directories are created first. The write is not atomic: a
/// failure part-way through can leave the file truncated.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = feed.len()))]
pub async fn write_feed(path: &Path, feed: &[u8]) -> Result<(), FeedError> {
    let write_error = |source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    };

    ensure_parent_dir(path).await.map_err(write_error)?;
    fs::write(path, feed).await.map_err(write_error)?;

    info!("Wrote RSS feed");
    Ok(())
}

fn write_item<W: Write>(writer: &mut Writer<W>, article: &Article) -> Result<(), FeedError> {
    write_event(writer, Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &article.title)?;
    write_text_element(writer, "link", &article.link)?;
    write_text_element(writer, "description", &article.description)?;

    if let Some(guid) = article.guid() {
        let mut start = BytesStart::new("guid");
        start.push_attribute(("isPermaLink", "true"));
        write_event(writer, Event::Start(start))?;
        write_event(writer, Event::Text(BytesText::new(&sanitize_text(guid))))?;
        write_event(writer, Event::End(BytesEnd::new("guid")))?;
    }

    write_text_element(writer, "pubDate", &article.publication_date.to_rfc2822())?;
    write_event(writer, Event::End(BytesEnd::new("item")))
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(&sanitize_text(text))))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), FeedError> {
    writer.write_event(event).map_err(encode_error)
}

fn encode_error(e: impl Display) -> FeedError {
    FeedError::Encode(e.to_string())
}

/// Drop characters outside the XML 1.0 `Char` production.
///
/// Tab, LF, and CR are the only control characters kept. The noncharacters
/// U+FFFE and U+FFFF are dropped too.
fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => (c as u32) >= 0x20,
        })
        .collect()
}
