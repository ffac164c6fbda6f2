//! Output generation.
//!
//! # Submodules
//!
//! - [`rss`]: Serializes articles into an RSS 2.0 document and writes it to disk
//!
//! # Output Structure
//!
//! ```text
//! ./
//! └── feed.xml   # regenerated in full on every run
//! ```

pub mod rss;
