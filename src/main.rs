//! # r_tech_rss
//!
//! Renders the Reuters Technology listing page in headless Chromium, pulls the
//! first fifteen articles out of the DOM, and writes them to `feed.xml` as an
//! RSS 2.0 feed.
//!
//! ## Usage
//!
//! ```sh
//! r_tech_rss
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Load the page through Playwright and extract `<article>` records
//! 2. **Output**: Serialize the records and overwrite the feed file
//!
//! The process exits `0` when a feed was written and `1` otherwise, including
//! when the page held no articles.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use scrapers::browser::BrowserPageSource;

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let _cli = Cli::parse();

    let start_time = std::time::Instant::now();
    info!("r_tech_rss starting up");

    let settings = Settings::default();
    let source = BrowserPageSource::new(settings.navigation_timeout);

    let outcome = pipeline::run(&source, &settings).await;

    let elapsed = start_time.elapsed();
    match outcome {
        Ok(summary) => {
            info!(
                articles = summary.articles,
                bytes = summary.bytes,
                path = %settings.output_path.display(),
                ?elapsed,
                "RSS feed generated successfully"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, ?elapsed, "Error generating RSS feed");
            ExitCode::FAILURE
        }
    }
}
