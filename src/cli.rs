//! Command-line interface definitions.
//!
//! The scrape target and output path are fixed, so the command line only
//! carries `--help` and `--version`. Log verbosity is controlled through
//! `RUST_LOG`.

use clap::Parser;

/// Render the Reuters Technology page and write `feed.xml`.
///
/// # Examples
///
/// ```sh
/// r_tech_rss
///
/// # With per-record debug output
/// RUST_LOG=r_tech_rss=debug r_tech_rss
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_no_args() {
        assert!(Cli::try_parse_from(["r_tech_rss"]).is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        let err = Cli::try_parse_from(["r_tech_rss", "--url", "https://example.com"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_version_flag() {
        let err = Cli::try_parse_from(["r_tech_rss", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
