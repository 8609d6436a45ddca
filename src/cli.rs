// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The base URL and language can also come from the environment (BASE_URL,
// SCRAPER_LANGUAGE), which is handy when the crawler runs in a container.
// =============================================================================

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::crawl::CrawlOptions;

#[derive(Parser, Debug)]
#[command(
    name = "site-scribe",
    version = "0.1.0",
    about = "Crawl a website and archive every page as markdown",
    long_about = "site-scribe crawls every page of a single domain, converts each page's main content \
                  to a markdown file and writes a site index linking the source URLs to the files."
)]
pub struct Cli {
    /// Website URL to start from (e.g., https://example.com/)
    #[arg(env = "BASE_URL")]
    pub base_url: String,

    /// Only crawl paths under /<LANGUAGE>/ and write output to <OUTPUT>/<LANGUAGE>/
    #[arg(long, env = "SCRAPER_LANGUAGE")]
    pub language: Option<String>,

    /// Maximum number of pages to crawl
    #[arg(long, default_value_t = 100)]
    pub max_pages: usize,

    /// Crawl until no new pages are found, ignoring --max-pages
    #[arg(long)]
    pub no_limit: bool,

    /// Pause between pages in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Seconds to wait for a page to become ready before extracting anyway
    #[arg(long, default_value_t = 10)]
    pub ready_timeout: u64,

    /// Seconds before a page request is abandoned
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    /// Directory the markdown files are written to
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Log file, written alongside the console log
    #[arg(long, default_value = "scraper.log")]
    pub log_file: PathBuf,

    /// Print the crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            max_pages: if self.no_limit { None } else { Some(self.max_pages) },
            delay: Duration::from_millis(self.delay_ms),
            ready_timeout: Duration::from_secs(self.ready_timeout),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Parses the command line. `--help` and `--version` print and exit 0 as
/// usual; any other parse error comes back as an `Err` so it exits 1 like
/// every other startup failure.
pub fn parse_cli<I, T>(args: I) -> anyhow::Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => Err(e).context("invalid command line"),
    }
}
