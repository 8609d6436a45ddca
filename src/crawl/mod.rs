// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a single site.
//
// Features:
// - Breadth-first crawling starting from one seed URL
// - Strict same-authority restriction, optional language path prefix
// - Exact-string deduplication of discovered URLs
// - Page budget and a politeness delay between pages
//
// Submodules:
// - filter: which URLs may be crawled at all
// - frontier: which URLs are still waiting, which are done
// - session: the crawl loop and its bookkeeping
// =============================================================================

mod filter;
mod frontier;
mod session;

pub use session::{CrawlOptions, CrawlSession, CrawlSummary};
