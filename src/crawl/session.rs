// src/crawl/session.rs
// =============================================================================
// This module drives a crawl from the seed URL to the site index.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Pop the next URL; skip it if it was visited meanwhile
// 3. Render it, extract a Document, try to save it (recording an index entry
//    on success), mark it visited
// 4. Filter the page's links and push the admissible ones to the frontier
// 5. Sleep for the politeness delay and repeat until the frontier is empty or
//    the page budget is spent
// 6. Write the site index
//
// A page that fails to render is logged and abandoned; nothing short of a
// startup error stops the crawl. One page is handled at a time and the
// session is the only thing that mutates crawl state.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use super::filter::{authority, UrlFilter};
use super::frontier::Frontier;
use crate::extract::{discover_links, extract_document};
use crate::output::{slot_name, IndexEntry, OutputStore, SaveOutcome, SiteIndex};
use crate::render::{PageRenderer, RenderError};

/// Knobs of the crawl loop.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Stop after this many pages; `None` crawls until the frontier is empty
    pub max_pages: Option<usize>,
    /// Pause after every crawled page
    pub delay: Duration,
    /// How long a page may take to report readiness before extraction goes ahead
    pub ready_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: Some(100),
            delay: Duration::from_secs(1),
            ready_timeout: Duration::from_secs(10),
        }
    }
}

/// What a finished crawl did, printed by main as a table or JSON.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CrawlSummary {
    pub pages_crawled: usize,
    pub pages_saved: usize,
    pub pages_skipped: usize,
    pub render_failures: usize,
    pub write_failures: usize,
    pub queued_remaining: usize,
    pub index_path: Option<PathBuf>,
    pub pages: Vec<IndexEntry>,
}

/// All state of one crawl.
pub struct CrawlSession {
    frontier: Frontier,
    filter: UrlFilter,
    store: OutputStore,
    entries: Vec<IndexEntry>,
    summary: CrawlSummary,
}

impl CrawlSession {
    /// Sets up a crawl of the seed URL's domain. The seed is queued as-is,
    /// without passing through the filter.
    pub fn new(base_url: &str, language: Option<String>, output_root: impl Into<PathBuf>) -> Result<Self> {
        let seed = Url::parse(base_url).with_context(|| format!("Invalid URL '{}'", base_url))?;
        let domain = authority(&seed).ok_or_else(|| anyhow!("URL has no domain: {}", base_url))?;

        let mut frontier = Frontier::new();
        frontier.push(base_url);

        Ok(Self {
            frontier,
            filter: UrlFilter::new(domain, language.clone()),
            store: OutputStore::new(output_root, language),
            entries: Vec::new(),
            summary: CrawlSummary::default(),
        })
    }

    pub fn domain(&self) -> &str {
        self.filter.domain()
    }

    /// Runs the crawl loop to completion and writes the site index.
    pub async fn crawl<R: PageRenderer>(mut self, renderer: &mut R, options: &CrawlOptions) -> CrawlSummary {
        while options.max_pages.map_or(true, |max| self.summary.pages_crawled < max) {
            let Some(url) = self.frontier.pop() else {
                break;
            };

            // Tolerate stale queue entries
            if self.frontier.is_visited(&url) {
                continue;
            }

            info!(page = self.summary.pages_crawled + 1, url = %url, "scraping page");
            if let Err(e) = self.visit(renderer, &url, options).await {
                error!(url = %url, error = %e, "error processing page");
                self.summary.render_failures += 1;
                continue;
            }

            tokio::time::sleep(options.delay).await;
        }

        self.finish()
    }

    async fn visit<R: PageRenderer>(
        &mut self,
        renderer: &mut R,
        url: &str,
        options: &CrawlOptions,
    ) -> Result<(), RenderError> {
        renderer.navigate(url).await?;

        let document = extract_document(&*renderer, url, options.ready_timeout).await;
        match self.store.save(&document, &slot_name(url)) {
            SaveOutcome::Saved(_) => {
                self.entries.push(self.store.index_entry(url));
                self.summary.pages_saved += 1;
            }
            SaveOutcome::Skipped(_) => self.summary.pages_skipped += 1,
            SaveOutcome::Failed(_) => self.summary.write_failures += 1,
        }

        self.frontier.mark_visited(url);
        self.summary.pages_crawled += 1;

        for link in discover_links(&*renderer, url) {
            if self.filter.is_admissible(&link) {
                self.frontier.push(link);
            }
        }

        Ok(())
    }

    fn finish(mut self) -> CrawlSummary {
        let index = SiteIndex::new(std::mem::take(&mut self.entries));
        match self.store.save_index(&index) {
            SaveOutcome::Saved(path) => self.summary.index_path = Some(path),
            SaveOutcome::Skipped(reason) => warn!(%reason, "site index not written"),
            SaveOutcome::Failed(e) => error!(error = %e, "site index not written"),
        }

        if !self.frontier.is_empty() {
            info!(remaining = self.frontier.len(), "page budget reached with pages still queued");
        }
        self.summary.queued_remaining = self.frontier.len();
        self.summary.pages = index.entries().to_vec();
        info!(
            pages = self.summary.pages_crawled,
            visited = self.frontier.visited_count(),
            "completed scraping"
        );
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::memory::MemoryRenderer;
    use std::fs;
    use tempfile::TempDir;

    const SEED: &str = "https://example.com/";

    fn options(max_pages: Option<usize>) -> CrawlOptions {
        CrawlOptions {
            max_pages,
            delay: Duration::ZERO,
            ready_timeout: Duration::from_millis(10),
        }
    }

    fn page(title: &str, body: &str) -> String {
        format!("<html><head><title>{}</title></head><body>{}</body></html>", title, body)
    }

    fn long_text(c: char) -> String {
        std::iter::repeat(c).take(150).collect()
    }

    async fn run(renderer: &mut MemoryRenderer, root: &std::path::Path, language: Option<&str>, max: Option<usize>) -> CrawlSummary {
        let session = CrawlSession::new(SEED, language.map(str::to_string), root).unwrap();
        session.crawl(renderer, &options(max)).await
    }

    #[test]
    fn test_session_setup() {
        let session = CrawlSession::new("https://example.com:8443/start", None, "output").unwrap();
        assert_eq!(session.domain(), "example.com:8443");
        assert!(session.frontier.is_queued("https://example.com:8443/start"));
    }

    #[test]
    fn test_invalid_seed_is_a_startup_error() {
        assert!(CrawlSession::new("not a url", None, "output").is_err());
        assert!(CrawlSession::new("data:text/plain,hi", None, "output").is_err());
    }

    #[tokio::test]
    async fn test_home_and_about_are_saved_and_indexed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("output");
        let paragraph = long_text('a');
        let mut renderer = MemoryRenderer::new()
            .with_page(
                SEED,
                &page("Home", &format!(r#"<p>{}</p><a href="https://example.com/about">About</a>"#, paragraph)),
            )
            .with_page(
                "https://example.com/about",
                &page("About", &format!("<p>{}</p>", long_text('b'))),
            );

        let summary = run(&mut renderer, &root, None, None).await;

        assert_eq!(renderer.visits, vec![SEED, "https://example.com/about"]);
        assert_eq!(summary.pages_crawled, 2);
        assert_eq!(summary.pages_saved, 2);

        let home = fs::read_to_string(root.join("index.md")).unwrap();
        assert_eq!(
            home,
            format!("# Home\n\n*Original URL: https://example.com/*\n\n{}\n", paragraph)
        );
        assert!(root.join("about.md").exists());

        let index = fs::read_to_string(root.join("site_index.md")).unwrap();
        let root_display = root.display();
        assert_eq!(
            index,
            format!(
                "# Site Content Index\n\n- [https://example.com/]({0}/index.md)\n- [https://example.com/about]({0}/about.md)\n",
                root_display
            )
        );
        assert_eq!(summary.index_path, Some(root.join("site_index.md")));
    }

    #[tokio::test]
    async fn test_document_links_are_never_enqueued() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new().with_page(
            SEED,
            &page(
                "Home",
                &format!(
                    r#"<p>{}</p><a href="/brochure.pdf">Brochure</a><a href="https://other.com/">Elsewhere</a><a href="/page#top">Top</a>"#,
                    long_text('a')
                ),
            ),
        );

        let summary = run(&mut renderer, tmp.path(), None, None).await;

        assert_eq!(renderer.visits, vec![SEED]);
        assert_eq!(summary.queued_remaining, 0);
    }

    #[tokio::test]
    async fn test_thin_page_is_not_persisted_or_indexed() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new()
            .with_page(SEED, &page("Home", &format!(r#"<p>{}</p><a href="/thin">Thin</a>"#, long_text('a'))))
            .with_page("https://example.com/thin", &page("Thin", "<p>0123456789</p>"));

        let summary = run(&mut renderer, tmp.path(), None, None).await;

        assert_eq!(summary.pages_crawled, 2);
        assert_eq!(summary.pages_skipped, 1);
        assert!(!tmp.path().join("thin.md").exists());
        assert_eq!(summary.pages.len(), 1);
        assert_eq!(summary.pages[0].source_url, SEED);

        let index = fs::read_to_string(tmp.path().join("site_index.md")).unwrap();
        assert!(!index.contains("/thin"));
    }

    #[tokio::test]
    async fn test_render_failure_does_not_stop_crawl() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new()
            .with_page(
                SEED,
                &page("Home", &format!(r#"<p>{}</p><a href="/missing">Gone</a><a href="/next">Next</a>"#, long_text('a'))),
            )
            .with_page("https://example.com/next", &page("Next", &format!("<p>{}</p>", long_text('c'))));

        let summary = run(&mut renderer, tmp.path(), None, None).await;

        assert_eq!(
            renderer.visits,
            vec![SEED, "https://example.com/missing", "https://example.com/next"]
        );
        assert_eq!(summary.render_failures, 1);
        assert_eq!(summary.pages_crawled, 2);
        assert!(tmp.path().join("next.md").exists());
    }

    #[tokio::test]
    async fn test_page_budget_stops_crawl() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new()
            .with_page(SEED, &page("Home", &format!(r#"<p>{}</p><a href="/a">A</a>"#, long_text('a'))))
            .with_page("https://example.com/a", &page("A", &format!("<p>{}</p>", long_text('b'))));

        let summary = run(&mut renderer, tmp.path(), None, Some(1)).await;

        assert_eq!(renderer.visits, vec![SEED]);
        assert_eq!(summary.pages_crawled, 1);
        assert_eq!(summary.queued_remaining, 1);
        assert!(tmp.path().join("site_index.md").exists());
    }

    #[tokio::test]
    async fn test_duplicate_and_self_links_visit_once() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new()
            .with_page(
                SEED,
                &page(
                    "Home",
                    &format!(r#"<p>{}</p><a href="/">Home</a><a href="/a">A</a><a href="/a">A again</a>"#, long_text('a')),
                ),
            )
            .with_page(
                "https://example.com/a",
                &page("A", &format!(r#"<p>{}</p><a href="/">Back home</a>"#, long_text('b'))),
            );

        let summary = run(&mut renderer, tmp.path(), None, None).await;

        assert_eq!(renderer.visits, vec![SEED, "https://example.com/a"]);
        assert_eq!(summary.pages_crawled, 2);
    }

    #[tokio::test]
    async fn test_language_constraint_scopes_links_and_output() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new()
            .with_page(
                SEED,
                &page("Home", &format!(r#"<p>{}</p><a href="/en/docs">Docs</a><a href="/fr/docs">Docs FR</a>"#, long_text('a'))),
            )
            .with_page("https://example.com/en/docs", &page("Docs", &format!("<p>{}</p>", long_text('d'))));

        let summary = run(&mut renderer, tmp.path(), Some("en"), None).await;

        assert_eq!(renderer.visits, vec![SEED, "https://example.com/en/docs"]);
        assert_eq!(summary.pages_saved, 2);
        assert!(tmp.path().join("en").join("en_docs.md").exists());
        assert!(tmp.path().join("en").join("site_index_en.md").exists());
    }

    #[tokio::test]
    async fn test_nothing_saved_means_no_index() {
        let tmp = TempDir::new().unwrap();
        let mut renderer = MemoryRenderer::new();

        let summary = run(&mut renderer, tmp.path(), None, None).await;

        assert_eq!(summary.render_failures, 1);
        assert_eq!(summary.index_path, None);
        assert!(!tmp.path().join("site_index.md").exists());
    }
}
