// src/extract/links.rs
// =============================================================================
// Finds the outbound links of the loaded page.
//
// Every <a> on the page counts, not only those inside content containers.
// An href is resolved against the page URL the way a browser resolves it,
// so "/docs" on https://example.com/page becomes https://example.com/docs.
// Fragments are kept on purpose: the URL filter is the one that rejects them.
//
// Whether a link is worth crawling is not decided here.
// =============================================================================

use tracing::{debug, error};
use url::Url;

use crate::render::{PageElement, PageRenderer};

/// Absolute URLs of every link on the page, in document order, duplicates
/// removed.
pub fn discover_links<R: PageRenderer>(renderer: &R, page_url: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            error!(url = page_url, error = %e, "cannot resolve links against page url");
            return links;
        }
    };

    let anchors = match renderer.query("a") {
        Ok(anchors) => anchors,
        Err(e) => {
            error!(url = page_url, error = %e, "error extracting links");
            return links;
        }
    };

    for anchor in anchors {
        let href = match anchor.attribute("href") {
            Ok(Some(href)) => href,
            Ok(None) => continue,
            Err(e) => {
                debug!(error = %e, "skipping unreadable link");
                continue;
            }
        };

        if let Some(absolute) = resolve_link(&base, &href) {
            if !links.contains(&absolute) {
                links.push(absolute);
            }
        }
    }

    links
}

// Resolves an href to an absolute http(s) URL
//
// Examples (base = https://example.com/page):
//   "/docs"              -> Some("https://example.com/docs")
//   "../other"           -> Some("https://example.com/other")
//   "#top"               -> Some("https://example.com/page#top")
//   "mailto:a@b.c"       -> None
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}
