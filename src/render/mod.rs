// src/render/mod.rs
// =============================================================================
// This module defines how the crawler talks to whatever renders a page.
//
// The crawl core never touches a concrete HTML engine. It only needs:
// - navigate to a URL, then wait until the page reports it is ready
// - read the page title
// - query elements with CSS selectors
// - per element: text, tag name, visibility, attributes, parent, children
//
// Submodules:
// - dom: an owned DOM snapshot built on `scraper`, with element handles
// - http: a renderer that fetches pages with `reqwest`
// - memory (tests only): serves fixed HTML per URL
// =============================================================================

mod dom;
mod http;
#[cfg(test)]
pub mod memory;

use std::hash::Hash;
use std::time::Duration;
use thiserror::Error;

pub use http::HttpRenderer;

/// Everything that can go wrong while rendering or reading a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request itself failed (DNS, connection, TLS, body read)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    /// A CSS selector could not be parsed
    #[error("invalid selector '{0}'")]
    Selector(String),

    /// A capability was used before any page was loaded
    #[error("no page loaded")]
    NoPage,

    /// The element handle no longer points at an element
    #[error("stale element handle")]
    StaleElement,

    /// The page never reported readiness within the wait period
    #[error("page not ready after {0:?}")]
    Timeout(Duration),
}

/// A handle to one element of the currently rendered page.
///
/// Handles compare equal when they point at the same node, which is what the
/// extractor relies on for its "parent already matched" check.
pub trait PageElement: Clone + Eq + Hash + Sized {
    fn text(&self) -> Result<String, RenderError>;
    fn tag_name(&self) -> Result<String, RenderError>;
    fn is_visible(&self) -> Result<bool, RenderError>;
    fn attribute(&self, name: &str) -> Result<Option<String>, RenderError>;
    fn parent(&self) -> Result<Option<Self>, RenderError>;

    /// Descendants of this element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self>, RenderError>;
}

/// Something that can load a URL and expose the result as a queryable tree.
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    type Element: PageElement;

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError>;

    /// Resolves once the page has a root content element, or fails with
    /// `RenderError::Timeout` after `timeout`.
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), RenderError>;

    fn title(&self) -> Result<String, RenderError>;

    /// Elements of the whole page matching `selector`, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self::Element>, RenderError>;
}
