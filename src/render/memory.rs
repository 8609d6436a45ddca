// src/render/memory.rs
// In-memory renderer for tests: serves fixed HTML per URL and records visits.
// It can also be told to misbehave: never report readiness, fail chosen
// selectors, or fail reads on elements marked `data-broken`.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::dom::{DomElement, DomSnapshot};
use super::{PageElement, PageRenderer, RenderError};

// Elements carrying this attribute fail every text read
const BROKEN_ATTR: &str = "data-broken";

#[derive(Default)]
pub struct MemoryRenderer {
    pages: HashMap<String, String>,
    current: Option<DomSnapshot>,
    never_ready: bool,
    failing_selectors: HashSet<String>,
    pub visits: Vec<String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Every readiness wait times out, even on a page with a body.
    pub fn never_ready(mut self) -> Self {
        self.never_ready = true;
        self
    }

    /// Page-level queries for `selector` fail with `RenderError::Selector`.
    pub fn with_failing_selector(mut self, selector: &str) -> Self {
        self.failing_selectors.insert(selector.to_string());
        self
    }
}

impl PageRenderer for MemoryRenderer {
    type Element = FixtureElement;

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.visits.push(url.to_string());
        self.current = None;
        let html = self
            .pages
            .get(url)
            .ok_or(RenderError::Status(reqwest::StatusCode::NOT_FOUND))?;
        self.current = Some(DomSnapshot::parse(html));
        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), RenderError> {
        match &self.current {
            Some(page) if page.has_body() && !self.never_ready => Ok(()),
            Some(_) => Err(RenderError::Timeout(timeout)),
            None => Err(RenderError::NoPage),
        }
    }

    fn title(&self) -> Result<String, RenderError> {
        self.current.as_ref().ok_or(RenderError::NoPage)?.title()
    }

    fn query(&self, selector: &str) -> Result<Vec<FixtureElement>, RenderError> {
        if self.failing_selectors.contains(selector) {
            return Err(RenderError::Selector(selector.to_string()));
        }
        let found = self.current.as_ref().ok_or(RenderError::NoPage)?.query(selector)?;
        Ok(found.into_iter().map(FixtureElement).collect())
    }
}

/// A `DomElement` whose text read fails when it is marked `data-broken`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureElement(DomElement);

impl PageElement for FixtureElement {
    fn text(&self) -> Result<String, RenderError> {
        if self.0.attribute(BROKEN_ATTR)?.is_some() {
            return Err(RenderError::StaleElement);
        }
        self.0.text()
    }

    fn tag_name(&self) -> Result<String, RenderError> {
        self.0.tag_name()
    }

    fn is_visible(&self) -> Result<bool, RenderError> {
        self.0.is_visible()
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, RenderError> {
        self.0.attribute(name)
    }

    fn parent(&self) -> Result<Option<Self>, RenderError> {
        Ok(self.0.parent()?.map(FixtureElement))
    }

    fn query(&self, selector: &str) -> Result<Vec<Self>, RenderError> {
        Ok(self.0.query(selector)?.into_iter().map(FixtureElement).collect())
    }
}
