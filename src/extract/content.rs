// src/extract/content.rs
// =============================================================================
// Builds a Document from the page currently loaded in a renderer.
//
// How it works:
// 1. The page title becomes the level-1 heading
// 2. Wait (bounded) for the page to report readiness; a timeout only warns
// 3. Collect candidate containers from every selector in CONTENT_SELECTORS,
//    falling back to <body> when none match. Containers may overlap.
// 4. In each container, walk the text-bearing elements and turn each visible,
//    non-empty one into a heading, list item or paragraph block, skipping any
//    element whose parent was matched by the same walk
// 5. In each container, add visible button/link text longer than
//    MIN_ACTION_TEXT characters as italic blocks
//
// Failures are absorbed at the smallest scope: an unreadable element is
// skipped, a failing selector moves on to the next one, and a page with no
// readable body yields a document with no body blocks.
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use super::{clean_text, BlockKind, ContentBlock, Document};
use crate::render::{PageElement, PageRenderer, RenderError};

// Tried in this order; every match from every selector is kept
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "#content",
    ".content",
    ".main-content",
    ".page-content",
    ".entry-content",
    ".post-content",
    "section",
    ".section",
    "[role='main']",
    ".container",
    "#main",
    ".main",
    ".body-content",
];

const TEXT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, li, span, div";
const ACTION_SELECTOR: &str = "button, a";

// Button/link text this short ("More", "Go") is navigation noise
const MIN_ACTION_TEXT: usize = 5;

/// Extracts the loaded page into a Document. Never fails: whatever could be
/// read is returned.
pub async fn extract_document<R: PageRenderer>(
    renderer: &R,
    source_url: &str,
    ready_timeout: Duration,
) -> Document {
    let title = match renderer.title() {
        Ok(raw) => Some(clean_text(&raw)).filter(|t| !t.is_empty()),
        Err(e) => {
            debug!(url = source_url, error = %e, "could not read page title");
            None
        }
    };

    let mut document = Document {
        source_url: source_url.to_string(),
        title,
        blocks: Vec::new(),
    };

    if let Err(e) = renderer.wait_until_ready(ready_timeout).await {
        warn!(url = source_url, error = %e, "timeout waiting for content, extracting what is available");
    }

    let containers = match find_containers(renderer) {
        Ok(containers) => containers,
        Err(e) => {
            warn!(url = source_url, error = %e, "no readable content on page");
            return document;
        }
    };

    for container in &containers {
        if let Err(e) = extract_container(container, &mut document.blocks) {
            warn!(url = source_url, error = %e, "error processing main content section");
        }
    }

    document
}

fn find_containers<R: PageRenderer>(renderer: &R) -> Result<Vec<R::Element>, RenderError> {
    let mut containers = Vec::new();
    for selector in CONTENT_SELECTORS {
        match renderer.query(selector) {
            Ok(found) => containers.extend(found),
            Err(e) => debug!(selector, error = %e, "content selector failed"),
        }
    }

    if containers.is_empty() {
        let body = renderer
            .query("body")?
            .into_iter()
            .next()
            .ok_or(RenderError::StaleElement)?;
        containers.push(body);
    }

    Ok(containers)
}

fn extract_container<E: PageElement>(
    container: &E,
    blocks: &mut Vec<ContentBlock>,
) -> Result<(), RenderError> {
    let elements = container.query(TEXT_SELECTOR)?;
    let matched: HashSet<&E> = elements.iter().collect();

    for element in &elements {
        match text_block(element, &matched) {
            Ok(Some(block)) => blocks.push(block),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "skipping unreadable element"),
        }
    }

    for element in container.query(ACTION_SELECTOR)? {
        match action_block(&element) {
            Ok(Some(block)) => blocks.push(block),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "skipping unreadable action element"),
        }
    }

    Ok(())
}

fn text_block<E: PageElement>(
    element: &E,
    matched: &HashSet<&E>,
) -> Result<Option<ContentBlock>, RenderError> {
    if !element.is_visible()? {
        return Ok(None);
    }

    // The parent's own block already carries this element's text
    if let Some(parent) = element.parent()? {
        if matched.contains(&parent) {
            return Ok(None);
        }
    }

    let text = clean_text(&element.text()?);
    if text.is_empty() {
        return Ok(None);
    }

    let tag = element.tag_name()?.to_ascii_lowercase();
    let kind = match heading_level(&tag) {
        Some(level) => BlockKind::Heading(level),
        None if tag == "li" => BlockKind::ListItem,
        None => BlockKind::Paragraph,
    };

    Ok(Some(ContentBlock::new(kind, text)))
}

fn action_block<E: PageElement>(element: &E) -> Result<Option<ContentBlock>, RenderError> {
    if !element.is_visible()? {
        return Ok(None);
    }

    let text = clean_text(&element.text()?);
    if text.chars().count() > MIN_ACTION_TEXT {
        Ok(Some(ContentBlock::new(BlockKind::Emphasis, text)))
    } else {
        Ok(None)
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(digit @ '1'..='6'), None) => Some(digit as u8 - b'0'),
        _ => None,
    }
}
