// src/extract/mod.rs
// =============================================================================
// This module turns a rendered page into a markdown document.
//
// Submodules:
// - text: whitespace cleanup and markdown escaping
// - content: walks the page's content containers and builds blocks
// - links: finds outbound links for the crawl frontier
// - qualify: decides whether a document has enough substance to keep
//
// A Document is built once per page and never changed afterwards.
// =============================================================================

mod content;
mod links;
mod qualify;
mod text;

pub use content::extract_document;
pub use links::discover_links;
pub use qualify::{qualify, SkipReason};
pub use text::clean_text;

/// What kind of markdown line a block becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `#`..`######`; the level is always 1 to 6
    Heading(u8),
    Paragraph,
    ListItem,
    /// Call-to-action text from buttons and links, rendered in italics
    Emphasis,
}

/// One unit of extracted text. `text` is already cleaned and escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn to_markdown(&self) -> String {
        match self.kind {
            BlockKind::Heading(level) => format!("{} {}", "#".repeat(level as usize), self.text),
            BlockKind::Paragraph => self.text.clone(),
            BlockKind::ListItem => format!("- {}", self.text),
            BlockKind::Emphasis => format!("_{}_", self.text),
        }
    }
}

/// A crawled page as markdown blocks.
///
/// The title heading and the provenance line form the preamble; `blocks`
/// holds only the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source_url: String,
    pub title: Option<String>,
    pub blocks: Vec<ContentBlock>,
}

impl Document {
    /// Preamble lines: the title heading (when present) then the provenance line.
    pub fn preamble(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if let Some(title) = &self.title {
            lines.push(ContentBlock::new(BlockKind::Heading(1), title.as_str()).to_markdown());
        }
        lines.push(format!("*Original URL: {}*", self.source_url));
        lines
    }

    pub fn body(&self) -> Vec<String> {
        self.blocks.iter().map(ContentBlock::to_markdown).collect()
    }

    /// Full markdown text: one line per block, blank line between blocks.
    pub fn to_markdown(&self) -> String {
        self.preamble()
            .into_iter()
            .chain(self.body())
            .map(|line| format!("{}\n", line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
