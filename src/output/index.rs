// src/output/index.rs
// The site index: one markdown bullet per persisted page, sorted by URL.

use serde::Serialize;

const INDEX_HEADING: &str = "# Site Content Index";

/// Where one crawled URL was written, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub source_url: String,
    pub output_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    entries: Vec<IndexEntry>,
}

impl SiteIndex {
    /// Builds the index; entries are ordered by source URL whatever order
    /// they were crawled in.
    pub fn new(mut entries: Vec<IndexEntry>) -> Self {
        entries.sort_by(|a, b| a.source_url.cmp(&b.source_url));
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("{}\n\n", INDEX_HEADING);
        for entry in &self.entries {
            markdown.push_str(&format!("- [{}]({})\n", entry.source_url, entry.output_path));
        }
        markdown
    }
}
