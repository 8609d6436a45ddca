// src/output/mod.rs
// =============================================================================
// This module writes qualified documents to disk and builds the site index.
//
// Layout:
//   <root>/<slot>.md               no language set
//   <root>/<lang>/<slot>.md        language set
//
// A slot name comes from the URL path: slashes trimmed at both ends, inner
// slashes turned into '_', and an empty path becomes "index". Characters that
// are not allowed in file names are replaced with '_' before writing.
//
// Every save reports one of three outcomes (saved / skipped / failed) instead
// of raising, so the crawl loop decides what a failure means.
// =============================================================================

mod index;

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use crate::extract::{qualify, Document, SkipReason};

pub use index::{IndexEntry, SiteIndex};

// Characters Windows and/or POSIX reject or misread in file names
const HOSTILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Result of one attempt to persist a page.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Skipped(SkipReason),
    Failed(PersistError),
}

/// Replaces every file-name-hostile character with '_'.
pub fn sanitize_slot(slot: &str) -> String {
    slot.chars()
        .map(|c| if HOSTILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Slot name for a URL: "https://example.com/docs/intro/" -> "docs_intro".
pub fn slot_name(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };

    let slot = path.trim_matches('/').replace('/', "_");
    if slot.is_empty() {
        "index".to_string()
    } else {
        slot
    }
}

/// Slot name of the site index for a crawl.
pub fn index_slot(language: Option<&str>) -> String {
    match language {
        Some(lang) => format!("site_index_{}", lang),
        None => "site_index".to_string(),
    }
}

/// Output directory of one crawl.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
    language: Option<String>,
}

impl OutputStore {
    pub fn new(root: impl Into<PathBuf>, language: Option<String>) -> Self {
        Self {
            root: root.into(),
            language,
        }
    }

    pub fn dir(&self) -> PathBuf {
        match &self.language {
            Some(lang) => self.root.join(lang),
            None => self.root.clone(),
        }
    }

    /// Path recorded in the index for a slot, always '/'-separated.
    pub fn index_path(&self, slot: &str) -> String {
        let root = self.root.to_string_lossy().replace('\\', "/");
        let mut path = root.trim_end_matches('/').to_string();
        if let Some(lang) = &self.language {
            path.push('/');
            path.push_str(lang);
        }
        format!("{}/{}.md", path, sanitize_slot(slot))
    }

    pub fn index_entry(&self, url: &str) -> IndexEntry {
        IndexEntry {
            source_url: url.to_string(),
            output_path: self.index_path(&slot_name(url)),
        }
    }

    /// Writes the document under `slot` if it qualifies.
    pub fn save(&self, document: &Document, slot: &str) -> SaveOutcome {
        if let Err(reason) = qualify(document) {
            warn!(slot, %reason, "skipping page");
            return SaveOutcome::Skipped(reason);
        }

        self.write_slot(slot, &document.to_markdown())
    }

    /// Writes the site index. The content threshold does not apply to the
    /// index, but an index with no entries is not written.
    pub fn save_index(&self, index: &SiteIndex) -> SaveOutcome {
        let slot = index_slot(self.language.as_deref());
        if index.is_empty() {
            warn!(slot = %slot, "no pages were saved, skipping index");
            return SaveOutcome::Skipped(SkipReason::NoEntries);
        }

        self.write_slot(&slot, &index.to_markdown())
    }

    fn write_slot(&self, slot: &str, markdown: &str) -> SaveOutcome {
        let dir = self.dir();
        if let Err(source) = fs::create_dir_all(&dir) {
            error!(path = %dir.display(), error = %source, "cannot create output directory");
            return SaveOutcome::Failed(PersistError::CreateDir { path: dir, source });
        }

        let path = dir.join(format!("{}.md", sanitize_slot(slot)));
        match fs::write(&path, markdown) {
            Ok(()) => {
                info!(path = %path.display(), lines = markdown.lines().count(), "saved page");
                SaveOutcome::Saved(path)
            }
            Err(source) => {
                error!(path = %path.display(), error = %source, "error saving file");
                SaveOutcome::Failed(PersistError::Write { path, source })
            }
        }
    }
}
