// src/crawl/filter.rs
// =============================================================================
// Decides whether a discovered URL belongs in the crawl at all.
//
// A URL is rejected when:
// - it is empty or does not parse
// - its authority (host plus explicit port) is not exactly the crawl domain;
//   subdomains count as different sites
// - it contains a fragment marker '#'
// - its path ends in a document, image or archive extension
// - it mentions a social media host
// - a language is set and the path is neither /{lang} nor under /{lang}/
//
// Pure function of its inputs: no I/O, no state.
// =============================================================================

use url::Url;

const SKIPPED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".gif", ".jpeg", ".doc", ".docx"];

const SOCIAL_HOSTS: &[&str] = &["facebook.com", "twitter.com", "linkedin.com", "instagram.com"];

/// The admissibility rules of one crawl, bound to its domain and language.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    domain: String,
    language: Option<String>,
}

impl UrlFilter {
    pub fn new(domain: impl Into<String>, language: Option<String>) -> Self {
        Self {
            domain: domain.into(),
            language,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_admissible(&self, url: &str) -> bool {
        is_admissible(url, &self.domain, self.language.as_deref())
    }
}

/// `host[:port]` of a URL, with userinfo when present. Hosts come back
/// lowercased and default ports are dropped, as the url crate normalizes them.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut authority = String::new();

    if !url.username().is_empty() {
        authority.push_str(url.username());
        if let Some(password) = url.password() {
            authority.push(':');
            authority.push_str(password);
        }
        authority.push('@');
    }

    authority.push_str(host);
    if let Some(port) = url.port() {
        authority.push_str(&format!(":{}", port));
    }

    Some(authority)
}

pub fn is_admissible(url: &str, domain: &str, language: Option<&str>) -> bool {
    if url.is_empty() {
        return false;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if authority(&parsed).as_deref() != Some(domain) {
        return false;
    }

    if url.contains('#') {
        return false;
    }

    let path = parsed.path().to_lowercase();
    if SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    let lowered = url.to_lowercase();
    if SOCIAL_HOSTS.iter().any(|host| lowered.contains(host)) {
        return false;
    }

    match language {
        Some(lang) => in_language(&path, lang),
        None => true,
    }
}

// `path` must already be lowercase
fn in_language(path: &str, language: &str) -> bool {
    let root = format!("/{}", language.to_lowercase());
    path == root || path.starts_with(&format!("{}/", root))
}
