// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: URLs waiting to be visited plus URLs already visited.
//
// - pop() hands out URLs in the order they were discovered (FIFO)
// - push() ignores a URL that is visited or already waiting
// - comparison is exact string equality, no canonicalization
//
// The filter decides which URLs are allowed; the frontier decides which are
// new. Only the crawl loop mutates it, so there is no locking.
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues `url` unless it is visited or already queued. Returns whether
    /// the queue changed.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.is_visited(&url) || self.is_queued(&url) {
            return false;
        }

        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
