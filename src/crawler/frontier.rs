//! Deduplicating crawl frontier
//!
//! The frontier records every URL it has ever accepted and queues each one
//! exactly once. The seen-set is sharded so unrelated URLs never contend on
//! the same lock, and the queue is lock-free.

use crossbeam::queue::SegQueue;
use dashmap::DashSet;

/// Thread-safe set of seen URLs plus a queue of URLs awaiting a unit
///
/// URLs are opaque strings compared byte-for-byte. A URL enters the queue
/// only on the call that first marks it seen.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Every URL ever accepted
    seen: DashSet<String>,

    /// Accepted URLs not yet handed to a unit
    queue: SegQueue<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` seen and queues it if it has not been seen before
    ///
    /// # Returns
    ///
    /// * `true` - This call was the first to see `url`; it is now queued
    /// * `false` - `url` was already seen; nothing changed
    pub fn add(&self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.insert(url.clone()) {
            self.queue.push(url);
            true
        } else {
            false
        }
    }

    /// Takes the next queued URL without waiting
    ///
    /// `None` only means nothing is queued right now. Running units may
    /// still add more.
    pub fn next(&self) -> Option<String> {
        self.queue.pop()
    }

    /// Snapshot of queue emptiness, for diagnostics only
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs currently queued
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct URLs ever accepted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if `url` has been accepted
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Snapshot of all seen URLs, sorted
    pub fn seen_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.seen.iter().map(|url| url.key().clone()).collect();
        urls.sort();
        urls
    }
}
