//! Live crawl counters
//!
//! Units bump these counters as they run; a [`CrawlStatistics`] snapshot is
//! taken once the crawl has finished.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every unit of a crawl
#[derive(Debug, Default)]
pub struct CrawlStats {
    units_started: AtomicU64,
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    links_discovered: AtomicU64,
    links_enqueued: AtomicU64,
    duplicate_links: AtomicU64,
    links_beyond_depth: AtomicU64,
    depth_skipped_units: AtomicU64,
    empty_dequeues: AtomicU64,
    unit_faults: AtomicU64,
}

impl CrawlStats {
    /// Creates zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unit_started(&self) {
        self.units_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed fetch and how many links it returned
    pub fn record_fetch(&self, links: usize) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
        self.links_discovered
            .fetch_add(links as u64, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_enqueued(&self) {
        self.links_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicate_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_beyond_depth(&self, links: usize) {
        self.links_beyond_depth
            .fetch_add(links as u64, Ordering::Relaxed);
    }

    pub fn record_depth_skip(&self) {
        self.depth_skipped_units.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_dequeue(&self) {
        self.empty_dequeues.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fault(&self) {
        self.unit_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values
    pub fn snapshot(&self) -> CrawlStatistics {
        CrawlStatistics {
            units_started: self.units_started.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            links_enqueued: self.links_enqueued.load(Ordering::Relaxed),
            duplicate_links: self.duplicate_links.load(Ordering::Relaxed),
            links_beyond_depth: self.links_beyond_depth.load(Ordering::Relaxed),
            depth_skipped_units: self.depth_skipped_units.load(Ordering::Relaxed),
            empty_dequeues: self.empty_dequeues.load(Ordering::Relaxed),
            unit_faults: self.unit_faults.load(Ordering::Relaxed),
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStatistics {
    /// Units that ran (including no-op units)
    pub units_started: u64,

    /// Fetch attempts, successful or not
    pub pages_fetched: u64,

    /// Fetch attempts that failed
    pub fetch_failures: u64,

    /// Links returned by successful fetches
    pub links_discovered: u64,

    /// Links accepted as new by the frontier
    pub links_enqueued: u64,

    /// Links the frontier had already seen
    pub duplicate_links: u64,

    /// Links dropped because their page sat at the depth limit
    pub links_beyond_depth: u64,

    /// Units that skipped work because their depth exceeded the limit
    pub depth_skipped_units: u64,

    /// Units that found nothing queued
    pub empty_dequeues: u64,

    /// Units that faulted after fetching
    pub unit_faults: u64,
}

impl CrawlStatistics {
    /// Fraction of fetch attempts that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        let succeeded = self.pages_fetched.saturating_sub(self.fetch_failures);
        (succeeded as f64 / self.pages_fetched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Units:");
    println!("  Started: {}", stats.units_started);
    println!("  Skipped (depth): {}", stats.depth_skipped_units);
    println!("  Empty dequeues: {}", stats.empty_dequeues);
    println!("  Faults: {}", stats.unit_faults);
    println!();

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Failed: {}", stats.fetch_failures);
    println!();

    println!("Links:");
    println!("  Discovered: {}", stats.links_discovered);
    println!("  Enqueued: {}", stats.links_enqueued);
    println!("  Duplicates: {}", stats.duplicate_links);
    println!("  Beyond depth: {}", stats.links_beyond_depth);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched successfully)",
        stats.success_rate(),
        stats.pages_fetched.saturating_sub(stats.fetch_failures),
        stats.pages_fetched
    );
}
