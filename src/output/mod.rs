//! Output module for crawl reports
//!
//! This module handles:
//! - Collecting crawl counters while units run
//! - Summarising a finished crawl as a [`CrawlReport`]
//! - Rendering the report to the console or as JSON

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics, CrawlStats};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Summary of one finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// URL the crawl started from
    pub start_url: String,

    /// Depth limit used
    pub max_depth: u32,

    /// Number of worker slots used
    pub threads: usize,

    /// Wall-clock start time
    pub started_at: DateTime<Utc>,

    /// Wall-clock finish time
    pub finished_at: DateTime<Utc>,

    /// Elapsed time in milliseconds
    pub elapsed_ms: u64,

    /// Every URL the frontier accepted, sorted
    pub seen: Vec<String>,

    /// Counter snapshot
    pub statistics: CrawlStatistics,
}

impl CrawlReport {
    /// Elapsed time as a duration
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Renders the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Prints a crawl report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!("Start URL: {}", report.start_url);
    println!("Max depth: {}", report.max_depth);
    println!("Threads: {}", report.threads);
    println!("Started: {}", report.started_at.to_rfc3339());
    println!("Finished: {}", report.finished_at.to_rfc3339());
    println!();

    println!("Seen URLs ({}):", report.seen.len());
    for url in &report.seen {
        println!("  - {}", url);
    }
    println!();

    print_statistics(&report.statistics);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CrawlReport {
        let now = Utc::now();
        CrawlReport {
            start_url: "https://example.com/".to_string(),
            max_depth: 2,
            threads: 4,
            started_at: now,
            finished_at: now,
            elapsed_ms: 1500,
            seen: vec!["https://example.com/".to_string()],
            statistics: CrawlStatistics {
                units_started: 1,
                pages_fetched: 1,
                ..CrawlStatistics::default()
            },
        }
    }

    #[test]
    fn test_elapsed() {
        assert_eq!(sample_report().elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_to_json() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["start_url"], "https://example.com/");
        assert_eq!(value["max_depth"], 2);
        assert_eq!(value["elapsed_ms"], 1500);
        assert_eq!(value["seen"][0], "https://example.com/");
        assert_eq!(value["statistics"]["pages_fetched"], 1);
    }
}
