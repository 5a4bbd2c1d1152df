//! Crawler module for concurrent breadth-first crawling
//!
//! This module contains the core crawling logic, including:
//! - The deduplicating frontier of discovered URLs
//! - The dynamic completion barrier that detects the end of a crawl
//! - The fixed-size worker pool units run on
//! - The per-URL crawl unit and the orchestrator that seeds it
//! - HTTP fetching and HTML link extraction

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod pool;
mod tracker;
mod unit;

#[cfg(test)]
mod testing;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use pool::{Job, WorkerPool};
pub use tracker::{CompletionTracker, Party};
pub use unit::{CrawlContext, CrawlUnit};

use crate::config::CrawlConfig;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Seed the frontier with the start URL
/// 4. Run crawl units until no registered unit is unfinished
/// 5. Summarise the run
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - Crawl could not start
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    run_crawl(config).await
}
