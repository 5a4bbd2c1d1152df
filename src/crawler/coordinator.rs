//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires the frontier, tracker, pool and fetcher together for
//! one crawl run:
//! - Seeding the frontier with the start URL
//! - Registering the orchestrator's own party and the seed unit's party
//! - Submitting the seed unit and waiting for the party count to hit zero
//! - Shutting the pool down and summarising the run

use crate::config::{validate, CrawlConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::pool::WorkerPool;
use crate::crawler::unit::{CrawlContext, CrawlUnit};
use crate::output::CrawlReport;
use crate::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates crawl runs against a fetcher
pub struct Crawler<F: Fetcher> {
    config: CrawlConfig,
    fetcher: Arc<F>,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches pages over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn with_http(config: CrawlConfig) -> Result<Self, CrawlError> {
        validate(&config)?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler around any fetcher
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Runs one crawl to completion
    ///
    /// Must be called from within a tokio runtime. Returns once no unit is
    /// registered and unfinished.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl finished; fetch failures are counted,
    ///   not raised
    /// * `Err(CrawlError)` - The configuration is invalid or the seed could
    ///   not be submitted
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        validate(&self.config)?;

        let started_at = Utc::now();
        let start = Instant::now();

        let pool = WorkerPool::new(self.config.threads)?;
        let ctx = Arc::new(CrawlContext::new(
            Arc::clone(&self.fetcher),
            pool.clone(),
            self.config.max_depth,
        ));

        ctx.frontier.add(self.config.start_url.as_str());

        tracing::debug!("Seeded frontier with {}", self.config.start_url);

        // The orchestrator's party keeps the count above zero until the
        // seed's own party is registered.
        ctx.tracker.register();
        let seed = CrawlUnit::new(Arc::clone(&ctx), 0, ctx.tracker.register_party());
        let submitted = pool.submit(seed.into_job());

        ctx.tracker.arrive_and_await().await;
        pool.shutdown();
        submitted?;

        let elapsed = start.elapsed();
        let statistics = ctx.stats.snapshot();
        tracing::info!(
            "Crawl completed: {} URLs seen, {} pages fetched in {:?}",
            ctx.frontier.seen_count(),
            statistics.pages_fetched,
            elapsed
        );

        Ok(CrawlReport {
            start_url: self.config.start_url.clone(),
            max_depth: self.config.max_depth,
            threads: self.config.threads,
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: elapsed.as_millis() as u64,
            seen: ctx.frontier.seen_urls(),
            statistics,
        })
    }
}

/// Runs a crawl over HTTP with the given configuration
///
/// # Example
///
/// ```no_run
/// use breadth_crawl::config::CrawlConfig;
/// use breadth_crawl::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("https://example.com").with_max_depth(1);
/// let report = run_crawl(config).await?;
/// println!("Saw {} URLs", report.seen.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    Crawler::with_http(config)?.run().await
}
