//! Breadth-Crawl: a concurrent breadth-first web crawler
//!
//! This crate discovers a growing set of URLs from a start page, dispatches
//! each one to a bounded pool of workers, deduplicates discoveries, and
//! detects global completion with a dynamic counting barrier.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Worker pool is shut down and no longer accepts work")]
    PoolShutDown,

    #[error("Worker pool must have at least one slot")]
    EmptyPool,

    #[error("No async runtime available to run the worker pool")]
    NoRuntime,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Start URL cannot be empty")]
    EmptyStartUrl,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CompletionTracker, Crawler, FetchOutcome, Fetcher, Frontier, HttpFetcher, WorkerPool};
pub use output::CrawlReport;
pub use state::UnitState;
