//! Configuration module for Breadth-Crawl
//!
//! This module turns the three crawl inputs (start URL, maximum depth and
//! worker count) into a validated [`CrawlConfig`]. Malformed depth or thread
//! values fall back to documented defaults; only an empty start URL is fatal.
//!
//! # Example
//!
//! ```
//! use breadth_crawl::config::CrawlConfig;
//!
//! let config = CrawlConfig::from_inputs("https://example.com", Some("3"), Some("oops")).unwrap();
//! assert_eq!(config.max_depth, 3);
//! assert_eq!(config.threads, 4);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DEPTH, DEFAULT_THREADS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{parse_depth, parse_threads, prompt_inputs, RawInputs};
pub use validation::validate;
