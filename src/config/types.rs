use crate::config::parser::{parse_depth, parse_threads};
use crate::config::validation::validate;
use crate::ConfigError;
use serde::Serialize;
use std::time::Duration;

/// Depth used when none (or an unparseable one) is supplied
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Worker count used when none (or an unparseable one) is supplied
pub const DEFAULT_THREADS: usize = 4;

/// Per-request timeout applied by the HTTP fetcher
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// User agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = concat!("breadth-crawl/", env!("CARGO_PKG_VERSION"));

/// Settings for a single crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from (depth 0)
    pub start_url: String,

    /// Deepest level whose pages are fetched
    pub max_depth: u32,

    /// Number of worker slots
    pub threads: usize,

    /// Timeout for a single page fetch
    #[serde(with = "duration_millis")]
    pub fetch_timeout: Duration,

    /// User agent for page requests
    pub user_agent: String,
}

impl CrawlConfig {
    /// Creates a configuration with default depth, worker count and timeout
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            threads: DEFAULT_THREADS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Builds a configuration from raw user input
    ///
    /// The URL is trimmed and must be non-empty. Depth and thread values are
    /// parsed leniently: missing or malformed input falls back to the defaults.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlConfig)` - A validated configuration
    /// * `Err(ConfigError::EmptyStartUrl)` - The URL was blank
    pub fn from_inputs(
        url: &str,
        depth: Option<&str>,
        threads: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let start_url = url.trim();
        if start_url.is_empty() {
            return Err(ConfigError::EmptyStartUrl);
        }

        let config = Self {
            max_depth: parse_depth(depth),
            threads: parse_threads(threads),
            ..Self::new(start_url)
        };

        validate(&config)?;
        Ok(config)
    }

    /// Overrides the fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Overrides the maximum depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Overrides the worker count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
