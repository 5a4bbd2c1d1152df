//! Page fetcher collaborator
//!
//! This module defines the contract the crawl core uses to turn a URL into
//! the set of links on that page, and the HTTP implementation of it:
//! - Building an HTTP client with a bounded per-request timeout
//! - GET requests with redirect following
//! - Classifying every failure into a `FetchOutcome::Failed` value

use crate::config::CrawlConfig;
use crate::crawler::parser::extract_links;
use reqwest::{header, Client};
use std::collections::HashSet;
use std::future::Future;

/// Result of a fetch operation
///
/// Failures are values, not errors: the crawl core treats a failed page
/// exactly like a page without links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was fetched; these are its absolute links
    Links(HashSet<String>),

    /// The page could not be fetched or parsed
    Failed {
        /// Error description
        reason: String,
    },
}

impl FetchOutcome {
    /// Creates a failed outcome
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Returns true if the fetch failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The discovered links; empty for a failed fetch
    pub fn into_links(self) -> HashSet<String> {
        match self {
            Self::Links(links) => links,
            Self::Failed { .. } => HashSet::new(),
        }
    }
}

/// Turns a URL into the links found on that page
///
/// Implementations must bound the time spent per request and must never
/// panic or propagate an error: every failure becomes
/// [`FetchOutcome::Failed`].
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `url` and returns its links
    fn fetch_links(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.fetch_timeout)
        .connect_timeout(config.fetch_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher using the timeout and user agent from `config`
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_links(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send {
        fetch_url(&self.client, url)
    }
}

/// Fetches a URL and extracts its links
///
/// # Failure Classification
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Timeout | Failed("Request timeout") |
/// | Connection refused | Failed("Connection refused") |
/// | Non-2xx status | Failed("HTTP <code>") |
/// | Non-HTML Content-Type | Failed("Unsupported content type ...") |
/// | Body read error | Failed(error text) |
///
/// Relative links are resolved against the final URL after redirects.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::warn!("Failed to fetch URL: {} - {}", url, reason);
            return FetchOutcome::Failed { reason };
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Failed to fetch URL: {} - HTTP {}", url, status.as_u16());
        return FetchOutcome::failed(format!("HTTP {}", status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        tracing::warn!(
            "Failed to fetch URL: {} - unsupported content type '{}'",
            url,
            content_type
        );
        return FetchOutcome::failed(format!("Unsupported content type '{}'", content_type));
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchOutcome::Links(extract_links(&body, &final_url)),
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            FetchOutcome::failed(e.to_string())
        }
    }
}

/// Returns true for HTML and XHTML content types
fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}
