//! In-memory fetcher used by the crawler's unit tests

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

/// Serves a fixed link graph and records every fetch
///
/// URLs without a page fail to fetch.
#[derive(Default)]
pub struct GraphFetcher {
    pages: HashMap<String, Vec<String>>,
    panics: HashSet<String>,
    delay: Option<Duration>,
    fetched: Mutex<Vec<String>>,
}

impl GraphFetcher {
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            links.iter().map(|link| link.to_string()).collect(),
        );
        self
    }

    /// Makes fetching `url` panic, standing in for an unexpected fault
    pub fn panic_on(mut self, url: &str) -> Self {
        self.panics.insert(url.to_string());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        let mut fetched = self.fetched.lock().unwrap().clone();
        fetched.sort();
        fetched
    }
}

impl Fetcher for GraphFetcher {
    fn fetch_links(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send {
        self.fetched.lock().unwrap().push(url.to_string());

        let outcome = match self.pages.get(url) {
            Some(links) => FetchOutcome::Links(links.iter().cloned().collect()),
            None => FetchOutcome::failed(format!("no page for {}", url)),
        };
        let panics = self.panics.contains(url);
        let delay = self.delay;
        let url = url.to_string();

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if panics {
                panic!("fetcher fault for {}", url);
            }
            outcome
        }
    }
}
