//! The per-URL crawl unit
//!
//! A unit pulls one URL from the frontier, fetches it, offers the page's
//! links to the frontier and submits one child unit per newly accepted
//! link. Its own party is held in a [`Party`] guard, so the tracker sees it
//! arrive exactly once on every exit path.

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::pool::{Job, WorkerPool};
use crate::crawler::tracker::{CompletionTracker, Party};
use crate::output::CrawlStats;
use crate::state::UnitState;
use crate::CrawlError;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Services shared by every unit of one crawl
pub struct CrawlContext<F: Fetcher> {
    pub frontier: Frontier,
    pub fetcher: Arc<F>,
    pub tracker: Arc<CompletionTracker>,
    pub pool: WorkerPool,
    pub stats: CrawlStats,
    pub max_depth: u32,
}

impl<F: Fetcher> CrawlContext<F> {
    pub fn new(fetcher: Arc<F>, pool: WorkerPool, max_depth: u32) -> Self {
        Self {
            frontier: Frontier::new(),
            fetcher,
            tracker: Arc::new(CompletionTracker::new()),
            pool,
            stats: CrawlStats::new(),
            max_depth,
        }
    }
}

/// One unit of crawl work at a given depth
pub struct CrawlUnit<F: Fetcher> {
    ctx: Arc<CrawlContext<F>>,
    depth: u32,
    party: Party,
}

impl<F: Fetcher> CrawlUnit<F> {
    /// Creates a unit that owns an already registered `party`
    pub fn new(ctx: Arc<CrawlContext<F>>, depth: u32, party: Party) -> Self {
        Self { ctx, depth, party }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Boxes the unit so it can be submitted to a [`WorkerPool`]
    pub fn into_job(self) -> Job {
        Box::pin(async move {
            self.run().await;
        })
    }

    /// Runs the unit to completion and returns its terminal state
    ///
    /// Never returns an error and does not unwind: fetch failures and faults
    /// in Fetch, Expand or Spawn, panics included, are logged and reported
    /// as [`UnitState::Failed`].
    pub async fn run(self) -> UnitState {
        // `_party` lives until the end of this function, whichever return
        // is taken.
        let CrawlUnit {
            ctx,
            depth,
            party: _party,
        } = self;
        ctx.stats.record_unit_started();
        let mut state = UnitState::Dequeue;

        let url = match ctx.frontier.next() {
            Some(url) => url,
            None => {
                tracing::debug!("No queued URL for unit at depth {}", depth);
                ctx.stats.record_empty_dequeue();
                advance(&mut state, UnitState::Done, "-");
                return state;
            }
        };

        tracing::info!("Processing {} at depth {}", url, depth);

        if depth > ctx.max_depth {
            tracing::debug!(
                "Skipping {}: depth {} exceeds limit {}",
                url,
                depth,
                ctx.max_depth
            );
            ctx.stats.record_depth_skip();
            advance(&mut state, UnitState::Done, &url);
            return state;
        }

        let step = AssertUnwindSafe(fetch_and_expand(&ctx, &url, depth, &mut state))
            .catch_unwind()
            .await;
        if let Err(panic) = step {
            tracing::error!(
                "Error occurred in unit for {} at depth {}: {}",
                url,
                depth,
                panic_message(panic.as_ref())
            );
            if state == UnitState::Fetch {
                ctx.stats.record_fetch(0);
            }
            ctx.stats.record_fault();
            if state.is_active() {
                advance(&mut state, UnitState::Failed, &url);
            }
        }

        state
    }
}

/// Runs the Fetch, Expand and Spawn steps for `url`, leaving `state` terminal
async fn fetch_and_expand<F: Fetcher>(
    ctx: &Arc<CrawlContext<F>>,
    url: &str,
    depth: u32,
    state: &mut UnitState,
) {
    advance(state, UnitState::Fetch, url);
    let outcome = ctx.fetcher.fetch_links(url).await;
    if let FetchOutcome::Failed { reason } = &outcome {
        tracing::debug!("Fetch failed for {}: {}", url, reason);
        ctx.stats.record_fetch(0);
        ctx.stats.record_fetch_failure();
        advance(state, UnitState::Failed, url);
        return;
    }

    let links = outcome.into_links();
    ctx.stats.record_fetch(links.len());
    advance(state, UnitState::Expand, url);

    match expand_and_spawn(ctx, url, depth, links, state) {
        Ok(spawned) => {
            tracing::trace!("Unit for {} spawned {} children", url, spawned);
            advance(state, UnitState::Done, url);
        }
        Err(e) => {
            tracing::error!("Error occurred in unit for {} at depth {}: {}", url, depth, e);
            ctx.stats.record_fault();
            advance(state, UnitState::Failed, url);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Offers `links` to the frontier and submits a child for each new one
///
/// Every child's party is registered before any child is submitted. If a
/// submission is refused, the parties of the children not yet submitted are
/// dropped, which deregisters them.
fn expand_and_spawn<F: Fetcher>(
    ctx: &Arc<CrawlContext<F>>,
    url: &str,
    depth: u32,
    links: HashSet<String>,
    state: &mut UnitState,
) -> Result<usize, CrawlError> {
    if depth >= ctx.max_depth {
        if !links.is_empty() {
            tracing::trace!(
                "Not expanding {} links from {}: depth limit {} reached",
                links.len(),
                url,
                ctx.max_depth
            );
            ctx.stats.record_beyond_depth(links.len());
        }
        return Ok(0);
    }

    let mut fresh = 0;
    for link in links {
        if ctx.frontier.add(link) {
            ctx.stats.record_enqueued();
            fresh += 1;
        } else {
            ctx.stats.record_duplicate();
        }
    }

    if fresh == 0 {
        return Ok(0);
    }

    advance(state, UnitState::Spawn, url);

    let parties: Vec<Party> = (0..fresh).map(|_| ctx.tracker.register_party()).collect();
    for party in parties {
        let child = CrawlUnit::new(Arc::clone(ctx), depth + 1, party);
        ctx.pool.submit(child.into_job())?;
    }

    Ok(fresh)
}

fn advance(state: &mut UnitState, next: UnitState, url: &str) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal unit transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Unit {}: {} -> {}", url, state, next);
    *state = next;
}
