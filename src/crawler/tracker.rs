//! Dynamic counting barrier for crawl completion
//!
//! The tracker counts in-flight parties: every crawl unit that has been
//! registered but has not finished, plus the orchestrator while it sets up
//! the crawl. The count can grow while the crawl runs, and a single waiter
//! is released when it returns to zero.
//!
//! Ordering rules the crawler relies on:
//! - a child's party is registered before the child is submitted
//! - a unit deregisters only when it is finished (its [`Party`] is dropped)
//! - the orchestrator registers its own party before submitting the seed and
//!   only arrives once the seed's party exists

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counting barrier whose number of parties changes at runtime
#[derive(Debug, Default)]
pub struct CompletionTracker {
    /// Registered parties that have not yet arrived
    parties: AtomicUsize,

    /// Signalled when `parties` drops to zero
    zero: Notify,
}

impl CompletionTracker {
    /// Creates a tracker with no parties
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one in-flight party and returns the new count
    pub fn register(&self) -> usize {
        self.parties.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Registers a party owned by the returned guard
    ///
    /// Dropping the guard arrives and deregisters exactly once, whichever
    /// way its owner exits.
    pub fn register_party(self: &Arc<Self>) -> Party {
        self.register();
        Party {
            tracker: Arc::clone(self),
        }
    }

    /// Removes one party and returns the remaining count
    ///
    /// Wakes the waiter when the count reaches zero. Deregistering with no
    /// parties left is a bookkeeping bug; it is logged and the count stays
    /// at zero.
    pub fn arrive_and_deregister(&self) -> usize {
        match self
            .parties
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(1) => {
                tracing::trace!("Party count reached zero");
                self.zero.notify_waiters();
                0
            }
            Ok(previous) => previous - 1,
            Err(_) => {
                tracing::error!("arrive_and_deregister called with no registered parties");
                0
            }
        }
    }

    /// Waits until the party count is, or becomes, zero
    pub async fn await_zero(&self) {
        loop {
            let notified = self.zero.notified();
            tokio::pin!(notified);

            // Enable before checking so a zero-crossing between the load and
            // the await is not lost.
            notified.as_mut().enable();
            if self.parties.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Arrives with the caller's own party and waits for zero
    ///
    /// The orchestrator calls this once, after registering itself and
    /// submitting the first unit.
    pub async fn arrive_and_await(&self) {
        self.arrive_and_deregister();
        self.await_zero().await;
    }

    /// Snapshot of the current party count
    pub fn parties(&self) -> usize {
        self.parties.load(Ordering::SeqCst)
    }
}

/// A registered party that arrives and deregisters when dropped
#[derive(Debug)]
pub struct Party {
    tracker: Arc<CompletionTracker>,
}

impl Drop for Party {
    fn drop(&mut self) {
        self.tracker.arrive_and_deregister();
    }
}
