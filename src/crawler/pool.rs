//! Fixed-capacity worker pool
//!
//! This module handles:
//! - Limiting how many crawl units run at once via a semaphore of slots
//! - Accepting submissions from inside running units without blocking
//! - Isolating panics so a faulting unit only loses its own slot time
//! - Refusing new work once the crawl is over

use crate::CrawlError;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;

/// A boxed unit of work the pool can run
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Pool of execution slots shared by every crawl unit
///
/// Cloning is cheap and every clone submits to the same slots. Submission
/// spawns the job straight away, so it never blocks even when all slots are
/// busy; the job then waits for a free slot before it starts running.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// One permit per execution slot
    slots: Arc<Semaphore>,

    /// Number of slots
    size: usize,

    /// Cleared by `shutdown`
    accepting: Arc<AtomicBool>,

    /// Runtime jobs are spawned onto
    runtime: Handle,
}

impl WorkerPool {
    /// Creates a pool with `size` slots on the current tokio runtime
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerPool)` - Pool ready to accept jobs
    /// * `Err(CrawlError::EmptyPool)` - `size` was zero
    /// * `Err(CrawlError::NoRuntime)` - Called outside a tokio runtime
    pub fn new(size: usize) -> Result<Self, CrawlError> {
        if size == 0 {
            return Err(CrawlError::EmptyPool);
        }
        let runtime = Handle::try_current().map_err(|_| CrawlError::NoRuntime)?;

        Ok(Self {
            slots: Arc::new(Semaphore::new(size)),
            size,
            accepting: Arc::new(AtomicBool::new(true)),
            runtime,
        })
    }

    /// Submits a job for execution on the next free slot
    ///
    /// Safe to call from inside a running job. A job still waiting for a slot
    /// when the pool shuts down is dropped without running.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The job was accepted
    /// * `Err(CrawlError::PoolShutDown)` - The pool no longer accepts work;
    ///   the job is dropped
    pub fn submit(&self, job: Job) -> Result<(), CrawlError> {
        if !self.accepting.load(Ordering::SeqCst) {
            return Err(CrawlError::PoolShutDown);
        }

        let slots = Arc::clone(&self.slots);
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let permit = match slots.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::debug!("Pool closed before job acquired a slot");
                    return;
                }
            };

            // Run in a separate task so a panic is contained and reported
            // while this slot is still held.
            if let Err(e) = runtime.spawn(job).await {
                if e.is_panic() {
                    tracing::error!("Worker job panicked: {}", e);
                } else {
                    tracing::warn!("Worker job was cancelled: {}", e);
                }
            }

            drop(permit);
        });

        Ok(())
    }

    /// Stops accepting new work
    ///
    /// Jobs already running are not interrupted.
    pub fn shutdown(&self) {
        if self.accepting.swap(false, Ordering::SeqCst) {
            tracing::debug!("Shutting down worker pool ({} slots)", self.size);
            self.slots.close();
        }
    }

    /// Returns true once `shutdown` has been called
    pub fn is_shut_down(&self) -> bool {
        !self.accepting.load(Ordering::SeqCst)
    }

    /// Number of slots
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots currently running a job
    pub fn active(&self) -> usize {
        self.size.saturating_sub(self.slots.available_permits())
    }
}
