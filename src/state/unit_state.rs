/// Crawl unit state definitions
///
/// A unit walks `Dequeue -> Fetch -> Expand -> Spawn -> Done`. `Done` is also
/// reachable straight from `Dequeue` (nothing queued, or depth over the
/// limit) and from `Expand` (no new links). `Failed` absorbs a unit whose
/// fetch failed or whose expansion faulted.
use std::fmt;

/// Represents the current state of a crawl unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitState {
    // ===== Active States =====
    /// Pulling a URL from the frontier
    Dequeue,

    /// Waiting on the fetcher for the page's links
    Fetch,

    /// Offering discovered links to the frontier
    Expand,

    /// Registering and submitting child units
    Spawn,

    // ===== Terminal States =====
    /// Finished normally, possibly without doing any work
    Done,

    /// Fetch failed or expansion faulted; the subtree is forfeited
    Failed,
}

impl UnitState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if this unit is still working
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: UnitState) -> bool {
        use UnitState::*;

        matches!(
            (self, next),
            (Dequeue, Fetch)
                | (Dequeue, Done)
                | (Fetch, Expand)
                | (Fetch, Failed)
                | (Expand, Spawn)
                | (Expand, Done)
                | (Expand, Failed)
                | (Spawn, Done)
                | (Spawn, Failed)
        )
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dequeue => "dequeue",
            Self::Fetch => "fetch",
            Self::Expand => "expand",
            Self::Spawn => "spawn",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
