//! Accounting of open connections.
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Shared counters of connections acquired and released.
///
/// Cloning the tracker shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    active: AtomicUsize,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections acquired and not yet released.
    pub fn active(&self) -> usize {
        self.counters.active.load(Ordering::SeqCst)
    }

    /// Total number of connections ever acquired.
    pub fn acquired(&self) -> usize {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    /// Total number of connections released.
    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    pub(super) fn acquire(&self) -> Lease {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        self.counters.active.fetch_add(1, Ordering::SeqCst);

        Lease {
            counters: Arc::clone(&self.counters),
        }
    }
}

/// Held by a tracked connection. Released exactly once, on drop.
#[derive(Debug)]
pub(super) struct Lease {
    counters: Arc<Counters>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_is_released_on_drop() {
        let tracker = ConnectionTracker::new();

        let lease = tracker.acquire();
        assert_eq!(tracker.active(), 1);
        assert_eq!(tracker.released(), 0);

        drop(lease);
        assert_eq!(tracker.active(), 0);
        assert_eq!(tracker.acquired(), 1);
        assert_eq!(tracker.released(), 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let tracker = ConnectionTracker::new();
        let other = tracker.clone();

        let _a = tracker.acquire();
        let _b = other.acquire();

        assert_eq!(tracker.active(), 2);
        assert_eq!(other.acquired(), 2);
    }
}
