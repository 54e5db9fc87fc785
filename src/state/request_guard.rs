use leptos::prelude::on_cleanup;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Decides whether a response may still touch view state.
///
/// Each request holds a [`RequestTicket`]. A ticket goes stale when a newer
/// request is started with [`begin`](RequestGuard::begin) or when the owning
/// view is torn down.
#[derive(Clone, Default)]
pub(crate) struct RequestGuard {
    generation: Arc<AtomicU64>,
}

#[derive(Clone)]
pub(crate) struct RequestTicket {
    generation: Arc<AtomicU64>,
    issued_at: u64,
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.issued_at
    }
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a request that supersedes every earlier one.
    pub fn begin(&self) -> RequestTicket {
        let issued_at = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket {
            generation: self.generation.clone(),
            issued_at,
        }
    }

    /// Ticket that stays valid alongside the other outstanding ones.
    pub fn join(&self) -> RequestTicket {
        RequestTicket {
            generation: self.generation.clone(),
            issued_at: self.generation.load(Ordering::Acquire),
        }
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Guard that invalidates itself when the calling component is unmounted.
pub(crate) fn use_request_guard() -> RequestGuard {
    let guard = RequestGuard::new();
    let on_drop = guard.clone();
    on_cleanup(move || on_drop.invalidate());
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ticket_is_current() {
        let guard = RequestGuard::new();
        assert!(guard.begin().is_current());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_joined_tickets_coexist() {
        let guard = RequestGuard::new();
        let a = guard.join();
        let b = guard.join();
        assert!(a.is_current());
        assert!(b.is_current());
    }

    #[test]
    fn test_invalidate_makes_everything_stale() {
        let guard = RequestGuard::new();
        let loading = guard.begin();
        let deleting = guard.join();
        guard.clone().invalidate();
        assert!(!loading.is_current());
        assert!(!deleting.is_current());
    }
}
