//! Ordering guard for overlapping refreshes.
//!
//! Each refresh takes a ticket when it starts. Its result is rendered only if
//! no refresh holding a later ticket has rendered already, so the board always
//! reflects the most recently started fetch that completed.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Monotonic sequence number of a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RefreshGuard {
    issued: AtomicU64,
    /// Ticket of the last rendered refresh. Held across the render itself.
    rendered: Mutex<u64>,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next ticket. Tickets start at 1.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Runs `render` unless a newer ticket has already rendered.
    /// Returns whether the render ran.
    pub async fn apply<F, Fut>(&self, ticket: Ticket, render: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut rendered = self.rendered.lock().await;
        if ticket.0 <= *rendered {
            return false;
        }
        render().await;
        *rendered = ticket.0;
        true
    }

    /// Ticket of the last refresh that made it to the display, if any.
    #[cfg(test)]
    pub async fn last_rendered(&self) -> Option<Ticket> {
        let rendered = *self.rendered.lock().await;
        (rendered > 0).then_some(Ticket(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tickets_are_monotonic() {
        let guard = RefreshGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(second > first);
        assert_eq!(first.value(), 1);
    }

    #[tokio::test]
    async fn test_stale_ticket_is_dropped() {
        let guard = RefreshGuard::new();
        let older = guard.issue();
        let newer = guard.issue();

        assert!(guard.apply(newer, || async {}).await);
        assert!(!guard.apply(older, || async {}).await);
        assert_eq!(guard.last_rendered().await, Some(newer));
    }

    #[tokio::test]
    async fn test_in_order_completion_renders_both() {
        let guard = RefreshGuard::new();
        assert_eq!(guard.last_rendered().await, None);

        let older = guard.issue();
        let newer = guard.issue();
        assert!(guard.apply(older, || async {}).await);
        assert!(guard.apply(newer, || async {}).await);
    }
}
