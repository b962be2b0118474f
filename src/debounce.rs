//! Debounced search input.
//!
//! Rapid input (keystrokes, pasted lines) should not trigger a search per
//! event. [`Debouncer::submit`] waits for a quiet period and only lets the
//! newest submission through; every superseded submission resolves to
//! `None`. Ordering is by submission, not by completion, via the core
//! [`SearchSequence`]: the ticket is taken when `submit` is called, before
//! the returned future is spawned or polled.

use paper_catalog_core::session::{SearchSequence, Ticket};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default quiet period before a search runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    sequence: Arc<SearchSequence>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            sequence: Arc::new(SearchSequence::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Registers a new submission. Every ticket issued earlier is
    /// superseded from this point on.
    pub fn ticket(&self) -> Ticket {
        self.sequence.next_ticket()
    }

    /// Waits out the quiet period, then returns `Some(value)` if `ticket`
    /// is still the newest one issued.
    pub async fn wait<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        tokio::time::sleep(self.window).await;
        if self.sequence.is_current(ticket) {
            Some(value)
        } else {
            tracing::trace!(?ticket, "debounced input superseded");
            None
        }
    }

    /// Takes a ticket now and returns a future that resolves to
    /// `Some(value)` only if no newer value is submitted within the window.
    pub fn submit<T>(&self, value: T) -> impl Future<Output = Option<T>> + Send + 'static
    where
        T: Send + 'static,
    {
        let ticket = self.ticket();
        let debouncer = self.clone();
        async move { debouncer.wait(ticket, value).await }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_submission_passes() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.submit("net").await, Some("net"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_burst_keeps_only_last() {
        let debouncer = Debouncer::new(Duration::from_millis(20));

        let handles: Vec<_> = ["n", "ne", "net"]
            .into_iter()
            .map(|query| tokio::spawn(debouncer.submit(query)))
            .collect();

        let mut results = Vec::new();
        for h in handles {
            results.push(h.await.unwrap());
        }
        assert_eq!(results, vec![None, None, Some("net")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_back_to_back_spawns_follow_submission_order() {
        let debouncer = Debouncer::new(Duration::from_millis(5));

        for _ in 0..100 {
            let handles: Vec<_> = (0..8)
                .map(|i| tokio::spawn(debouncer.submit(i)))
                .collect();

            let mut winners = Vec::new();
            for h in handles {
                if let Some(i) = h.await.unwrap() {
                    winners.push(i);
                }
            }
            assert_eq!(winners, vec![7]);
        }
    }

    #[tokio::test]
    async fn test_explicit_ticket_superseded_by_later_one() {
        let debouncer = Debouncer::new(Duration::from_millis(5));
        let first = debouncer.ticket();
        let second = debouncer.ticket();
        assert!(first < second);
        assert_eq!(debouncer.wait(first, "old").await, None);
        assert_eq!(debouncer.wait(second, "new").await, Some("new"));
    }

    #[tokio::test]
    async fn test_spaced_submissions_all_pass() {
        let debouncer = Debouncer::new(Duration::from_millis(5));
        assert_eq!(debouncer.submit(1).await, Some(1));
        assert_eq!(debouncer.submit(2).await, Some(2));
    }

    #[test]
    fn test_default_window() {
        assert_eq!(Debouncer::default().window(), Duration::from_millis(300));
    }
}
