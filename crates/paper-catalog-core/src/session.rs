//! Browsing sessions over a loaded catalog.
//!
//! A [`CatalogSession`] is what a presentation layer drives: it records
//! facet selections and search text as the user changes them and answers
//! "what should be visible now?".
//!
//! Under the default [`QueryPolicy::Replace`], whichever axis the user
//! touched last decides the result: changing a facet shows the facet
//! filter and ignores the search box; typing a search shows search results
//! and ignores the facet selectors. [`QueryPolicy::Compose`] ANDs them.
//!
//! [`SearchSequence`] and [`LatestResult`] keep debounced or deferred
//! search results in invocation order: a superseded query can never
//! overwrite the result of a later one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::engine::CatalogEngine;
use crate::filter::{Facet, FilterState};
use crate::models::Entry;

/// How free-text search combines with facet selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPolicy {
    /// The most recently changed axis replaces the other.
    #[default]
    Replace,
    /// Facet constraints and search text must both match.
    Compose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveAxis {
    Untouched,
    Facets,
    Search,
}

/// Visible vs total counts for the result counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub visible: usize,
    pub total: usize,
    /// False until the user has changed any selector or the search text.
    pub filtered: bool,
}

pub struct CatalogSession<'a> {
    engine: &'a CatalogEngine,
    state: FilterState,
    active: ActiveAxis,
    policy: QueryPolicy,
}

impl<'a> CatalogSession<'a> {
    pub fn new(engine: &'a CatalogEngine) -> Self {
        Self::with_policy(engine, QueryPolicy::default())
    }

    pub fn with_policy(engine: &'a CatalogEngine, policy: QueryPolicy) -> Self {
        Self {
            engine,
            state: FilterState::default(),
            active: ActiveAxis::Untouched,
            policy,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn policy(&self) -> QueryPolicy {
        self.policy
    }

    /// Changes one facet selector. `None` or a blank value means "All".
    pub fn select(&mut self, facet: Facet, value: Option<String>) {
        self.state.set(facet, value);
        self.active = ActiveAxis::Facets;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
        self.active = ActiveAxis::Search;
    }

    pub fn clear(&mut self) {
        self.state = FilterState::default();
        self.active = ActiveAxis::Untouched;
    }

    pub fn visible(&self) -> Vec<&'a Entry> {
        let engine = self.engine;
        match (self.policy, self.active) {
            (_, ActiveAxis::Untouched) => engine.entries().iter().collect(),
            (QueryPolicy::Compose, _) => engine.filter_and_search(&self.state),
            (QueryPolicy::Replace, ActiveAxis::Facets) => engine.filter(&self.state),
            (QueryPolicy::Replace, ActiveAxis::Search) => engine.search(&self.state.search),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            visible: self.visible().len(),
            total: self.engine.len(),
            filtered: self.active != ActiveAxis::Untouched,
        }
    }
}

/// Ticket identifying one search invocation; later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues monotonically increasing [`Ticket`]s.
///
/// Shared by reference between the task that receives input and the tasks
/// evaluating it; only the newest ticket is current.
#[derive(Debug, Default)]
pub struct SearchSequence {
    latest: AtomicU64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Holds the result of the newest invocation seen so far.
///
/// Results are keyed on invocation order, not completion order: a result
/// arriving late for an older ticket is rejected.
#[derive(Debug, Clone)]
pub struct LatestResult<T> {
    slot: Option<(Ticket, T)>,
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> LatestResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` unless a result for a newer ticket is already held.
    pub fn offer(&mut self, ticket: Ticket, value: T) -> bool {
        match &self.slot {
            Some((held, _)) if *held > ticket => false,
            _ => {
                self.slot = Some((ticket, value));
                true
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CatalogEngine {
        CatalogEngine::from_entries(vec![
            Entry::new("DBMS 2022", "CS,IS", "5", "Databases", "2022"),
            Entry::new("Networks 2021", "EC", "5", "Networking", "2021"),
            Entry::new("Compilers", "CS", "6", "Compilers", "2021"),
        ])
    }

    fn titles(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.title().to_string()).collect()
    }

    #[test]
    fn test_untouched_session_shows_everything() {
        let engine = engine();
        let session = CatalogSession::new(&engine);
        assert_eq!(session.visible().len(), 3);
        assert_eq!(
            session.summary(),
            Summary {
                visible: 3,
                total: 3,
                filtered: false
            }
        );
    }

    #[test]
    fn test_search_replaces_facet_selection() {
        let engine = engine();
        let mut session = CatalogSession::new(&engine);
        session.select(Facet::Branch, Some("cs".into()));
        assert_eq!(
            titles(&session.visible()),
            vec!["DBMS 2022", "Compilers"]
        );

        session.set_search("network");
        assert_eq!(titles(&session.visible()), vec!["Networks 2021"]);
        // The selector is still recorded, just not applied.
        assert_eq!(session.state().branch.as_deref(), Some("cs"));
    }

    #[test]
    fn test_facet_change_replaces_search() {
        let engine = engine();
        let mut session = CatalogSession::new(&engine);
        session.set_search("network");
        session.select(Facet::Year, Some("2021".into()));
        assert_eq!(
            titles(&session.visible()),
            vec!["Networks 2021", "Compilers"]
        );
    }

    #[test]
    fn test_blank_search_after_facets_shows_everything() {
        let engine = engine();
        let mut session = CatalogSession::new(&engine);
        session.select(Facet::Branch, Some("ec".into()));
        session.set_search("  ");
        assert_eq!(session.visible().len(), 3);
        assert!(session.summary().filtered);
    }

    #[test]
    fn test_compose_policy_ands_axes() {
        let engine = engine();
        let mut session = CatalogSession::with_policy(&engine, QueryPolicy::Compose);
        session.select(Facet::Branch, Some("cs".into()));
        session.set_search("2021");
        assert_eq!(titles(&session.visible()), vec!["Compilers"]);
    }

    #[test]
    fn test_clear_resets() {
        let engine = engine();
        let mut session = CatalogSession::new(&engine);
        session.select(Facet::Semester, Some("6".into()));
        assert_eq!(session.summary().visible, 1);
        session.clear();
        assert_eq!(session.state(), &FilterState::default());
        assert!(!session.summary().filtered);
        assert_eq!(session.summary().visible, 3);
    }

    #[test]
    fn test_selecting_all_lifts_constraint() {
        let engine = engine();
        let mut session = CatalogSession::new(&engine);
        session.select(Facet::Semester, Some("6".into()));
        session.select(Facet::Semester, None);
        assert_eq!(session.visible().len(), 3);
    }

    #[test]
    fn test_sequence_only_newest_is_current() {
        let seq = SearchSequence::new();
        let first = seq.next_ticket();
        assert!(seq.is_current(first));
        let second = seq.next_ticket();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_latest_result_rejects_stale_completion() {
        let seq = SearchSequence::new();
        let older = seq.next_ticket();
        let newer = seq.next_ticket();

        let mut latest = LatestResult::new();
        assert!(latest.offer(newer, "newer"));
        assert!(!latest.offer(older, "older"));
        assert_eq!(latest.get(), Some(&"newer"));
    }
}
