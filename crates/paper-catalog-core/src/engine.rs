//! The catalog filter engine.
//!
//! [`CatalogEngine`] owns the loaded collection and its [`FacetSet`]. It is
//! a plain owned value: presentation code constructs one, loads it once,
//! and hands out shared references (or an `Arc`) to whatever renders the
//! catalog.
//!
//! All query operations are synchronous, total, and preserve the original
//! collection order.

use crate::error::LoadError;
use crate::facets::{derive_facets, FacetSet};
use crate::filter::FilterState;
use crate::models::{parse_entries, Entry};

#[derive(Debug, Clone, Default)]
pub struct CatalogEngine {
    entries: Vec<Entry>,
    facets: FacetSet,
}

impl CatalogEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut engine = Self::new();
        engine.load(entries);
        engine
    }

    /// Replaces the collection (order as given) and re-derives facets.
    pub fn load(&mut self, entries: Vec<Entry>) {
        self.facets = derive_facets(&entries);
        self.entries = entries;
    }

    /// Parses a catalog body and loads it, returning the number of entries.
    ///
    /// On failure the collection is left empty, never holding stale data.
    pub fn load_json(&mut self, body: &[u8]) -> Result<usize, LoadError> {
        self.load(Vec::new());
        let entries = parse_entries(body)?;
        let count = entries.len();
        self.load(entries);
        Ok(count)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Facet values derived from the full collection at load time.
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    /// Entries satisfying every facet constraint in `state`.
    ///
    /// `state.search` is ignored here; see
    /// [`CatalogSession`](crate::session::CatalogSession) for how search and
    /// facets combine.
    pub fn filter(&self, state: &FilterState) -> Vec<&Entry> {
        let matcher = state.facet_matcher();
        self.entries.iter().filter(|e| matcher.matches(e)).collect()
    }

    /// Case-insensitive free-text search over title, branch, subject, and
    /// year. A blank query returns the whole collection.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| e.text_contains(&needle))
            .collect()
    }

    /// Entries matching both the facet constraints and the search text.
    pub fn filter_and_search(&self, state: &FilterState) -> Vec<&Entry> {
        let matcher = state.facet_matcher();
        let needle = state.search.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| matcher.matches(e))
            .filter(|e| needle.is_empty() || e.text_contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Facet;

    const EXAMPLE: &[u8] = br#"[
        {"title": "DBMS 2022", "branch": "CS,IS", "semester": "5",
         "subject": "Databases", "year": "2022", "link": "a.pdf"},
        {"title": "Networks 2021", "branch": "EC", "semester": "5",
         "subject": "Networking", "year": "2021", "link": "b.pdf"}
    ]"#;

    fn example() -> CatalogEngine {
        let mut engine = CatalogEngine::new();
        engine.load_json(EXAMPLE).unwrap();
        engine
    }

    fn titles(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.title().to_string()).collect()
    }

    fn with(facet: Facet, value: &str) -> FilterState {
        let mut state = FilterState::default();
        state.set(facet, Some(value.to_string()));
        state
    }

    #[test]
    fn test_example_branch_filter() {
        let engine = example();
        assert_eq!(
            titles(&engine.filter(&with(Facet::Branch, "cs"))),
            vec!["DBMS 2022"]
        );
    }

    #[test]
    fn test_example_semester_filter() {
        let engine = example();
        assert_eq!(
            titles(&engine.filter(&with(Facet::Semester, "5"))),
            vec!["DBMS 2022", "Networks 2021"]
        );
    }

    #[test]
    fn test_example_search() {
        let engine = example();
        assert_eq!(titles(&engine.search("network")), vec!["Networks 2021"]);
    }

    #[test]
    fn test_example_years_descending() {
        assert_eq!(example().facets().years, vec!["2022", "2021"]);
    }

    #[test]
    fn test_filter_identity_when_unconstrained() {
        let engine = example();
        let all: Vec<&Entry> = engine.entries().iter().collect();
        assert_eq!(engine.filter(&FilterState::default()), all);
    }

    #[test]
    fn test_filter_idempotent() {
        let engine = example();
        let state = with(Facet::Subject, "net");
        assert_eq!(engine.filter(&state), engine.filter(&state));
    }

    #[test]
    fn test_filter_ignores_search_text() {
        let engine = example();
        let state = FilterState {
            search: "no such paper".into(),
            ..Default::default()
        };
        assert_eq!(engine.filter(&state).len(), 2);
    }

    #[test]
    fn test_branch_filter_soundness() {
        let engine = CatalogEngine::from_entries(vec![
            Entry::new("A", "CSE, EC", "1", "X", "2020"),
            Entry::new("B", "ME", "1", "X", "2020"),
            Entry::new("C", "Civil,  cs-ai ", "1", "X", "2020"),
        ]);
        let constraint = "cs";
        for entry in engine.filter(&with(Facet::Branch, "CS")) {
            assert!(
                entry
                    .branches()
                    .iter()
                    .any(|t| t.to_lowercase().contains(constraint)),
                "{} should carry a branch token containing {}",
                entry.title(),
                constraint
            );
        }
        assert_eq!(engine.filter(&with(Facet::Branch, "CS")).len(), 2);
    }

    #[test]
    fn test_search_blank_returns_all() {
        let engine = example();
        assert_eq!(engine.search("").len(), 2);
        assert_eq!(engine.search("   ").len(), 2);
    }

    #[test]
    fn test_search_case_insensitive_fields() {
        let engine = example();
        assert_eq!(titles(&engine.search("DBMS")), vec!["DBMS 2022"]);
        assert_eq!(titles(&engine.search("dbms")), vec!["DBMS 2022"]);
        assert_eq!(titles(&engine.search("is")), vec!["DBMS 2022"]);
        assert_eq!(titles(&engine.search("DATABASES")), vec!["DBMS 2022"]);
        assert_eq!(titles(&engine.search("2021")), vec!["Networks 2021"]);
        assert_eq!(engine.search("202").len(), 2);
    }

    #[test]
    fn test_search_raw_branch_text_spans_tokens() {
        // Search works on the raw field text, unlike the branch facet.
        let engine = example();
        assert_eq!(titles(&engine.search("cs,is")), vec!["DBMS 2022"]);
    }

    #[test]
    fn test_malformed_entry_does_not_block_others() {
        let mut engine = CatalogEngine::new();
        let count = engine
            .load_json(
                br#"[
                {"title": "No subject", "branch": "CS", "semester": "3", "year": "2020"},
                {"title": "Full", "branch": "EC", "semester": "4", "subject": "Signals", "year": 2021}
            ]"#,
            )
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(engine.facets().subjects, vec!["Signals"]);
        assert_eq!(engine.filter(&with(Facet::Subject, "sig")).len(), 1);
        assert_eq!(engine.filter(&with(Facet::Branch, "cs")).len(), 1);
        assert_eq!(engine.search("no subject").len(), 1);
    }

    #[test]
    fn test_failed_load_leaves_collection_empty() {
        let mut engine = example();
        assert_eq!(engine.len(), 2);
        assert!(engine.load_json(b"not json").is_err());
        assert!(engine.is_empty());
        assert_eq!(engine.facets(), &FacetSet::default());
    }

    #[test]
    fn test_filter_and_search_composes() {
        let engine = example();
        let mut state = with(Facet::Semester, "5");
        state.search = "dbms".into();
        assert_eq!(titles(&engine.filter_and_search(&state)), vec!["DBMS 2022"]);
    }
}
