//! Facet derivation.
//!
//! Facet values are always derived from the full collection, never from a
//! filtered subset, so filter controls keep offering every value.
//!
//! Ordering is part of the presentation contract:
//!
//! | Facet | Order |
//! |-------|-------|
//! | branch, subject | ascending lexicographic |
//! | semester | ascending numeric |
//! | year | descending numeric (most recent first) |
//!
//! Numeric ordering reads the leading integer of a value (`"2022-23"` sorts
//! as 2022). Values without one sort after all numeric values, in
//! lexicographic order; numeric ties break lexicographically.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::filter::Facet;
use crate::models::Entry;

/// Distinct values per facet, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    pub branches: Vec<String>,
    pub semesters: Vec<String>,
    pub subjects: Vec<String>,
    pub years: Vec<String>,
}

impl FacetSet {
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Branch => &self.branches,
            Facet::Semester => &self.semesters,
            Facet::Subject => &self.subjects,
            Facet::Year => &self.years,
        }
    }
}

/// Collects the distinct facet values of `entries`.
///
/// Tokens are case-sensitive: `"CS"` and `"cs"` are two values. Entries
/// with empty fields contribute nothing for that facet.
pub fn derive_facets(entries: &[Entry]) -> FacetSet {
    let mut branches = BTreeSet::new();
    let mut subjects = BTreeSet::new();
    let mut semesters = HashSet::new();
    let mut years = HashSet::new();

    for entry in entries {
        branches.extend(entry.branches().iter().cloned());
        subjects.extend(entry.subjects().iter().cloned());
        semesters.extend(entry.semesters().iter().cloned());
        if !entry.year().trim().is_empty() {
            years.insert(entry.year().to_string());
        }
    }

    let mut semesters: Vec<String> = semesters.into_iter().collect();
    semesters.sort_by(|a, b| numeric_order(a, b));

    let mut years: Vec<String> = years.into_iter().collect();
    years.sort_by(|a, b| numeric_order_desc(a, b));

    FacetSet {
        branches: branches.into_iter().collect(),
        semesters,
        subjects: subjects.into_iter().collect(),
        years,
    }
}

/// Ascending numeric order with non-numeric values last.
pub fn numeric_order(a: &str, b: &str) -> Ordering {
    match (leading_int(a), leading_int(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Descending numeric order with non-numeric values last.
pub fn numeric_order_desc(a: &str, b: &str) -> Ordering {
    match (leading_int(a), leading_int(b)) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Parses an optional sign and the leading run of ASCII digits.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("DBMS 2022", "CS,IS", "5", "Databases", "2022"),
            Entry::new("Networks 2021", "EC", "5", "Networking", "2021"),
            Entry::new("Maths", "CS, ME", "1, 10, 2", "Maths, Databases", "2019"),
            Entry::new("Physics", "ME", "2", "Physics", "2023"),
        ]
    }

    #[test]
    fn test_branches_sorted_and_distinct() {
        let facets = derive_facets(&sample());
        assert_eq!(facets.branches, vec!["CS", "EC", "IS", "ME"]);
    }

    #[test]
    fn test_subjects_sorted_and_distinct() {
        let facets = derive_facets(&sample());
        assert_eq!(
            facets.subjects,
            vec!["Databases", "Maths", "Networking", "Physics"]
        );
    }

    #[test]
    fn test_semesters_numeric_ascending() {
        let facets = derive_facets(&sample());
        assert_eq!(facets.semesters, vec!["1", "2", "5", "10"]);
    }

    #[test]
    fn test_years_numeric_descending() {
        let facets = derive_facets(&sample());
        assert_eq!(facets.years, vec!["2023", "2022", "2021", "2019"]);
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let entries = vec![
            Entry::new("A", "CS", "", "", ""),
            Entry::new("B", "cs", "", "", ""),
        ];
        assert_eq!(derive_facets(&entries).branches, vec!["CS", "cs"]);
    }

    #[test]
    fn test_missing_fields_contribute_nothing() {
        let entries = vec![
            Entry::new("No subject", "CS", "3", "", "2020"),
            Entry::new("Complete", "EC", "4", "Signals", "2021"),
        ];
        let facets = derive_facets(&entries);
        assert_eq!(facets.subjects, vec!["Signals"]);
        assert_eq!(facets.branches, vec!["CS", "EC"]);
        assert_eq!(facets.years, vec!["2021", "2020"]);
    }

    #[test]
    fn test_empty_year_excluded() {
        let entries = vec![Entry::new("A", "CS", "1", "X", "")];
        assert!(derive_facets(&entries).years.is_empty());
    }

    #[test]
    fn test_non_numeric_values_sort_last() {
        let entries = vec![
            Entry::new("A", "", "elective, 3, 1", "", "undated"),
            Entry::new("B", "", "", "", "2020-21"),
            Entry::new("C", "", "", "", "2021"),
        ];
        let facets = derive_facets(&entries);
        assert_eq!(facets.semesters, vec!["1", "3", "elective"]);
        assert_eq!(facets.years, vec!["2021", "2020-21", "undated"]);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("2022"), Some(2022));
        assert_eq!(leading_int(" 7th"), Some(7));
        assert_eq!(leading_int("-3"), Some(-3));
        assert_eq!(leading_int("sem"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_values_by_facet() {
        let facets = derive_facets(&sample());
        assert_eq!(facets.values(Facet::Year)[0], "2023");
        assert_eq!(facets.values(Facet::Branch).len(), 4);
    }
}
