//! Facet filter state and matching rules.
//!
//! | Facet | Match rule |
//! |-------|------------|
//! | branch | some lower-cased token *contains* the lower-cased constraint |
//! | semester | some token *equals* the constraint |
//! | subject | some lower-cased token *contains* the lower-cased constraint |
//! | year | entry year *equals* the constraint |
//!
//! Constraints are trimmed before use. An unset or blank constraint
//! matches every entry; set constraints combine with AND.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// One classification axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Branch,
    Semester,
    Subject,
    Year,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Branch, Facet::Semester, Facet::Subject, Facet::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Branch => "branch",
            Facet::Semester => "semester",
            Facet::Subject => "subject",
            Facet::Year => "year",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "branch" => Ok(Facet::Branch),
            "semester" => Ok(Facet::Semester),
            "subject" => Ok(Facet::Subject),
            "year" => Ok(Facet::Year),
            other => Err(format!(
                "unknown facet: '{}'. Use branch, semester, subject, or year.",
                other
            )),
        }
    }
}

/// The current query: four facet selectors plus free-text search.
///
/// `None` (or a blank string) means "no constraint" for that facet.
/// [`matches`](FilterState::matches) only evaluates the facet selectors;
/// how `search` combines with them is decided by the session's
/// [`QueryPolicy`](crate::session::QueryPolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn get(&self, facet: Facet) -> Option<&str> {
        let slot = match facet {
            Facet::Branch => &self.branch,
            Facet::Semester => &self.semester,
            Facet::Subject => &self.subject,
            Facet::Year => &self.year,
        };
        constraint(slot)
    }

    /// Sets one selector. Blank values are stored as `None`.
    pub fn set(&mut self, facet: Facet, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        match facet {
            Facet::Branch => self.branch = value,
            Facet::Semester => self.semester = value,
            Facet::Subject => self.subject = value,
            Facet::Year => self.year = value,
        }
    }

    pub fn has_facet_constraints(&self) -> bool {
        Facet::ALL.iter().any(|f| self.get(*f).is_some())
    }

    pub fn clear_facets(&mut self) {
        self.branch = None;
        self.semester = None;
        self.subject = None;
        self.year = None;
    }

    /// Returns true if `entry` satisfies every set facet constraint.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.facet_matcher().matches(entry)
    }

    /// Lower-cases the constraints once so a whole collection can be
    /// scanned without re-normalizing per entry.
    pub(crate) fn facet_matcher(&self) -> FacetMatcher<'_> {
        FacetMatcher {
            branch: self.get(Facet::Branch).map(str::to_lowercase),
            semester: self.get(Facet::Semester),
            subject: self.get(Facet::Subject).map(str::to_lowercase),
            year: self.get(Facet::Year),
        }
    }
}

pub(crate) struct FacetMatcher<'a> {
    branch: Option<String>,
    semester: Option<&'a str>,
    subject: Option<String>,
    year: Option<&'a str>,
}

impl FacetMatcher<'_> {
    pub(crate) fn matches(&self, entry: &Entry) -> bool {
        let branch_ok = self
            .branch
            .as_deref()
            .map_or(true, |b| entry.branches_lower().iter().any(|t| t.contains(b)));
        let semester_ok = self
            .semester
            .map_or(true, |s| entry.semesters().iter().any(|t| t.as_str() == s));
        let subject_ok = self
            .subject
            .as_deref()
            .map_or(true, |s| entry.subjects_lower().iter().any(|t| t.contains(s)));
        let year_ok = self.year.map_or(true, |y| entry.year() == y);

        branch_ok && semester_ok && subject_ok && year_ok
    }
}

fn constraint(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dbms() -> Entry {
        Entry::new("DBMS 2022", "CS,IS", "5", "Databases", "2022").with_link("a.pdf")
    }

    fn state(facet: Facet, value: &str) -> FilterState {
        let mut s = FilterState::default();
        s.set(facet, Some(value.to_string()));
        s
    }

    #[test]
    fn test_empty_state_matches_everything() {
        let s = FilterState::default();
        assert!(!s.has_facet_constraints());
        assert!(s.matches(&dbms()));
        assert!(s.matches(&Entry::new("Bare", "", "", "", "")));
    }

    #[test]
    fn test_branch_is_case_insensitive_substring() {
        assert!(state(Facet::Branch, "cs").matches(&dbms()));
        assert!(state(Facet::Branch, "I").matches(&dbms()));
        assert!(!state(Facet::Branch, "EC").matches(&dbms()));
    }

    #[test]
    fn test_branch_substring_does_not_span_tokens() {
        // "S,I" occurs in the raw text but not inside any single token.
        assert!(!state(Facet::Branch, "s,i").matches(&dbms()));
    }

    #[test]
    fn test_semester_is_exact_token_match() {
        let e = Entry::new("T", "CS", "3, 5", "Maths", "2020");
        assert!(state(Facet::Semester, "5").matches(&e));
        assert!(state(Facet::Semester, " 3 ").matches(&e));
        assert!(!state(Facet::Semester, "35").matches(&e));
    }

    #[test]
    fn test_subject_substring() {
        assert!(state(Facet::Subject, "data").matches(&dbms()));
        assert!(!state(Facet::Subject, "network").matches(&dbms()));
    }

    #[test]
    fn test_year_exact() {
        assert!(state(Facet::Year, "2022").matches(&dbms()));
        assert!(!state(Facet::Year, "202").matches(&dbms()));
    }

    #[test]
    fn test_constraints_combine_with_and() {
        let mut s = state(Facet::Branch, "cs");
        s.set(Facet::Year, Some("2021".into()));
        assert!(!s.matches(&dbms()));
        s.set(Facet::Year, Some("2022".into()));
        assert!(s.matches(&dbms()));
    }

    #[test]
    fn test_blank_values_clear_selector() {
        let mut s = state(Facet::Branch, "cs");
        s.set(Facet::Branch, Some("   ".into()));
        assert_eq!(s.branch, None);
        s.branch = Some("  ".into());
        assert_eq!(s.get(Facet::Branch), None);
    }

    #[test]
    fn test_facet_from_str() {
        assert_eq!("Semester".parse::<Facet>().unwrap(), Facet::Semester);
        assert!("colour".parse::<Facet>().is_err());
    }
}
