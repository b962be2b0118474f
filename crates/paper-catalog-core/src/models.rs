//! Catalog entry model.
//!
//! The static catalog stores multi-valued classification fields
//! (`branch`, `semester`, `subject`) as comma-separated strings. They are
//! split into token lists once, when an [`Entry`] is built, so filtering
//! never re-parses them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LoadError, RecordError};

/// One catalog record describing a downloadable paper.
///
/// The raw field strings are kept for display and free-text search; the
/// derived token lists back facet derivation and facet filtering. Fields
/// are read-only after construction so the tokens never go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    title: String,
    branch: String,
    semester: String,
    subject: String,
    year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip)]
    keys: MatchKeys,
}

/// Pre-computed tokens and lower-cased text used by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MatchKeys {
    branches: Vec<String>,
    semesters: Vec<String>,
    subjects: Vec<String>,
    branches_lower: Vec<String>,
    subjects_lower: Vec<String>,
    title_lower: String,
    branch_lower: String,
    subject_lower: String,
    year_lower: String,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        branch: impl Into<String>,
        semester: impl Into<String>,
        subject: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        let mut entry = Self {
            title: title.into(),
            branch: branch.into(),
            semester: semester.into(),
            subject: subject.into(),
            year: year.into(),
            link: None,
            file: None,
            keys: MatchKeys::default(),
        };
        entry.keys = MatchKeys::build(&entry);
        entry
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Builds an entry from one element of the catalog JSON array.
    ///
    /// Missing or non-string classification fields become empty; a missing
    /// `year` becomes the empty string. Only a non-object element or a
    /// missing `title` rejects the record.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or(RecordError::NotAnObject)?;
        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingTitle)?;

        let mut entry = Entry::new(
            title,
            text_field(obj, "branch"),
            text_field(obj, "semester"),
            text_field(obj, "subject"),
            year_field(obj),
        );
        entry.link = optional_text(obj, "link");
        entry.file = optional_text(obj, "file");
        Ok(entry)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn semester(&self) -> &str {
        &self.semester
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Year as text. Numeric JSON years are stringified (`2022` → `"2022"`).
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Legacy download field, used only when `link` is absent.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Branch tokens, trimmed, empty tokens removed, original case.
    pub fn branches(&self) -> &[String] {
        &self.keys.branches
    }

    pub fn semesters(&self) -> &[String] {
        &self.keys.semesters
    }

    pub fn subjects(&self) -> &[String] {
        &self.keys.subjects
    }

    pub(crate) fn branches_lower(&self) -> &[String] {
        &self.keys.branches_lower
    }

    pub(crate) fn subjects_lower(&self) -> &[String] {
        &self.keys.subjects_lower
    }

    /// True if the lower-cased `needle` occurs in the title, the raw branch
    /// or subject text, or the year.
    pub(crate) fn text_contains(&self, needle: &str) -> bool {
        self.keys.title_lower.contains(needle)
            || self.keys.branch_lower.contains(needle)
            || self.keys.subject_lower.contains(needle)
            || self.keys.year_lower.contains(needle)
    }
}

impl MatchKeys {
    fn build(entry: &Entry) -> Self {
        let branches = split_tokens(&entry.branch);
        let subjects = split_tokens(&entry.subject);
        Self {
            branches_lower: branches.iter().map(|t| t.to_lowercase()).collect(),
            subjects_lower: subjects.iter().map(|t| t.to_lowercase()).collect(),
            branches,
            subjects,
            semesters: split_tokens(&entry.semester),
            title_lower: entry.title.to_lowercase(),
            branch_lower: entry.branch.to_lowercase(),
            subject_lower: entry.subject.to_lowercase(),
            year_lower: entry.year.to_lowercase(),
        }
    }
}

/// Splits a comma-separated field into trimmed, non-empty tokens.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a catalog body (a JSON array of records) into entries.
///
/// Malformed records are skipped with a warning; a body that is not a JSON
/// array fails the whole load.
pub fn parse_entries(body: &[u8]) -> Result<Vec<Entry>, LoadError> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::Parse(format!(
                "expected a JSON array of papers, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match Entry::from_json(item) {
            Ok(entry) => entries.push(entry),
            Err(reason) => tracing::warn!(index, %reason, "skipping malformed catalog record"),
        }
    }
    Ok(entries)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn year_field(obj: &Map<String, Value>) -> String {
    match obj.get("year") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
