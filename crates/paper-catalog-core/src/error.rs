//! Error types for catalog loading.
//!
//! Loading is the only fallible operation in the core: facet derivation,
//! filtering, and search are total over an already-parsed collection.

use thiserror::Error;

/// Failure to obtain or parse the catalog resource.
///
/// Never retried automatically. Presentation layers surface it once as an
/// error state (see [`LoadError::USER_MESSAGE`]) and log the detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The resource could not be reached (I/O or transport failure).
    #[error("catalog source unreachable: {0}")]
    Unreachable(String),

    /// The resource answered with a non-success status.
    #[error("catalog source returned status {status}")]
    Status { status: u16 },

    /// The body is not valid JSON, or not a JSON array.
    #[error("catalog could not be parsed: {0}")]
    Parse(String),
}

impl LoadError {
    /// Human-readable message shown to end users in place of the catalog.
    pub const USER_MESSAGE: &'static str = "Error loading papers. Please try again later.";
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Reason a single record was skipped during load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no string `title`")]
    MissingTitle,
}
