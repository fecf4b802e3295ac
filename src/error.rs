//! Error types shared by the record store. Validation problems are collected
//! rather than short-circuited so a caller can show every rejected field in one
//! message, while persistence failures keep the offending path around for the
//! status line.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::BookField;

/// What went wrong with a single field of a create/edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Text field is empty once surrounding whitespace is removed.
    Blank,
    /// Numeric field could not be parsed at all. Carries the raw input.
    NotANumber(String),
    /// Numeric field parsed but falls outside its accepted range.
    OutOfRange(String),
}

/// One rejected field together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: BookField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub(crate) fn new(field: BookField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Blank => write!(f, "{} is required.", self.field.label()),
            ViolationKind::NotANumber(raw) => {
                write!(f, "{} must be a number (got {raw:?}).", self.field.label())
            }
            ViolationKind::OutOfRange(raw) => write!(
                f,
                "{} must be {} (got {raw}).",
                self.field.label(),
                self.field.range_hint()
            ),
        }
    }
}

/// Raised by the validated construction path. Always lists every violated
/// field, in field order, never just the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether a particular field is among the rejected ones.
    pub fn has(&self, field: BookField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Everything a store operation can fail with.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid book: {0}")]
    Validation(#[from] ValidationError),

    #[error("book {id} not found")]
    NotFound { id: i64 },

    #[error("cannot assign a new id: highest id {highest} is already the maximum")]
    IdsExhausted { highest: i64 },

    #[error("failed to access catalog file {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to export catalog: {0}")]
    Export(#[source] io::Error),
}

impl CatalogError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CatalogError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Single text block suitable for an error dialog or status line.
    /// Validation failures put each violation on its own line.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Validation(err) => err
                .violations()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
