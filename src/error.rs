//! Error types for celldiff

use std::path::PathBuf;

use thiserror::Error;

/// Which input table an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "first table"),
            Side::Second => write!(f, "second table"),
        }
    }
}

/// Errors produced while loading, comparing or writing tables
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("column \"{column}\" not found in {side}")]
    ColumnNotFound { column: String, side: Side },

    #[error("column sets differ (missing from second table: [{}], extra in second table: [{}])", .missing.join(", "), .extra.join(", "))]
    ShapeMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("row counts differ after alignment ({first} vs {second})")]
    RowCountMismatch { first: usize, second: usize },

    #[error("identifier {value} appears more than once in {side} (lines {first_line} and {second_line})")]
    DuplicateIdentifier {
        value: String,
        side: Side,
        first_line: usize,
        second_line: usize,
    },

    #[error("row at line {line} of {side} has no identifier")]
    MissingIdentifier { side: Side, line: usize },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiffError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        DiffError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors raised while comparing, as opposed to I/O failures
    pub fn is_comparison_error(&self) -> bool {
        !matches!(self, DiffError::Load { .. } | DiffError::Write { .. })
    }
}

pub type Result<T, E = DiffError> = std::result::Result<T, E>;
