//! Core error types.

use std::fmt;

use thiserror::Error;

use crate::source::TableKind;

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more source tables could not be loaded.
    ///
    /// Reported once for the whole snapshot, listing every failing table.
    #[error("catalog snapshot failed to load: {}", format_failures(.failures))]
    LoadFailed {
        /// Every table that failed, in load order.
        failures: Vec<TableFailure>,
    },

    /// The requested object does not exist in the loaded snapshot.
    #[error("object not found: {0}")]
    NotFound(String),
}

/// Why a single source table failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFailure {
    /// Which table failed.
    pub table: TableKind,
    /// Human-readable cause.
    pub reason: String,
}

impl TableFailure {
    /// Create a new table failure.
    pub fn new(table: TableKind, reason: impl Into<String>) -> Self {
        Self {
            table,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.table, self.reason)
    }
}

fn format_failures(failures: &[TableFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
