//! Batch outcome aggregation.

use std::fmt;
use std::path::Path;

use crate::error::Error;

/// A failed item: the file's base name and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub label: String,
    pub message: String,
}

impl ItemError {
    /// Build the report entry for `path` failing with `err`.
    #[must_use]
    pub fn from_error(path: &Path, err: &Error) -> Self {
        Self {
            label: item_label(path),
            message: err.reason(),
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}

/// Human-readable label for an input: its base name, or the whole path if it has none.
#[must_use]
pub fn item_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of inputs that were written successfully.
    pub processed: usize,
    /// One entry per failed input, in input order.
    pub errors: Vec<ItemError>,
}

impl BatchReport {
    /// Total number of inputs accounted for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.processed + self.errors.len()
    }

    /// Whether every input succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn record(&mut self, path: &Path, outcome: &Result<std::path::PathBuf, Error>) {
        match outcome {
            Ok(_) => self.processed += 1,
            Err(err) => self.errors.push(ItemError::from_error(path, err)),
        }
    }
}
