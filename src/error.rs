//! Error types for MARC lookup operations.
//!
//! This module provides the [`LookupError`] type for all dataset loading,
//! lookup and dataset building operations, and the [`Result`] convenience type.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for all MARC lookup operations.
///
/// Zero matches for a query is never an error; see
/// [`LookupOutcome`](crate::lookup::LookupOutcome) for how empty results are reported.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The dataset file does not exist.
    #[error("{} not found at {}", file_name(.path), .path.display())]
    DatasetNotFound {
        /// Path that was looked up.
        path: PathBuf,
        /// Remediation instruction shown to the user.
        hint: String,
    },

    /// The dataset file exists but is not valid dataset JSON.
    #[error("Corrupt dataset {}: {source}", .path.display())]
    CorruptDataset {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying JSON parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The dataset violates a structural invariant.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Error while parsing scraped documentation text.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error outside of dataset loading.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Remediation hint for errors that have one.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            LookupError::DatasetNotFound { hint, .. } => Some(hint.as_str()),
            _ => None,
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Convenience type alias for [`std::result::Result`] with [`LookupError`].
pub type Result<T> = std::result::Result<T, LookupError>;
