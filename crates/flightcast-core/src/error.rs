//! # Error Types
//!
//! Three error classes with different lifetimes:
//!
//! - [`QueryError`]: a submitted field is outside its domain. Recoverable.
//! - [`PredictError`]: the predictor could not score a valid query. Recoverable,
//!   shown to the user as "Prediction error: ...".
//! - [`ArtifactError`]: a model or metrics artifact could not be loaded.
//!   Fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

/// A booking field failed domain validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} has no option named '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl QueryError {
    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn unknown_variant(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            field,
            value: value.into(),
        }
    }
}

/// The predictor failed to score a well-formed query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The model references a feature the booking schema does not provide.
    #[error("model feature '{0}' is not part of the booking schema")]
    UnknownFeature(String),

    /// The model produced a score that is not a probability.
    #[error("model produced an invalid probability ({0})")]
    InvalidProbability(f64),

    /// Tree traversal did not reach a leaf.
    #[error("tree {0} did not reach a leaf")]
    MalformedTree(usize),
}

/// A startup artifact could not be read or understood.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    InvalidModel(String),
}

/// Umbrella error for command-level operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Prediction error: {0}")]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================
