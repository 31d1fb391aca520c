//! Error handling for the text-risk pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur in the text-risk pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Labels passed to a supervised fit were missing or unusable
    #[error("invalid labels: {0}")]
    InvalidLabels(String),

    /// A transform was requested before the component was fitted
    #[error("{0} has not been fitted")]
    NotFitted(&'static str),

    /// A ranking method could not produce scores
    #[error("ranking method '{method}' failed: {reason}")]
    RankingFailed { method: &'static str, reason: String },

    /// Embedding backend returned vectors of the wrong shape
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Input shape does not line up with the fitted state
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create a new invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PipelineError::InvalidInput(msg.into())
    }

    /// Create a new invalid-labels error.
    pub fn invalid_labels(msg: impl Into<String>) -> Self {
        PipelineError::InvalidLabels(msg.into())
    }
}
