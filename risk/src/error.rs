//! Error types for risk analytics

use thiserror::Error;

/// Errors that can occur in risk calculations
///
/// Every variant is raised synchronously at the violated precondition; no
/// calculation retries, clamps or substitutes a default on failure.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Length mismatch: expected {expected} observations, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Division by zero in calculation: {0}")]
    DivisionByZero(String),

    #[error("Goal cannot be reached: {0}")]
    UnreachableGoal(String),

    #[error("Unsupported confidence level: {0} (expected 0.90, 0.95 or 0.99)")]
    UnsupportedConfidenceLevel(f64),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RiskError>;

impl RiskError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RiskError::InvalidArgument(msg.into())
    }
}
