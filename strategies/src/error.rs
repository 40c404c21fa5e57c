//! Error types for strategy backtesting

use fr_risk::RiskError;
use thiserror::Error;

/// Main error type for backtest operations
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Invalid parameter (non-positive capital, amount, frequency or period)
    #[error("Invalid parameter: {0}")]
    InvalidArgument(String),

    /// Insufficient data for calculation
    #[error("Insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Statistic computed on a backtest result failed
    #[error("Risk calculation error: {0}")]
    Risk(#[from] RiskError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl StrategyError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StrategyError::InvalidArgument(msg.into())
    }
}

/// Result type for strategy operations
pub type StrategyResult<T> = Result<T, StrategyError>;
