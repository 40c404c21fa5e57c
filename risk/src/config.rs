//! Analytics configuration
//!
//! Parameters shared across calculations, loadable from YAML or JSON.

use crate::error::{Result, RiskError};
use crate::statistics::{MONTHS_PER_YEAR, TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Sampling frequency of a return series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Periodicity {
    #[default]
    Daily,
    Monthly,
}

impl Periodicity {
    /// Number of periods per year
    pub fn periods_per_year(self) -> f64 {
        match self {
            Periodicity::Daily => TRADING_DAYS_PER_YEAR,
            Periodicity::Monthly => MONTHS_PER_YEAR,
        }
    }

    /// Annualize a per-period volatility with square-root-of-time scaling
    pub fn annualize_volatility(self, volatility: f64) -> f64 {
        volatility * self.periods_per_year().sqrt()
    }
}

/// Monte Carlo portfolio optimizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of random portfolios to simulate (default: 10000)
    pub num_portfolios: usize,

    /// Risk-free rate per period, in the same units as the asset returns
    pub risk_free_rate: f64,

    /// Random seed for reproducibility (None = seeded from entropy)
    pub random_seed: Option<u64>,

    /// Below this many portfolios the samples are evaluated on the calling thread
    pub min_parallel_portfolios: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            num_portfolios: 10_000,
            risk_free_rate: 0.0,
            random_seed: None,
            min_parallel_portfolios: 1_000,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_portfolios == 0 {
            return Err(RiskError::invalid("Number of portfolios must be positive"));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(RiskError::invalid("Risk-free rate must be finite"));
        }
        Ok(())
    }
}

/// Top-level analytics configuration
///
/// # Example
///
/// ```
/// use fr_risk::config::{AnalyticsConfig, Periodicity};
///
/// let yaml = r#"
/// risk_free_rate: 0.0001
/// portfolio_value: 250000.0
/// periodicity: Monthly
/// optimizer:
///   num_portfolios: 5000
///   random_seed: 42
/// "#;
///
/// let config = AnalyticsConfig::from_yaml(yaml).unwrap();
/// assert_eq!(config.periodicity, Periodicity::Monthly);
/// assert_eq!(config.optimizer.random_seed, Some(42));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Risk-free rate per period
    pub risk_free_rate: f64,

    /// Portfolio value used to express VaR in currency
    pub portfolio_value: f64,

    /// Sampling frequency of the return series
    pub periodicity: Periodicity,

    /// Portfolio optimizer settings
    pub optimizer: OptimizerConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            portfolio_value: 100_000.0,
            periodicity: Periodicity::Daily,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnalyticsConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalyticsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(RiskError::invalid("Risk-free rate must be finite"));
        }
        if !self.portfolio_value.is_finite() || self.portfolio_value < 0.0 {
            return Err(RiskError::invalid(format!(
                "Portfolio value must be non-negative, got {}",
                self.portfolio_value
            )));
        }
        self.optimizer.validate()
    }
}
