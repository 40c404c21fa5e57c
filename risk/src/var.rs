//! Value at Risk (VaR) estimators
//!
//! Two single-period methodologies:
//! - Parametric VaR: normal assumption with a fixed Z multiplier,
//!   VaR = value * |μ - Z * σ|
//! - Historical VaR: empirical percentile of the observed returns
//!
//! The two estimators answer the same question with different models, so their
//! results differ for the same data. That difference is expected.

use crate::error::{Result, RiskError};
use crate::statistics::{self, ensure_observations};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when matching a raw confidence value to a supported level
const CONFIDENCE_TOLERANCE: f64 = 1e-9;

/// VaR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarMethod {
    Historical,
    Parametric,
}

/// Confidence levels supported by the parametric estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// 90% confidence
    P90,
    /// 95% confidence
    P95,
    /// 99% confidence
    P99,
}

impl ConfidenceLevel {
    /// One-tailed standard normal multiplier for this level
    pub fn z_multiplier(self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.282,
            ConfidenceLevel::P95 => 1.645,
            ConfidenceLevel::P99 => 2.326,
        }
    }

    /// Confidence as a probability (e.g. 0.95)
    pub fn probability(self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 0.90,
            ConfidenceLevel::P95 => 0.95,
            ConfidenceLevel::P99 => 0.99,
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self> {
        [ConfidenceLevel::P90, ConfidenceLevel::P95, ConfidenceLevel::P99]
            .into_iter()
            .find(|level| (level.probability() - value).abs() < CONFIDENCE_TOLERANCE)
            .ok_or(RiskError::UnsupportedConfidenceLevel(value))
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.probability() * 100.0)
    }
}

/// Parametric VaR: value * |expected_return - Z * volatility|
///
/// `confidence` must be one of 0.90, 0.95 or 0.99; anything else fails with
/// [`RiskError::UnsupportedConfidenceLevel`] rather than being rounded.
pub fn parametric_var(
    portfolio_value: f64,
    volatility: f64,
    confidence: f64,
    expected_return: f64,
) -> Result<f64> {
    let level = ConfidenceLevel::try_from(confidence)?;
    parametric_var_at(portfolio_value, volatility, level, expected_return)
}

/// Parametric VaR at an already validated confidence level
pub fn parametric_var_at(
    portfolio_value: f64,
    volatility: f64,
    level: ConfidenceLevel,
    expected_return: f64,
) -> Result<f64> {
    validate_portfolio_value(portfolio_value)?;

    if !volatility.is_finite() || volatility < 0.0 {
        return Err(RiskError::invalid(format!(
            "Volatility must be non-negative, got {}",
            volatility
        )));
    }
    if !expected_return.is_finite() {
        return Err(RiskError::invalid("Expected return must be finite"));
    }

    let loss_fraction = (expected_return - level.z_multiplier() * volatility).abs();
    Ok(portfolio_value * loss_fraction)
}

/// Historical VaR using the empirical percentile of `returns`
///
/// Returns are sorted ascending and the observation at index
/// `ceil(N * (1 - confidence))`, clamped to the last index, is taken; VaR is
/// its absolute value scaled by `portfolio_value`.
pub fn historical_var(returns: &[f64], portfolio_value: f64, confidence: f64) -> Result<f64> {
    ensure_observations(returns, 1)?;
    validate_portfolio_value(portfolio_value)?;

    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(RiskError::invalid(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence
        )));
    }

    let mut sorted_returns = returns.to_vec();
    sorted_returns.sort_by(|a, b| a.total_cmp(b));

    let index = percentile_index(sorted_returns.len(), confidence);
    let percentile_return = sorted_returns[index];

    Ok(percentile_return.abs() * portfolio_value)
}

/// VaR of a return series with the chosen method
///
/// The parametric method takes μ and σ from the series itself.
pub fn value_at_risk(
    method: VarMethod,
    returns: &[f64],
    portfolio_value: f64,
    confidence: f64,
) -> Result<f64> {
    match method {
        VarMethod::Historical => historical_var(returns, portfolio_value, confidence),
        VarMethod::Parametric => {
            let expected_return = statistics::mean(returns)?;
            let volatility = statistics::volatility(returns)?;
            parametric_var(portfolio_value, volatility, confidence, expected_return)
        }
    }
}

/// Index of the lower-tail observation for `confidence` in a sorted series
///
/// 1 - confidence is not exact in binary (0.05 * 20 evaluates slightly above
/// 1), so the product is nudged down before taking the ceiling.
fn percentile_index(len: usize, confidence: f64) -> usize {
    let raw = len as f64 * (1.0 - confidence);
    let index = (raw - CONFIDENCE_TOLERANCE).ceil().max(0.0) as usize;
    index.min(len - 1)
}

fn validate_portfolio_value(portfolio_value: f64) -> Result<()> {
    if !portfolio_value.is_finite() || portfolio_value < 0.0 {
        return Err(RiskError::invalid(format!(
            "Portfolio value must be non-negative, got {}",
            portfolio_value
        )));
    }
    Ok(())
}
