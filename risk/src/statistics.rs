//! Sample statistics and risk-adjusted performance ratios
//!
//! Implements the building blocks used by every other module:
//! - Mean, sample variance (N - 1 divisor) and volatility (√variance)
//! - Covariance, correlation and beta against a market series
//! - Sharpe Ratio: (Return - Risk-Free Rate) / Volatility
//! - Sortino Ratio: uses downside deviation instead of total volatility
//! - Z-score of an observation against a historical series
//! - Square-root-of-time volatility scaling
//!
//! All functions measure historical behaviour only.

use crate::error::{Result, RiskError};

/// Trading days per year used for daily-to-annual scaling
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Months per year used for monthly-to-annual scaling
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Arithmetic mean of a non-empty series
pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_observations(values, 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance: σ² = Σ(x - x̄)² / (N - 1)
pub fn variance(values: &[f64]) -> Result<f64> {
    ensure_observations(values, 2)?;

    // A constant series has zero variance even when its mean does not round exactly
    if is_constant(values) {
        return Ok(0.0);
    }

    let mean = mean(values)?;
    let sum_squared: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();

    Ok(sum_squared / (values.len() - 1) as f64)
}

/// Volatility (sample standard deviation), exactly √variance
pub fn volatility(values: &[f64]) -> Result<f64> {
    Ok(variance(values)?.sqrt())
}

/// Sample covariance: Cov(X, Y) = Σ[(x - x̄)(y - ȳ)] / (N - 1)
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    ensure_same_length(x, y)?;
    ensure_observations(x, 2)?;
    ensure_observations(y, 2)?;

    if is_constant(x) || is_constant(y) {
        return Ok(0.0);
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let sum_product: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();

    Ok(sum_product / (x.len() - 1) as f64)
}

/// Pearson correlation: ρ = Cov(X, Y) / (σx * σy)
///
/// The result is clamped to [-1, 1] to absorb floating point rounding; inputs
/// that would produce a value materially outside the range cannot occur.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    let cov = covariance(x, y)?;
    let sigma_x = volatility(x)?;
    let sigma_y = volatility(y)?;

    if sigma_x == 0.0 || sigma_y == 0.0 {
        return Err(RiskError::DivisionByZero(
            "Correlation undefined for a series with zero volatility".to_string(),
        ));
    }

    Ok((cov / (sigma_x * sigma_y)).clamp(-1.0, 1.0))
}

/// Beta relative to market: β = Cov(Asset, Market) / Var(Market)
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> Result<f64> {
    let cov = covariance(asset_returns, market_returns)?;
    let market_variance = variance(market_returns)?;

    if market_variance == 0.0 {
        return Err(RiskError::DivisionByZero(
            "Market variance is zero".to_string(),
        ));
    }

    Ok(cov / market_variance)
}

/// Sharpe Ratio from summary figures
///
/// Sharpe = (Return - Risk-Free Rate) / Volatility. Return, risk-free rate and
/// volatility must share the same periodicity.
pub fn sharpe_ratio(portfolio_return: f64, risk_free_rate: f64, volatility: f64) -> Result<f64> {
    if volatility.is_nan() || volatility < 0.0 {
        return Err(RiskError::invalid(format!(
            "Volatility must be non-negative, got {}",
            volatility
        )));
    }
    if volatility == 0.0 {
        return Err(RiskError::DivisionByZero(
            "Volatility is zero".to_string(),
        ));
    }

    Ok((portfolio_return - risk_free_rate) / volatility)
}

/// Sharpe Ratio computed from a raw return series
pub fn sharpe_ratio_from_returns(returns: &[f64], risk_free_rate: f64) -> Result<f64> {
    let mean_return = mean(returns)?;
    let sigma = volatility(returns)?;
    sharpe_ratio(mean_return, risk_free_rate, sigma)
}

/// Downside deviation: σd = √[Σ min(0, r - MAR)² / N]
///
/// Returns above the minimum acceptable return contribute zero; the divisor is
/// the full observation count.
pub fn downside_deviation(returns: &[f64], minimum_acceptable_return: f64) -> Result<f64> {
    ensure_observations(returns, 1)?;

    let sum_squared: f64 = returns
        .iter()
        .map(|r| (r - minimum_acceptable_return).min(0.0).powi(2))
        .sum();

    Ok((sum_squared / returns.len() as f64).sqrt())
}

/// Sortino Ratio: (mean - risk-free) / downside deviation
///
/// `minimum_acceptable_return` defaults to the risk-free rate when `None`.
pub fn sortino_ratio(
    returns: &[f64],
    risk_free_rate: f64,
    minimum_acceptable_return: Option<f64>,
) -> Result<f64> {
    let mar = minimum_acceptable_return.unwrap_or(risk_free_rate);
    let mean_return = mean(returns)?;
    let downside = downside_deviation(returns, mar)?;

    if downside == 0.0 {
        return Err(RiskError::DivisionByZero(
            "Downside deviation is zero".to_string(),
        ));
    }

    Ok((mean_return - risk_free_rate) / downside)
}

/// Z-score of `value` against a historical series: (x - μ) / σ
pub fn z_score(value: f64, historical: &[f64]) -> Result<f64> {
    if !value.is_finite() {
        return Err(RiskError::invalid(format!(
            "Observation must be finite, got {}",
            value
        )));
    }

    let mu = mean(historical)?;
    let sigma = volatility(historical)?;

    if sigma == 0.0 {
        return Err(RiskError::DivisionByZero(
            "Historical volatility is zero".to_string(),
        ));
    }

    Ok((value - mu) / sigma)
}

/// Two-asset portfolio volatility
///
/// σp = √[w1²σ1² + w2²σ2² + 2·w1·w2·ρ·σ1·σ2]
pub fn two_asset_portfolio_volatility(
    weight_a: f64,
    sigma_a: f64,
    weight_b: f64,
    sigma_b: f64,
    correlation: f64,
) -> Result<f64> {
    if sigma_a < 0.0 || sigma_b < 0.0 {
        return Err(RiskError::invalid("Volatility cannot be negative"));
    }
    if !(-1.0..=1.0).contains(&correlation) {
        return Err(RiskError::invalid(format!(
            "Correlation must lie in [-1, 1], got {}",
            correlation
        )));
    }

    let variance = weight_a.powi(2) * sigma_a.powi(2)
        + weight_b.powi(2) * sigma_b.powi(2)
        + 2.0 * weight_a * weight_b * correlation * sigma_a * sigma_b;

    // Only rounding can push a valid combination below zero
    Ok(variance.max(0.0).sqrt())
}

/// Annualize a daily volatility: σ_annual = σ_daily * √252
pub fn daily_to_annual_volatility(daily_volatility: f64) -> f64 {
    daily_volatility * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualize a monthly volatility: σ_annual = σ_monthly * √12
pub fn monthly_to_annual_volatility(monthly_volatility: f64) -> f64 {
    monthly_volatility * MONTHS_PER_YEAR.sqrt()
}

/// Reject series shorter than `required` or containing non-finite values
pub(crate) fn ensure_observations(values: &[f64], required: usize) -> Result<()> {
    if values.len() < required {
        return Err(RiskError::InsufficientData {
            required,
            actual: values.len(),
        });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RiskError::invalid(format!(
            "Series contains a non-finite value: {}",
            bad
        )));
    }
    Ok(())
}

pub(crate) fn ensure_same_length(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(RiskError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|x| *x == values[0])
}
