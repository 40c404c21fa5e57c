//! Composite risk reports
//!
//! Bundles the individual statistics a reporting layer asks for into one
//! serializable value. Any failing component fails the whole report.

use crate::classifier::{
    classify_by_volatility, interpret_beta, interpret_correlation, interpret_sharpe_ratio,
    BetaProfile, RiskLevel, SharpeRating,
};
use crate::config::{AnalyticsConfig, Periodicity};
use crate::error::Result;
use crate::statistics;
use crate::var::historical_var;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Risk profile of a single return series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub observations: usize,
    pub periodicity: Periodicity,
    pub mean_return: f64,
    pub variance: f64,
    pub volatility: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    /// Downside deviation against a zero minimum acceptable return
    pub downside_deviation: f64,
    /// Sortino ratio with the risk-free rate as minimum acceptable return
    pub sortino_ratio: f64,
    /// Historical VaR at 95%, in currency
    pub var_95: f64,
    /// Historical VaR at 99%, in currency
    pub var_99: f64,
    /// Z-score of the latest return against the whole series
    pub latest_z_score: f64,
    pub sharpe_rating: SharpeRating,
    pub risk_level: RiskLevel,
}

impl RiskReport {
    pub fn from_returns(returns: &[f64], config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;

        let variance = statistics::variance(returns)?;
        let volatility = statistics::volatility(returns)?;
        let annualized_volatility = config.periodicity.annualize_volatility(volatility);
        let mean_return = statistics::mean(returns)?;
        let sharpe_ratio = statistics::sharpe_ratio(mean_return, config.risk_free_rate, volatility)?;
        let downside_deviation = statistics::downside_deviation(returns, 0.0)?;
        let sortino_ratio = statistics::sortino_ratio(returns, config.risk_free_rate, None)?;
        let var_95 = historical_var(returns, config.portfolio_value, 0.95)?;
        let var_99 = historical_var(returns, config.portfolio_value, 0.99)?;
        let latest_z_score = statistics::z_score(returns[returns.len() - 1], returns)?;
        let risk_level = classify_by_volatility(annualized_volatility)?.risk_level;

        debug!(
            observations = returns.len(),
            volatility,
            sharpe_ratio,
            %risk_level,
            "Risk report computed"
        );

        Ok(Self {
            observations: returns.len(),
            periodicity: config.periodicity,
            mean_return,
            variance,
            volatility,
            annualized_volatility,
            sharpe_ratio,
            downside_deviation,
            sortino_ratio,
            var_95,
            var_99,
            latest_z_score,
            sharpe_rating: interpret_sharpe_ratio(sharpe_ratio),
            risk_level,
        })
    }
}

/// Relationship between an asset and a market benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRelationReport {
    pub beta: f64,
    pub correlation: f64,
    pub beta_profile: BetaProfile,
    pub correlation_description: String,
}

impl MarketRelationReport {
    pub fn from_returns(asset_returns: &[f64], market_returns: &[f64]) -> Result<Self> {
        let beta = statistics::beta(asset_returns, market_returns)?;
        let correlation = statistics::correlation(asset_returns, market_returns)?;

        Ok(Self {
            beta,
            correlation,
            beta_profile: interpret_beta(beta),
            correlation_description: interpret_correlation(correlation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use approx::assert_relative_eq;

    fn create_test_returns() -> Vec<f64> {
        vec![
            0.012, -0.008, 0.005, -0.015, 0.020, 0.003, -0.004, 0.009, -0.011, 0.007,
            0.002, -0.006, 0.014, -0.009, 0.004, 0.010, -0.013, 0.006, -0.002, 0.008,
        ]
    }

    #[test]
    fn test_risk_report_matches_components() {
        let returns = create_test_returns();
        let config = AnalyticsConfig::default();
        let report = RiskReport::from_returns(&returns, &config).unwrap();

        assert_eq!(report.observations, 20);
        assert_relative_eq!(report.volatility, report.variance.sqrt());
        assert_relative_eq!(
            report.annualized_volatility,
            statistics::daily_to_annual_volatility(report.volatility)
        );
        assert_relative_eq!(
            report.var_95,
            historical_var(&returns, 100_000.0, 0.95).unwrap()
        );
        assert!(report.var_99 >= report.var_95);
        assert_eq!(report.sharpe_rating, interpret_sharpe_ratio(report.sharpe_ratio));
        assert_eq!(
            report.risk_level,
            classify_by_volatility(report.annualized_volatility).unwrap().risk_level
        );
    }

    #[test]
    fn test_risk_report_monthly_periodicity() {
        let returns = create_test_returns();
        let config = AnalyticsConfig {
            periodicity: Periodicity::Monthly,
            ..Default::default()
        };
        let report = RiskReport::from_returns(&returns, &config).unwrap();
        assert_relative_eq!(
            report.annualized_volatility,
            statistics::monthly_to_annual_volatility(report.volatility)
        );
    }

    #[test]
    fn test_risk_report_fails_without_losses() {
        // No return below the risk-free rate: Sortino is undefined
        let returns = vec![0.01, 0.02, 0.03, 0.04];
        let result = RiskReport::from_returns(&returns, &AnalyticsConfig::default());
        assert!(matches!(result, Err(RiskError::DivisionByZero(_))));
    }

    #[test]
    fn test_market_relation_report() {
        let market = vec![0.01, -0.02, 0.015, -0.005, 0.02, -0.01];
        let asset: Vec<f64> = market.iter().map(|r| 1.5 * r).collect();

        let report = MarketRelationReport::from_returns(&asset, &market).unwrap();
        assert_relative_eq!(report.beta, 1.5, epsilon = 1e-12);
        assert_relative_eq!(report.correlation, 1.0, epsilon = 1e-12);
        assert_eq!(report.beta_profile, BetaProfile::VeryAggressive);
        assert_eq!(report.correlation_description, "Very Strong Positive Correlation");
    }

    #[test]
    fn test_market_relation_length_mismatch() {
        let result = MarketRelationReport::from_returns(&[0.01, 0.02, 0.03], &[0.01, 0.02]);
        assert!(matches!(result, Err(RiskError::LengthMismatch { .. })));
    }
}
