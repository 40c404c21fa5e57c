//! Asset classification by annualized volatility
//!
//! A static table of five half-open volatility bands (in percent) plus
//! qualitative interpreters for Sharpe ratio, beta and correlation values.
//! Classifications describe historical behavior; past volatility does not
//! predict future volatility.

use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level of a volatility band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very Low Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::VeryHigh => "Very High Risk (Speculation)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the classification table
///
/// The band is `[min_volatility_pct, max_volatility_pct)`; `None` as upper
/// bound marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetClass {
    pub risk_level: RiskLevel,
    pub min_volatility_pct: f64,
    pub max_volatility_pct: Option<f64>,
    pub description: &'static str,
    pub typical_assets: &'static str,
    pub return_expectation: &'static str,
    pub risk_of_loss: &'static str,
}

impl AssetClass {
    /// Whether a volatility expressed in percent falls in this band
    pub fn contains(&self, volatility_pct: f64) -> bool {
        volatility_pct >= self.min_volatility_pct
            && self.max_volatility_pct.map_or(true, |max| volatility_pct < max)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = match self.max_volatility_pct {
            Some(max) => format!("{:.0}%", max),
            None => "∞".to_string(),
        };
        writeln!(f, "{}", self.description)?;
        writeln!(f, "  Annual Volatility (σ): {:.0}% - {}", self.min_volatility_pct, upper)?;
        writeln!(f, "  Typical Assets:        {}", self.typical_assets)?;
        writeln!(f, "  Return Expectation:    {}", self.return_expectation)?;
        write!(f, "  Risk of Loss:          {}", self.risk_of_loss)
    }
}

static ASSET_CLASSES: [AssetClass; 5] = [
    AssetClass {
        risk_level: RiskLevel::VeryLow,
        min_volatility_pct: 0.0,
        max_volatility_pct: Some(2.0),
        description: "Very Low Risk",
        typical_assets: "Savings Accounts, Government Bonds",
        return_expectation: "Low (Predictable)",
        risk_of_loss: "Almost None (Inflation risk exists)",
    },
    AssetClass {
        risk_level: RiskLevel::Low,
        min_volatility_pct: 2.0,
        max_volatility_pct: Some(8.0),
        description: "Low Risk",
        typical_assets: "High-Grade Corporate Bonds, Gold (partially)",
        return_expectation: "Low-Medium",
        risk_of_loss: "Low",
    },
    AssetClass {
        risk_level: RiskLevel::Medium,
        min_volatility_pct: 8.0,
        max_volatility_pct: Some(20.0),
        description: "Medium Risk",
        typical_assets: "Broad Market Index Funds (S&P 500, BIST 30), Blue-Chip Stocks",
        return_expectation: "Medium",
        risk_of_loss: "Medium (Loss is likely in short term)",
    },
    AssetClass {
        risk_level: RiskLevel::High,
        min_volatility_pct: 20.0,
        max_volatility_pct: Some(40.0),
        description: "High Risk",
        typical_assets: "Growth Stocks (Tech), Silver, Emerging Market Stocks",
        return_expectation: "High",
        risk_of_loss: "High (Significant loss is possible)",
    },
    AssetClass {
        risk_level: RiskLevel::VeryHigh,
        min_volatility_pct: 40.0,
        max_volatility_pct: None,
        description: "Very High Risk (Speculation)",
        typical_assets: "Cryptocurrencies (BTC, ETH), Leveraged Instruments (Futures, Forex), Options, Altcoins",
        return_expectation: "Very High / Unlimited",
        risk_of_loss: "Very High / Total Loss Possible",
    },
];

/// The full classification table, ordered from lowest to highest risk
pub fn all_asset_classes() -> &'static [AssetClass] {
    &ASSET_CLASSES
}

/// Classify an annualized volatility (fraction, e.g. 0.15 for 15%)
///
/// Returns the first band containing the volatility, falling back to the
/// open-ended top band.
pub fn classify_by_volatility(annual_volatility: f64) -> Result<&'static AssetClass> {
    if annual_volatility.is_nan() || annual_volatility < 0.0 {
        return Err(RiskError::invalid(format!(
            "Annual volatility must be non-negative, got {}",
            annual_volatility
        )));
    }

    let volatility_pct = annual_volatility * 100.0;
    let class = ASSET_CLASSES
        .iter()
        .find(|class| class.contains(volatility_pct))
        .unwrap_or(&ASSET_CLASSES[ASSET_CLASSES.len() - 1]);

    Ok(class)
}

/// Qualitative bucket for a Sharpe ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharpeRating {
    Poor,
    Good,
    Excellent,
}

impl SharpeRating {
    pub fn description(self) -> &'static str {
        match self {
            SharpeRating::Poor => "Poor - Risk is not worth it",
            SharpeRating::Good => "Good - Adequately compensated for risk",
            SharpeRating::Excellent => "Excellent - Well compensated for risk",
        }
    }
}

impl fmt::Display for SharpeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Bucket a Sharpe ratio at 1.0 and 2.0; NaN rates as poor
pub fn interpret_sharpe_ratio(sharpe_ratio: f64) -> SharpeRating {
    if sharpe_ratio.is_nan() || sharpe_ratio < 1.0 {
        SharpeRating::Poor
    } else if sharpe_ratio < 2.0 {
        SharpeRating::Good
    } else {
        SharpeRating::Excellent
    }
}

/// Qualitative bucket for a beta coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetaProfile {
    Negative,
    Zero,
    VeryDefensive,
    Defensive,
    Neutral,
    Aggressive,
    VeryAggressive,
}

impl BetaProfile {
    pub fn description(self) -> &'static str {
        match self {
            BetaProfile::Negative => "Negative Beta - Moves opposite to market (rare, defensive)",
            BetaProfile::Zero => "Zero Beta - No correlation with market",
            BetaProfile::VeryDefensive => "Very Defensive - Much less volatile than market",
            BetaProfile::Defensive => "Defensive - Less volatile than market",
            BetaProfile::Neutral => "Neutral - Moves in line with market",
            BetaProfile::Aggressive => "Aggressive - More volatile than market",
            BetaProfile::VeryAggressive => "Very Aggressive - Much more volatile than market",
        }
    }
}

impl fmt::Display for BetaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Bucket a beta at 0, 0.5, 1.0 and 1.5
///
/// Exactly 0 and exactly 1 get their own buckets.
pub fn interpret_beta(beta: f64) -> BetaProfile {
    if beta < 0.0 {
        BetaProfile::Negative
    } else if beta == 0.0 {
        BetaProfile::Zero
    } else if beta < 0.5 {
        BetaProfile::VeryDefensive
    } else if beta < 1.0 {
        BetaProfile::Defensive
    } else if beta == 1.0 {
        BetaProfile::Neutral
    } else if beta < 1.5 {
        BetaProfile::Aggressive
    } else {
        BetaProfile::VeryAggressive
    }
}

/// Describe a correlation coefficient, e.g. "Strong Positive Correlation"
pub fn interpret_correlation(correlation: f64) -> String {
    let strength = match correlation.abs() {
        c if c >= 0.9 => "Very Strong",
        c if c >= 0.7 => "Strong",
        c if c >= 0.5 => "Moderate",
        c if c >= 0.3 => "Weak",
        _ => "Very Weak",
    };

    let direction = if correlation > 0.0 {
        "Positive"
    } else if correlation < 0.0 {
        "Negative"
    } else {
        "None"
    };

    format!("{} {} Correlation", strength, direction)
}
