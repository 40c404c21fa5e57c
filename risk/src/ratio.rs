//! Price ratio mean-reversion analysis
//!
//! Compares two assets through the ratio A/B and measures how far the latest
//! ratio sits from its own history in standard deviations (Z-score).
//! Frequencies quoted in interpretations assume a normal distribution and are
//! descriptive only.

use crate::error::{Result, RiskError};
use crate::statistics;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Mean-reversion signal derived from a ratio Z-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioSignal {
    /// Z ≥ 2: A is extremely expensive relative to B
    StrongSellA,
    /// 1 ≤ Z < 2: A is expensive relative to B
    ModerateSellA,
    /// |Z| < 1
    NoSignal,
    /// -2 < Z ≤ -1: A is cheap relative to B
    ModerateBuyA,
    /// Z ≤ -2: A is extremely cheap relative to B
    StrongBuyA,
}

impl RatioSignal {
    pub fn from_z_score(z_score: f64) -> Self {
        if z_score >= 2.0 {
            RatioSignal::StrongSellA
        } else if z_score >= 1.0 {
            RatioSignal::ModerateSellA
        } else if z_score <= -2.0 {
            RatioSignal::StrongBuyA
        } else if z_score <= -1.0 {
            RatioSignal::ModerateBuyA
        } else {
            RatioSignal::NoSignal
        }
    }

    pub fn is_actionable(self) -> bool {
        self != RatioSignal::NoSignal
    }
}

/// Result of a ratio analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioAnalysisResult {
    /// Latest A/B ratio
    pub current_ratio: f64,
    /// Mean of the full ratio series, current point included
    pub historical_mean: f64,
    /// Sample standard deviation of the full ratio series
    pub historical_std_dev: f64,
    pub z_score: f64,
    pub signal: RatioSignal,
    /// Signal text naming the assets
    pub signal_message: String,
    /// Statistical reading of the Z-score
    pub interpretation: String,
}

/// Analyze the A/B price ratio of two assets
///
/// Both series must have equal length, at least 2 points and strictly
/// positive prices. A constant ratio series has no dispersion and fails with
/// [`RiskError::DivisionByZero`].
///
/// # Example
///
/// ```
/// use fr_risk::ratio::{analyze_ratio, RatioSignal};
///
/// let gold = [1800.0, 1810.0, 1795.0, 1805.0, 1900.0];
/// let silver = [25.0, 25.2, 24.9, 25.1, 24.0];
///
/// let result = analyze_ratio(&gold, &silver, "Gold", "Silver").unwrap();
/// assert_eq!(result.signal, RatioSignal::ModerateSellA);
/// ```
pub fn analyze_ratio(
    prices_a: &[f64],
    prices_b: &[f64],
    asset_name_a: &str,
    asset_name_b: &str,
) -> Result<RatioAnalysisResult> {
    let ratios = ratio_series(prices_a, prices_b)?;

    // ratio_series guarantees at least two points
    let current_ratio = ratios[ratios.len() - 1];
    let historical_mean = statistics::mean(&ratios)?;
    let historical_std_dev = statistics::volatility(&ratios)?;
    let z_score = statistics::z_score(current_ratio, &ratios)?;

    Ok(RatioAnalysisResult {
        current_ratio,
        historical_mean,
        historical_std_dev,
        z_score,
        signal: RatioSignal::from_z_score(z_score),
        signal_message: generate_signal(z_score, asset_name_a, asset_name_b),
        interpretation: interpret_z_score(z_score),
    })
}

/// Element-wise ratio A[i] / B[i]
pub fn ratio_series(prices_a: &[f64], prices_b: &[f64]) -> Result<Vec<f64>> {
    validate_prices(prices_a, prices_b)?;

    Ok(prices_a.iter().zip(prices_b).map(|(a, b)| a / b).collect())
}

/// Signal text for a Z-score, naming both assets
pub fn generate_signal(z_score: f64, asset_name_a: &str, asset_name_b: &str) -> String {
    match RatioSignal::from_z_score(z_score) {
        RatioSignal::StrongSellA => format!(
            "STRONG SIGNAL: {a} is extremely expensive relative to {b} (Z={z:.2}, ≥2σ above mean)\n\
             Consider: SELL {a} or BUY {b}",
            a = asset_name_a,
            b = asset_name_b,
            z = z_score
        ),
        RatioSignal::ModerateSellA => format!(
            "SIGNAL: {a} is expensive relative to {b} (Z={z:.2}, ≥1σ above mean)\n\
             Moderate opportunity for mean reversion",
            a = asset_name_a,
            b = asset_name_b,
            z = z_score
        ),
        RatioSignal::StrongBuyA => format!(
            "STRONG SIGNAL: {a} is extremely cheap relative to {b} (Z={z:.2}, ≥2σ below mean)\n\
             Consider: BUY {a} or SELL {b}",
            a = asset_name_a,
            b = asset_name_b,
            z = z_score
        ),
        RatioSignal::ModerateBuyA => format!(
            "SIGNAL: {a} is cheap relative to {b} (Z={z:.2}, ≥1σ below mean)\n\
             Moderate opportunity for mean reversion",
            a = asset_name_a,
            b = asset_name_b,
            z = z_score
        ),
        RatioSignal::NoSignal => format!(
            "NO SIGNAL: Ratio is within normal historical range (Z={:.2})\n\
             No actionable mean reversion opportunity",
            z_score
        ),
    }
}

/// Statistical reading of a Z-score with normal-distribution frequencies
pub fn interpret_z_score(z_score: f64) -> String {
    let abs_z = z_score.abs();
    let mut text = String::new();

    let band = if abs_z < 1.0 {
        "Within normal range (|Z| < 1.0)\n\
         The ratio is within 1 standard deviation of its historical mean.\n\
         This is expected normal variation (~68% of the time)."
    } else if abs_z < 2.0 {
        "Moderate deviation (1.0 ≤ |Z| < 2.0)\n\
         The ratio is between 1-2 standard deviations from the mean.\n\
         This is somewhat unusual (~27% of the time).\n\
         Moderate mean reversion opportunity."
    } else if abs_z < 3.0 {
        "Significant deviation (2.0 ≤ |Z| < 3.0)\n\
         The ratio is between 2-3 standard deviations from the mean.\n\
         This is rare (~4.3% of the time).\n\
         Strong mean reversion opportunity, if historical relationship holds."
    } else {
        "EXTREME deviation (|Z| ≥ 3.0)\n\
         The ratio is more than 3 standard deviations from the mean.\n\
         This is VERY rare (~0.3% of the time).\n\
         Either an exceptional mean reversion opportunity, or the relationship has changed permanently."
    };
    text.push_str(band);

    let direction = if z_score > 0.0 { "ABOVE" } else { "BELOW" };
    // Writing to a String cannot fail
    let _ = write!(text, "\n\nDirection: Ratio is {} historical average", direction);

    text
}

/// |Z| < 1
pub fn is_within_normal_range(z_score: f64) -> bool {
    z_score.abs() < 1.0
}

/// |Z| ≥ 2
pub fn is_extreme_deviation(z_score: f64) -> bool {
    z_score.abs() >= 2.0
}

fn validate_prices(prices_a: &[f64], prices_b: &[f64]) -> Result<()> {
    if prices_a.len() != prices_b.len() {
        return Err(RiskError::LengthMismatch {
            expected: prices_a.len(),
            actual: prices_b.len(),
        });
    }
    if prices_a.len() < 2 {
        return Err(RiskError::InsufficientData {
            required: 2,
            actual: prices_a.len(),
        });
    }

    for (name, prices) in [("A", prices_a), ("B", prices_b)] {
        if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
            return Err(RiskError::invalid(format!(
                "All prices for asset {} must be positive, got {}",
                name, bad
            )));
        }
    }

    Ok(())
}
