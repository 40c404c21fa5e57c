//! Annuity formulas for fixed periodic contributions
//!
//! These model Dollar-Cost Averaging plans under a constant per-period rate:
//! - Future value: FV = PMT * [(1 + i)^n - 1] / i
//! - Required payment: PMT = FV * i / [(1 + i)^n - 1]
//! - Required periods: n = ln(1 + FV * i / PMT) / ln(1 + i)
//!
//! A constant rate is a planning assumption, not a forecast.

use crate::error::{Result, RiskError};

/// Future value of a stream of `periods` equal payments
///
/// # Example
///
/// ```
/// use fr_risk::annuity::future_value;
///
/// let fv = future_value(20_000.0, 0.01, 7).unwrap();
/// assert!((fv - 144_270.70).abs() < 0.01);
/// ```
pub fn future_value(payment: f64, rate: f64, periods: u32) -> Result<f64> {
    ensure_positive(payment, "Payment")?;
    ensure_positive(rate, "Interest rate")?;
    ensure_periods(periods)?;

    let growth = (1.0 + rate).powi(periods as i32) - 1.0;
    Ok(payment * growth / rate)
}

/// Payment per period needed to accumulate `future_value` after `periods`
pub fn required_payment(future_value: f64, rate: f64, periods: u32) -> Result<f64> {
    ensure_positive(future_value, "Future value")?;
    ensure_positive(rate, "Interest rate")?;
    ensure_periods(periods)?;

    let growth = (1.0 + rate).powi(periods as i32) - 1.0;
    Ok(future_value * rate / growth)
}

/// Number of periods (fractional) needed to reach `future_value`
///
/// A non-positive target is an [`RiskError::InvalidArgument`]. Fails with
/// [`RiskError::UnreachableGoal`] when the logarithm in the numerator is not
/// positive, e.g. a target too small relative to the payment to register.
pub fn required_periods(future_value: f64, payment: f64, rate: f64) -> Result<f64> {
    ensure_positive(future_value, "Future value")?;
    ensure_positive(payment, "Payment")?;
    ensure_positive(rate, "Interest rate")?;

    let log_argument = 1.0 + future_value * rate / payment;
    if log_argument <= 0.0 {
        return Err(RiskError::UnreachableGoal(format!(
            "ln argument {:.6} is not positive for target {:.2}",
            log_argument, future_value
        )));
    }

    let numerator = log_argument.ln();
    if numerator <= 0.0 {
        return Err(RiskError::UnreachableGoal(format!(
            "target {:.2} yields no positive period count",
            future_value
        )));
    }

    Ok(numerator / (1.0 + rate).ln())
}

/// Convert an annual rate to a monthly rate
///
/// Linear approximation (annual / 12). The compounding-exact conversion would
/// be (1 + annual)^(1/12) - 1; the linear form is what the annuity tables use.
pub fn annual_to_monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0
}

/// Convert a monthly rate to an annual rate (linear approximation, monthly * 12)
pub fn monthly_to_annual_rate(monthly_rate: f64) -> f64 {
    monthly_rate * 12.0
}

fn ensure_positive(value: f64, name: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RiskError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn ensure_periods(periods: u32) -> Result<()> {
    if periods == 0 {
        return Err(RiskError::invalid("Number of periods must be positive"));
    }
    if periods > i32::MAX as u32 {
        return Err(RiskError::invalid(format!(
            "Number of periods too large: {}",
            periods
        )));
    }
    Ok(())
}
