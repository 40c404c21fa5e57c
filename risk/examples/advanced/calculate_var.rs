//! VaR and risk report example
//!
//! Demonstrates parametric and historical Value at Risk, the composite risk
//! report and asset classification for a simulated return series.
//!
//! Run with: cargo run --example calculate_var

use fr_risk::var::{self, ConfidenceLevel, VarMethod};
use fr_risk::{classifier, statistics, AnalyticsConfig, RiskReport};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Value at Risk (VaR) Calculation Example ===\n");

    // 1. Create sample historical returns (simulating 100 days of trading)
    let returns: Vec<f64> = (0..100)
        .map(|i| {
            let base_return = (i as f64 * 0.1).sin() * 0.01;
            let noise = ((i * 17) % 100) as f64 / 100.0 * 0.005;
            base_return + noise - 0.0025
        })
        .collect();

    let mean = statistics::mean(&returns)?;
    let std_dev = statistics::volatility(&returns)?;
    println!("Sample returns statistics:");
    println!("  Mean return: {:.4}%", mean * 100.0);
    println!("  Std deviation: {:.4}%", std_dev * 100.0);
    println!("  Number of observations: {}", returns.len());
    println!();

    let portfolio_value = 1_000_000.0;
    println!("Portfolio: ${:.0}", portfolio_value);
    println!();

    // 2. Compare methods at each supported confidence level
    println!("--- VaR by Method ---");
    println!("{:<12} {:>15} {:>15}", "Confidence", "Parametric", "Historical");
    println!("{:-<44}", "");
    for level in [ConfidenceLevel::P90, ConfidenceLevel::P95, ConfidenceLevel::P99] {
        let confidence = level.probability();
        let parametric = var::value_at_risk(VarMethod::Parametric, &returns, portfolio_value, confidence)?;
        let historical = var::value_at_risk(VarMethod::Historical, &returns, portfolio_value, confidence)?;
        println!("{:<12} ${:>14.2} ${:>14.2}", level.to_string(), parametric, historical);
    }
    println!();

    // 3. Unsupported levels are rejected, not rounded
    match var::parametric_var(portfolio_value, std_dev, 0.975, mean) {
        Ok(v) => println!("Unexpected 97.5% VaR: {:.2}", v),
        Err(e) => println!("97.5% parametric VaR: {}", e),
    }
    println!();

    // 4. Full risk report
    println!("--- Risk Report ---");
    let config = AnalyticsConfig {
        portfolio_value,
        ..Default::default()
    };
    let report = RiskReport::from_returns(&returns, &config)?;

    println!("Annualized volatility: {:.2}%", report.annualized_volatility * 100.0);
    println!("Sharpe ratio: {:.3} ({})", report.sharpe_ratio, report.sharpe_rating);
    println!("Sortino ratio: {:.3}", report.sortino_ratio);
    println!("Downside deviation: {:.4}%", report.downside_deviation * 100.0);
    println!("VaR 95%: ${:.2}", report.var_95);
    println!("VaR 99%: ${:.2}", report.var_99);
    println!("Latest return Z-score: {:.2}", report.latest_z_score);
    println!();

    let class = classifier::classify_by_volatility(report.annualized_volatility)?;
    println!("--- Asset Classification ---");
    println!("{}", class);

    println!("\n=== Example Complete ===");

    Ok(())
}
