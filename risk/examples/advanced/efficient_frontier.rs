//! Efficient frontier example
//!
//! Demonstrates covariance analysis and the Monte Carlo search for the
//! maximum-Sharpe allocation of a three-asset portfolio.
//!
//! Run with: cargo run --example efficient_frontier
//! Add RUST_LOG=fr_risk=debug to see optimizer timings.

use fr_risk::config::OptimizerConfig;
use fr_risk::portfolio::{covariance_matrix, PortfolioOptimizer};
use fr_risk::{classifier, report::MarketRelationReport, statistics};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Efficient Frontier Example ===\n");

    // 1. Simulated monthly returns for three assets
    let stocks: Vec<f64> = (0..60)
        .map(|i| 0.008 + (i as f64 * 0.9).sin() * 0.045)
        .collect();
    let bonds: Vec<f64> = (0..60)
        .map(|i| 0.003 + (i as f64 * 0.4).cos() * 0.008)
        .collect();
    let gold: Vec<f64> = (0..60)
        .map(|i| 0.005 + (i as f64 * 1.7).sin() * 0.035)
        .collect();

    let names = vec!["Stocks".to_string(), "Bonds".to_string(), "Gold".to_string()];
    let assets = vec![stocks, bonds, gold];

    // 2. Per-asset statistics
    println!("{:<8} {:>10} {:>12} {:>28}", "Asset", "Mean", "Annual Vol", "Class");
    println!("{:-<62}", "");
    for (name, returns) in names.iter().zip(&assets) {
        let mean = statistics::mean(returns)?;
        let annual_vol = statistics::monthly_to_annual_volatility(statistics::volatility(returns)?);
        let class = classifier::classify_by_volatility(annual_vol)?;
        println!(
            "{:<8} {:>9.3}% {:>11.2}% {:>28}",
            name,
            mean * 100.0,
            annual_vol * 100.0,
            class.risk_level.name()
        );
    }
    println!();

    // 3. Covariance and pairwise relations
    let cov = covariance_matrix(&assets)?;
    println!("Covariance matrix:{}", cov);

    let relation = MarketRelationReport::from_returns(&assets[2], &assets[0])?;
    println!(
        "Gold vs Stocks: beta {:.3} ({}), {}",
        relation.beta, relation.beta_profile, relation.correlation_description
    );
    println!();

    // 4. Monte Carlo search
    let optimizer = PortfolioOptimizer::new(OptimizerConfig {
        num_portfolios: 20_000,
        risk_free_rate: 0.0025,
        random_seed: Some(42),
        ..Default::default()
    });

    let frontier = optimizer.calculate_efficient_frontier(&assets, &names)?;
    let optimal = &frontier.optimal;

    println!("--- Maximum Sharpe Portfolio ({} simulations) ---", frontier.simulations.len());
    for (name, weight) in frontier.asset_names.iter().zip(&optimal.weights) {
        println!("  {:<8} {:>6.2}%", name, weight * 100.0);
    }
    println!("  Expected monthly return: {:.3}%", optimal.expected_return * 100.0);
    println!("  Monthly risk: {:.3}%", optimal.risk * 100.0);
    println!(
        "  Sharpe ratio: {:.3} ({})",
        optimal.sharpe_ratio,
        classifier::interpret_sharpe_ratio(optimal.sharpe_ratio)
    );
    println!();

    // 5. Lowest-risk simulated portfolio for comparison
    if let Some(min_risk) = frontier
        .simulations
        .iter()
        .min_by(|a, b| a.risk.total_cmp(&b.risk))
    {
        println!("--- Minimum Risk Portfolio ---");
        for (name, weight) in frontier.asset_names.iter().zip(&min_risk.weights) {
            println!("  {:<8} {:>6.2}%", name, weight * 100.0);
        }
        println!("  Monthly risk: {:.3}%", min_risk.risk * 100.0);
    }

    println!("\nNOTE: Optimal weights reflect historical data only.");
    println!("\n=== Example Complete ===");

    Ok(())
}
