//! Example: Comparing investment strategies on a simulated price path
//!
//! Generates a seeded random walk, then backtests buy-and-hold, dollar-cost
//! averaging and a moving average crossover over the same prices.
//!
//! Run with: cargo run --example backtest
//! Add RUST_LOG=fr_strategies=debug to see every trade.

use fr_strategies::{StrategyBacktester, StrategyConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Strategy Backtest Comparison ===\n");

    // 1. Two years of daily prices with a small upward drift
    let mut rng = StdRng::seed_from_u64(7);
    let mut price = 100.0;
    let prices: Vec<f64> = (0..730)
        .map(|_| {
            let daily_return: f64 = rng.gen_range(-0.02..0.0215);
            price *= 1.0 + daily_return;
            price
        })
        .collect();

    println!(
        "Simulated {} days: start ${:.2}, end ${:.2}\n",
        prices.len(),
        prices[0],
        prices[prices.len() - 1]
    );

    // 2. Run every strategy on the same path
    let initial_capital = 10_000.0;
    let strategies = [
        StrategyConfig::BuyAndHold,
        StrategyConfig::Dca {
            investment_amount: 500.0,
            frequency: 30,
        },
        StrategyConfig::MovingAverageCrossover {
            short_period: 50,
            long_period: 200,
        },
    ];

    let results = StrategyBacktester::compare(&prices, initial_capital, &strategies)?;

    // 3. Summary table
    println!(
        "{:<26} {:>12} {:>10} {:>10} {:>10} {:>7}",
        "Strategy", "Final", "Return", "Annual", "Max DD", "Trades"
    );
    for result in &results {
        println!(
            "{:<26} {:>12.2} {:>9.2}% {:>9.2}% {:>9.2}% {:>7}",
            result.strategy.name(),
            result.final_value,
            result.total_return * 100.0,
            result.annualized_return * 100.0,
            result.max_drawdown * 100.0,
            result.total_trades
        );
    }

    // 4. Best performer
    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.total_return.total_cmp(&b.total_return))
    {
        println!("\nBest total return: {}", best.strategy.name());
        match best.sharpe_ratio(0.0) {
            Ok(sharpe) => println!("Daily Sharpe ratio: {:.4}", sharpe),
            Err(e) => println!("Sharpe ratio unavailable: {}", e),
        }
    }

    println!("\nPast performance does not predict future results.");
    Ok(())
}
