//! # fr-strategies: Single-Asset Strategy Backtesting
//!
//! This library replays a daily price series through simple investment
//! strategies and reports how each would have performed.
//!
//! ## Core Components
//!
//! - **StrategyBacktester**: Day-by-day simulation of buy-and-hold,
//!   dollar-cost averaging and moving average crossover
//! - **Indicators**: Rolling simple moving averages
//! - **Configuration**: YAML/JSON strategy and capital settings
//! - **Results**: Portfolio history, trades, return and drawdown metrics
//!
//! ## Example Usage
//!
//! ```rust
//! use fr_strategies::{StrategyBacktester, StrategyConfig};
//!
//! let prices = vec![100.0, 102.0, 99.0, 104.0, 108.0, 103.0, 110.0];
//! let strategies = [
//!     StrategyConfig::BuyAndHold,
//!     StrategyConfig::Dca { investment_amount: 2_000.0, frequency: 2 },
//!     StrategyConfig::MovingAverageCrossover { short_period: 2, long_period: 3 },
//! ];
//!
//! let results = StrategyBacktester::compare(&prices, 10_000.0, &strategies).unwrap();
//! for result in &results {
//!     println!(
//!         "{}: final ${:.2}, return {:.2}%, max drawdown {:.2}%",
//!         result.strategy.name(),
//!         result.final_value,
//!         result.total_return * 100.0,
//!         result.max_drawdown * 100.0
//!     );
//! }
//! ```

pub mod backtest;
pub mod config;
pub mod error;
pub mod indicators;
pub mod types;

pub use backtest::StrategyBacktester;
pub use config::{BacktestConfig, StrategyConfig};
pub use error::{StrategyError, StrategyResult};
pub use indicators::{simple_moving_average, SimpleMovingAverage};
pub use types::{BacktestResult, PortfolioSnapshot, Side, Trade};
