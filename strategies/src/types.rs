//! Core value types for backtest results

use crate::config::StrategyConfig;
use crate::error::StrategyResult;
use fr_risk::statistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade side (buy/sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// Executed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Day the trade executed on
    pub day_index: usize,

    pub side: Side,

    /// Execution price
    pub price: f64,

    /// Shares bought or sold
    pub shares: f64,

    /// Cash exchanged
    pub amount: f64,
}

/// Portfolio state at the close of one simulated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub day_index: usize,

    /// Cash plus holdings marked at the day's price
    pub portfolio_value: f64,

    pub cash: f64,

    pub shares: f64,

    /// Asset price that day
    pub price: f64,
}

/// Backtest result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Strategy that produced this result
    pub strategy: StrategyConfig,

    /// Starting cash
    pub initial_capital: f64,

    /// One snapshot per price, in day order
    pub portfolio_history: Vec<PortfolioSnapshot>,

    /// All executed trades
    pub trades: Vec<Trade>,

    /// Portfolio value on the last day
    pub final_value: f64,

    /// (final - initial) / initial
    pub total_return: f64,

    /// (1 + total_return)^(365 / days) - 1
    pub annualized_return: f64,

    /// Most negative peak-to-trough decline, always <= 0
    pub max_drawdown: f64,

    /// Number of trades executed
    pub total_trades: usize,
}

impl BacktestResult {
    /// Day-over-day returns of the portfolio value
    pub fn daily_returns(&self) -> Vec<f64> {
        self.portfolio_history
            .windows(2)
            .map(|pair| pair[1].portfolio_value / pair[0].portfolio_value - 1.0)
            .collect()
    }

    /// Per-day Sharpe ratio of the portfolio value series
    ///
    /// `risk_free_rate` is per day. Fails when the series is too short or its
    /// returns have no variance (e.g. cash that was never invested).
    pub fn sharpe_ratio(&self, risk_free_rate: f64) -> StrategyResult<f64> {
        let returns = self.daily_returns();
        Ok(statistics::sharpe_ratio_from_returns(&returns, risk_free_rate)?)
    }
}
