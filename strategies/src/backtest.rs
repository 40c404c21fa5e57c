//! Day-by-day strategy backtester
//!
//! Walks a price series one day at a time, lets the configured strategy trade
//! at that day's price, and records a portfolio snapshot after every day.
//! Trades execute at the day's price with no fees, slippage or fractional
//! share limits.
//!
//! Past performance does not predict future results.

use crate::config::{BacktestConfig, StrategyConfig};
use crate::error::{StrategyError, StrategyResult};
use crate::indicators::simple_moving_average;
use crate::types::{BacktestResult, PortfolioSnapshot, Side, Trade};
use tracing::{debug, info};

/// Calendar days per year used to annualize returns
const DAYS_PER_YEAR: f64 = 365.0;

/// Cash and holdings during a simulation
struct Account {
    cash: f64,
    shares: f64,
    trades: Vec<Trade>,
}

impl Account {
    fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            shares: 0.0,
            trades: Vec::new(),
        }
    }

    fn value(&self, price: f64) -> f64 {
        self.cash + self.shares * price
    }

    /// Spend `amount` of cash on shares at `price`
    fn buy(&mut self, day_index: usize, price: f64, amount: f64) {
        let shares = amount / price;
        self.shares += shares;
        self.cash -= amount;
        self.record(day_index, Side::Buy, price, shares, amount);
    }

    fn buy_all(&mut self, day_index: usize, price: f64) {
        let amount = self.cash;
        let shares = amount / price;
        self.shares += shares;
        self.cash = 0.0;
        self.record(day_index, Side::Buy, price, shares, amount);
    }

    fn sell_all(&mut self, day_index: usize, price: f64) {
        let shares = self.shares;
        let amount = shares * price;
        self.cash += amount;
        self.shares = 0.0;
        self.record(day_index, Side::Sell, price, shares, amount);
    }

    fn record(&mut self, day_index: usize, side: Side, price: f64, shares: f64, amount: f64) {
        debug!(day = day_index, %side, price, shares, amount, "Trade executed");
        self.trades.push(Trade {
            day_index,
            side,
            price,
            shares,
            amount,
        });
    }
}

/// Daily decision rule driven by the simulator
trait Strategy {
    fn on_day(&mut self, day_index: usize, price: f64, account: &mut Account);
}

struct BuyAndHold;

impl Strategy for BuyAndHold {
    fn on_day(&mut self, day_index: usize, price: f64, account: &mut Account) {
        if day_index == 0 {
            account.buy_all(day_index, price);
        }
    }
}

struct DollarCostAveraging {
    investment_amount: f64,
    frequency: usize,
}

impl Strategy for DollarCostAveraging {
    fn on_day(&mut self, day_index: usize, price: f64, account: &mut Account) {
        if day_index % self.frequency == 0 && account.cash >= self.investment_amount {
            account.buy(day_index, price, self.investment_amount);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionState {
    NotInvested,
    Invested,
}

struct MovingAverageCrossover {
    short_sma: Vec<Option<f64>>,
    long_sma: Vec<Option<f64>>,
    state: PositionState,
}

impl MovingAverageCrossover {
    fn new(prices: &[f64], short_period: usize, long_period: usize) -> StrategyResult<Self> {
        Ok(Self {
            short_sma: simple_moving_average(prices, short_period)?,
            long_sma: simple_moving_average(prices, long_period)?,
            state: PositionState::NotInvested,
        })
    }

    /// Previous and current (short, long) averages, once all four exist
    fn averages(&self, day_index: usize) -> Option<((f64, f64), (f64, f64))> {
        let prev = day_index.checked_sub(1)?;
        Some((
            (self.short_sma[prev]?, self.long_sma[prev]?),
            (self.short_sma[day_index]?, self.long_sma[day_index]?),
        ))
    }
}

impl Strategy for MovingAverageCrossover {
    fn on_day(&mut self, day_index: usize, price: f64, account: &mut Account) {
        let Some(((prev_short, prev_long), (short, long))) = self.averages(day_index) else {
            return;
        };

        let golden_cross = prev_short <= prev_long && short > long;
        let death_cross = prev_short >= prev_long && short < long;

        match self.state {
            PositionState::NotInvested if golden_cross && account.cash > 0.0 => {
                account.buy_all(day_index, price);
                self.state = PositionState::Invested;
            }
            PositionState::Invested if death_cross && account.shares > 0.0 => {
                account.sell_all(day_index, price);
                self.state = PositionState::NotInvested;
            }
            _ => {}
        }
    }
}

/// Strategy backtester
///
/// # Example
///
/// ```
/// use fr_strategies::backtest::StrategyBacktester;
/// use fr_strategies::config::{BacktestConfig, StrategyConfig};
///
/// let backtester = StrategyBacktester::new(BacktestConfig {
///     initial_capital: 10_000.0,
///     strategy: StrategyConfig::Dca { investment_amount: 1_000.0, frequency: 2 },
/// }).unwrap();
///
/// let prices = [100.0, 95.0, 90.0, 105.0, 110.0];
/// let result = backtester.run(&prices).unwrap();
/// assert_eq!(result.total_trades, 3);
/// assert!(result.max_drawdown <= 0.0);
/// ```
pub struct StrategyBacktester {
    config: BacktestConfig,
}

impl StrategyBacktester {
    /// Create a backtester, validating the configuration
    pub fn new(config: BacktestConfig) -> StrategyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the configured strategy over `prices`
    pub fn run(&self, prices: &[f64]) -> StrategyResult<BacktestResult> {
        Self::run_strategy(prices, self.config.initial_capital, &self.config.strategy)
    }

    /// Run any strategy over `prices` starting from `initial_capital`
    pub fn run_strategy(
        prices: &[f64],
        initial_capital: f64,
        strategy: &StrategyConfig,
    ) -> StrategyResult<BacktestResult> {
        validate_prices(prices)?;
        BacktestConfig {
            initial_capital,
            strategy: strategy.clone(),
        }
        .validate()?;

        match *strategy {
            StrategyConfig::BuyAndHold => {
                simulate(prices, initial_capital, strategy, &mut BuyAndHold)
            }
            StrategyConfig::Dca {
                investment_amount,
                frequency,
            } => simulate(
                prices,
                initial_capital,
                strategy,
                &mut DollarCostAveraging {
                    investment_amount,
                    frequency,
                },
            ),
            StrategyConfig::MovingAverageCrossover {
                short_period,
                long_period,
            } => {
                let mut crossover = MovingAverageCrossover::new(prices, short_period, long_period)?;
                simulate(prices, initial_capital, strategy, &mut crossover)
            }
        }
    }

    /// Spend all capital on day 0 and hold; always one trade
    pub fn run_buy_and_hold(prices: &[f64], initial_capital: f64) -> StrategyResult<BacktestResult> {
        Self::run_strategy(prices, initial_capital, &StrategyConfig::BuyAndHold)
    }

    /// Invest `investment_amount` every `frequency` days while cash allows
    pub fn run_dca(
        prices: &[f64],
        initial_capital: f64,
        investment_amount: f64,
        frequency: usize,
    ) -> StrategyResult<BacktestResult> {
        Self::run_strategy(
            prices,
            initial_capital,
            &StrategyConfig::Dca {
                investment_amount,
                frequency,
            },
        )
    }

    /// Golden cross buys with all cash, death cross sells all shares
    ///
    /// The first possible trade is on day `long_period`, the first day both
    /// averages exist for the current and the previous day.
    pub fn run_moving_average_crossover(
        prices: &[f64],
        initial_capital: f64,
        short_period: usize,
        long_period: usize,
    ) -> StrategyResult<BacktestResult> {
        Self::run_strategy(
            prices,
            initial_capital,
            &StrategyConfig::MovingAverageCrossover {
                short_period,
                long_period,
            },
        )
    }

    /// Run several strategies over the same prices, in the given order
    pub fn compare(
        prices: &[f64],
        initial_capital: f64,
        strategies: &[StrategyConfig],
    ) -> StrategyResult<Vec<BacktestResult>> {
        strategies
            .iter()
            .map(|strategy| Self::run_strategy(prices, initial_capital, strategy))
            .collect()
    }
}

fn simulate(
    prices: &[f64],
    initial_capital: f64,
    config: &StrategyConfig,
    strategy: &mut dyn Strategy,
) -> StrategyResult<BacktestResult> {
    info!(
        strategy = config.name(),
        days = prices.len(),
        initial_capital,
        "Starting backtest"
    );

    let mut account = Account::new(initial_capital);
    let mut portfolio_history = Vec::with_capacity(prices.len());

    for (day_index, &price) in prices.iter().enumerate() {
        strategy.on_day(day_index, price, &mut account);

        portfolio_history.push(PortfolioSnapshot {
            day_index,
            portfolio_value: account.value(price),
            cash: account.cash,
            shares: account.shares,
            price,
        });
    }

    // validate_prices guarantees at least one day
    let final_value = portfolio_history[portfolio_history.len() - 1].portfolio_value;
    let total_return = (final_value - initial_capital) / initial_capital;
    let annualized_return = annualized_return(total_return, prices.len())?;
    let max_drawdown = max_drawdown(&portfolio_history);
    let total_trades = account.trades.len();

    info!(
        strategy = config.name(),
        final_value,
        total_return,
        max_drawdown,
        trades = total_trades,
        "Backtest complete"
    );

    Ok(BacktestResult {
        strategy: config.clone(),
        initial_capital,
        portfolio_history,
        trades: account.trades,
        final_value,
        total_return,
        annualized_return,
        max_drawdown,
        total_trades,
    })
}

/// Most negative (value - running peak) / running peak across the history
///
/// The first snapshot is the initial peak. Returns 0 for an empty history or
/// one that never falls below a prior peak.
pub fn max_drawdown(history: &[PortfolioSnapshot]) -> f64 {
    let Some(first) = history.first() else {
        return 0.0;
    };

    let mut peak = first.portfolio_value;
    let mut worst = 0.0;

    for snapshot in history {
        let value = snapshot.portfolio_value;
        if value > peak {
            peak = value;
        }

        let drawdown = (value - peak) / peak;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst
}

/// Annualized return: (1 + total_return)^(365 / num_days) - 1
pub fn annualized_return(total_return: f64, num_days: usize) -> StrategyResult<f64> {
    if num_days == 0 {
        return Err(StrategyError::invalid("Number of days must be positive"));
    }

    let exponent = DAYS_PER_YEAR / num_days as f64;
    Ok((1.0 + total_return).powf(exponent) - 1.0)
}

fn validate_prices(prices: &[f64]) -> StrategyResult<()> {
    if prices.is_empty() {
        return Err(StrategyError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(StrategyError::invalid(format!(
            "All prices must be positive, got {}",
            bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// Falls, recovers strongly, then falls again: one golden and one death cross
    fn create_test_prices() -> Vec<f64> {
        vec![
            100.0, 98.0, 96.0, 94.0, 92.0, 90.0, 92.0, 96.0, 100.0, 105.0,
            110.0, 115.0, 118.0, 116.0, 110.0, 104.0, 98.0, 92.0, 88.0, 85.0,
        ]
    }

    #[test]
    fn test_buy_and_hold_constant_prices() {
        let prices = vec![100.0; 10];
        let result = StrategyBacktester::run_buy_and_hold(&prices, 10_000.0).unwrap();

        assert_eq!(result.final_value, 10_000.0);
        assert_eq!(result.total_return, 0.0);
        assert_eq!(result.annualized_return, 0.0);
        assert_eq!(result.max_drawdown, 0.0);
        assert_eq!(result.total_trades, 1);
        assert_eq!(result.portfolio_history.len(), 10);
        assert_eq!(result.trades[0].side, Side::Buy);
        assert_eq!(result.trades[0].shares, 100.0);
    }

    #[test]
    fn test_buy_and_hold_doubling() {
        let prices = [50.0, 60.0, 40.0, 100.0];
        let result = StrategyBacktester::run_buy_and_hold(&prices, 1_000.0).unwrap();

        assert_relative_eq!(result.final_value, 2_000.0);
        assert_relative_eq!(result.total_return, 1.0);
        // Peak 1200 on day 1, trough 800 on day 2
        assert_relative_eq!(result.max_drawdown, -1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dca_schedule() {
        let prices = [100.0, 50.0, 100.0, 50.0, 100.0, 50.0, 100.0];
        let result = StrategyBacktester::run_dca(&prices, 2_500.0, 1_000.0, 2).unwrap();

        // Days 0 and 2 invest; day 4 lacks cash (500 < 1000)
        assert_eq!(result.total_trades, 2);
        assert_eq!(result.trades[0].day_index, 0);
        assert_eq!(result.trades[1].day_index, 2);

        let last = &result.portfolio_history[6];
        assert_relative_eq!(last.cash, 500.0);
        assert_relative_eq!(last.shares, 20.0);
        assert_relative_eq!(result.final_value, 2_500.0);
    }

    #[test]
    fn test_dca_invalid_config() {
        let prices = [100.0, 101.0];
        assert!(matches!(
            StrategyBacktester::run_dca(&prices, 1_000.0, 0.0, 1),
            Err(StrategyError::InvalidArgument(_))
        ));
        assert!(matches!(
            StrategyBacktester::run_dca(&prices, 1_000.0, 100.0, 0),
            Err(StrategyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_moving_average_crossover_round_trip() {
        let prices = create_test_prices();
        let result =
            StrategyBacktester::run_moving_average_crossover(&prices, 10_000.0, 2, 5).unwrap();

        assert_eq!(result.total_trades, 2);
        assert_eq!(result.trades[0].side, Side::Buy);
        assert_eq!(result.trades[1].side, Side::Sell);
        assert!(result.trades[0].day_index >= 5);
        assert!(result.trades[1].day_index > result.trades[0].day_index);

        // Flat in cash after the death cross
        let last = &result.portfolio_history[prices.len() - 1];
        assert_eq!(last.shares, 0.0);
        assert_relative_eq!(last.cash, result.final_value);
    }

    #[test]
    fn test_moving_average_crossover_needs_long_window() {
        let prices = [100.0, 101.0, 102.0];
        assert!(matches!(
            StrategyBacktester::run_moving_average_crossover(&prices, 1_000.0, 2, 5),
            Err(StrategyError::InsufficientData { .. })
        ));
        assert!(matches!(
            StrategyBacktester::run_moving_average_crossover(&prices, 1_000.0, 3, 2),
            Err(StrategyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_no_cross_means_no_trades() {
        // Steady rise: short stays above long from the first comparable day
        let prices: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let result =
            StrategyBacktester::run_moving_average_crossover(&prices, 1_000.0, 3, 10).unwrap();
        assert_eq!(result.total_trades, 0);
        assert_eq!(result.final_value, 1_000.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            StrategyBacktester::run_buy_and_hold(&[], 1_000.0),
            Err(StrategyError::InsufficientData { .. })
        ));
        assert!(matches!(
            StrategyBacktester::run_buy_and_hold(&[100.0, 0.0], 1_000.0),
            Err(StrategyError::InvalidArgument(_))
        ));
        assert!(matches!(
            StrategyBacktester::run_buy_and_hold(&[100.0], 0.0),
            Err(StrategyError::InvalidArgument(_))
        ));
        assert!(StrategyBacktester::new(BacktestConfig {
            initial_capital: -1.0,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_max_drawdown() {
        let history: Vec<PortfolioSnapshot> = [100.0, 120.0, 90.0, 130.0, 117.0]
            .iter()
            .enumerate()
            .map(|(day_index, &v)| PortfolioSnapshot {
                day_index,
                portfolio_value: v,
                cash: v,
                shares: 0.0,
                price: 1.0,
            })
            .collect();

        assert_relative_eq!(max_drawdown(&history), -0.25, epsilon = 1e-12);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn test_annualized_return() {
        assert_abs_diff_eq!(annualized_return(0.1, 365).unwrap(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(
            annualized_return(0.21, 730).unwrap(),
            0.1,
            epsilon = 1e-12
        );
        assert!(annualized_return(0.1, 0).is_err());
    }

    #[test]
    fn test_compare_strategies() {
        let prices = create_test_prices();
        let strategies = [
            StrategyConfig::BuyAndHold,
            StrategyConfig::Dca {
                investment_amount: 1_000.0,
                frequency: 5,
            },
            StrategyConfig::MovingAverageCrossover {
                short_period: 2,
                long_period: 5,
            },
        ];

        let results = StrategyBacktester::compare(&prices, 10_000.0, &strategies).unwrap();
        assert_eq!(results.len(), 3);
        for (result, strategy) in results.iter().zip(&strategies) {
            assert_eq!(&result.strategy, strategy);
            assert_eq!(result.portfolio_history.len(), prices.len());
        }
    }

    #[test]
    fn test_run_from_config() {
        let backtester = StrategyBacktester::new(BacktestConfig::default()).unwrap();
        let result = backtester.run(&create_test_prices()).unwrap();
        assert_eq!(result.total_trades, 1);
        assert_relative_eq!(result.total_return, -0.15, epsilon = 1e-12);
    }
}
