//! Technical indicators for crossover signals

use crate::error::{StrategyError, StrategyResult};
use std::collections::VecDeque;

/// Simple Moving Average over a rolling window
pub struct SimpleMovingAverage {
    period: usize,
    prices: VecDeque<f64>,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prices: VecDeque::with_capacity(period),
        }
    }

    pub fn update(&mut self, price: f64) {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
    }

    /// Average of the window, `None` until `period` prices have been seen
    pub fn value(&self) -> Option<f64> {
        if self.period == 0 || self.prices.len() < self.period {
            return None;
        }
        Some(self.prices.iter().sum::<f64>() / self.period as f64)
    }
}

/// SMA at every index of `prices`
///
/// Indices before the first full window are `None` rather than a sentinel
/// value, so a crossover can never fire on an unfilled average.
pub fn simple_moving_average(prices: &[f64], period: usize) -> StrategyResult<Vec<Option<f64>>> {
    if period == 0 {
        return Err(StrategyError::invalid("Period must be positive"));
    }
    if period > prices.len() {
        return Err(StrategyError::InsufficientData {
            required: period,
            actual: prices.len(),
        });
    }

    let mut sma = SimpleMovingAverage::new(period);
    Ok(prices
        .iter()
        .map(|&price| {
            sma.update(price);
            sma.value()
        })
        .collect())
}
