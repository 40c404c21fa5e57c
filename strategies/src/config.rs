//! Strategy and backtest configuration

use crate::error::{StrategyError, StrategyResult};
use serde::{Deserialize, Serialize};

/// Strategy to simulate, with its parameters
///
/// Serialized with an internal `type` tag:
///
/// ```yaml
/// type: MovingAverageCrossover
/// short_period: 50
/// long_period: 200
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StrategyConfig {
    /// Invest a fixed amount every `frequency` days
    Dca {
        investment_amount: f64,
        frequency: usize,
    },

    /// Golden cross buys everything, death cross sells everything
    MovingAverageCrossover {
        short_period: usize,
        long_period: usize,
    },

    /// Spend all capital on day 0 and hold
    BuyAndHold,
}

impl StrategyConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Dca { .. } => "Dollar-Cost Averaging",
            StrategyConfig::MovingAverageCrossover { .. } => "Moving Average Crossover",
            StrategyConfig::BuyAndHold => "Buy and Hold",
        }
    }

    pub fn validate(&self) -> StrategyResult<()> {
        match *self {
            StrategyConfig::Dca {
                investment_amount,
                frequency,
            } => {
                if !(investment_amount.is_finite() && investment_amount > 0.0) {
                    return Err(StrategyError::invalid(format!(
                        "Investment amount must be positive, got {}",
                        investment_amount
                    )));
                }
                if frequency == 0 {
                    return Err(StrategyError::invalid("Frequency must be positive"));
                }
            }
            StrategyConfig::MovingAverageCrossover {
                short_period,
                long_period,
            } => {
                if short_period == 0 || long_period == 0 {
                    return Err(StrategyError::invalid("MA periods must be positive"));
                }
                if short_period >= long_period {
                    return Err(StrategyError::invalid(format!(
                        "Short period ({}) must be less than long period ({})",
                        short_period, long_period
                    )));
                }
            }
            StrategyConfig::BuyAndHold => {}
        }
        Ok(())
    }
}

/// Backtest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Starting cash
    pub initial_capital: f64,

    /// Strategy to simulate
    pub strategy: StrategyConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            strategy: StrategyConfig::BuyAndHold,
        }
    }
}

impl BacktestConfig {
    /// Load a backtest configuration from YAML
    ///
    /// # Example
    ///
    /// ```
    /// use fr_strategies::config::{BacktestConfig, StrategyConfig};
    ///
    /// let yaml = r#"
    /// initial_capital: 10000.0
    /// strategy:
    ///   type: Dca
    ///   investment_amount: 1000.0
    ///   frequency: 30
    /// "#;
    ///
    /// let config = BacktestConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.strategy.name(), "Dollar-Cost Averaging");
    /// ```
    pub fn from_yaml(yaml: &str) -> StrategyResult<Self> {
        let config: BacktestConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a backtest configuration from JSON
    pub fn from_json(json: &str) -> StrategyResult<Self> {
        let config: BacktestConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StrategyResult<()> {
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(StrategyError::invalid(format!(
                "Initial capital must be positive, got {}",
                self.initial_capital
            )));
        }
        self.strategy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ma_crossover_yaml() {
        let yaml = r#"
initial_capital: 50000.0
strategy:
  type: MovingAverageCrossover
  short_period: 50
  long_period: 200
"#;
        let config = BacktestConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.initial_capital, 50_000.0);
        assert_eq!(
            config.strategy,
            StrategyConfig::MovingAverageCrossover {
                short_period: 50,
                long_period: 200
            }
        );
    }

    #[test]
    fn test_parse_buy_and_hold_json() {
        let json = r#"{ "initial_capital": 1000.0, "strategy": { "type": "BuyAndHold" } }"#;
        let config = BacktestConfig::from_json(json).unwrap();
        assert_eq!(config.strategy, StrategyConfig::BuyAndHold);
    }

    #[test]
    fn test_unknown_strategy_type() {
        let json = r#"{ "initial_capital": 1000.0, "strategy": { "type": "Martingale" } }"#;
        assert!(matches!(
            BacktestConfig::from_json(json),
            Err(StrategyError::SerializationError(_))
        ));
    }

    #[test]
    fn test_validation() {
        let bad_dca = StrategyConfig::Dca {
            investment_amount: 0.0,
            frequency: 30,
        };
        assert!(bad_dca.validate().is_err());

        let bad_frequency = StrategyConfig::Dca {
            investment_amount: 100.0,
            frequency: 0,
        };
        assert!(bad_frequency.validate().is_err());

        let inverted = StrategyConfig::MovingAverageCrossover {
            short_period: 200,
            long_period: 50,
        };
        assert!(matches!(
            inverted.validate(),
            Err(StrategyError::InvalidArgument(_))
        ));

        let config = BacktestConfig {
            initial_capital: -5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
