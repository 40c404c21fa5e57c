//! # fr-risk: Deterministic Quantitative Risk Analytics
//!
//! This library turns historical price and return series into risk metrics,
//! risk-adjusted performance scores and Monte Carlo optimized allocations.
//! Every function works on caller-supplied data only and returns a value or a
//! typed [`RiskError`].
//!
//! ## Core Components
//!
//! - **annuity**: Future value, required payment and required periods of a
//!   fixed contribution plan
//! - **statistics**: Mean, variance, covariance, correlation, beta, Sharpe,
//!   Sortino, Z-score and volatility annualization
//! - **var**: Parametric and historical Value at Risk
//! - **classifier**: Volatility bands and qualitative Sharpe/beta/correlation readings
//! - **portfolio**: Monte Carlo efficient frontier search
//! - **ratio**: Price ratio mean-reversion analysis
//! - **report**: Composite risk and market relation reports
//!
//! ## Example Usage
//!
//! ```rust
//! use fr_risk::{statistics, var, classifier};
//!
//! let returns = vec![0.012, -0.008, 0.005, -0.015, 0.020, 0.003, -0.004, 0.009];
//!
//! let vol = statistics::volatility(&returns).unwrap();
//! let annual_vol = statistics::daily_to_annual_volatility(vol);
//! let class = classifier::classify_by_volatility(annual_vol).unwrap();
//!
//! let var_95 = var::parametric_var(100_000.0, vol, 0.95, 0.0).unwrap();
//! assert!(var_95 > 0.0);
//! println!("{} (VaR 95%: ${:.2})", class.description, var_95);
//! ```

pub mod annuity;
pub mod classifier;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod ratio;
pub mod report;
pub mod statistics;
pub mod var;

pub use classifier::{AssetClass, BetaProfile, RiskLevel, SharpeRating};
pub use config::{AnalyticsConfig, OptimizerConfig, Periodicity};
pub use error::{Result, RiskError};
pub use portfolio::{EfficientFrontierResult, PortfolioOptimizer, PortfolioResult};
pub use ratio::{RatioAnalysisResult, RatioSignal};
pub use report::{MarketRelationReport, RiskReport};
pub use var::{ConfidenceLevel, VarMethod};
