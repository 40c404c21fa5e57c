//! Monte Carlo portfolio optimization
//!
//! Samples random long-only allocations and keeps the one with the highest
//! Sharpe ratio:
//! - Portfolio return: Σ w_i * μ_i
//! - Portfolio risk: σ_p = √(w^T Σ w)
//! - Sharpe ratio: (return - risk_free) / risk
//!
//! Weight vectors are drawn sequentially from a single generator and then
//! evaluated in parallel, so a fixed seed reproduces the same frontier
//! regardless of how many threads rayon uses.
//!
//! Returns and the risk-free rate are per period (no annualization). The
//! optimum reflects historical data only.

use crate::config::OptimizerConfig;
use crate::error::{Result, RiskError};
use crate::statistics::{self, ensure_observations};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// One simulated allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    /// Asset weights, non-negative and summing to 1
    pub weights: Vec<f64>,

    /// Expected return per period
    pub expected_return: f64,

    /// Volatility per period
    pub risk: f64,

    /// (expected_return - risk_free) / risk; negative infinity for a zero-risk sample
    pub sharpe_ratio: f64,
}

/// Result of an efficient frontier search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfficientFrontierResult {
    /// Simulated portfolio with the highest Sharpe ratio (first one on ties)
    pub optimal: PortfolioResult,

    /// Every simulated portfolio, in draw order
    pub simulations: Vec<PortfolioResult>,

    /// Asset names, aligned with the weight vectors
    pub asset_names: Vec<String>,
}

/// Monte Carlo efficient frontier optimizer
pub struct PortfolioOptimizer {
    config: OptimizerConfig,
}

impl PortfolioOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run the Monte Carlo search
    ///
    /// With `random_seed` set the result is reproducible; without it the
    /// generator is seeded from OS entropy and every call differs.
    ///
    /// # Example
    ///
    /// ```
    /// use fr_risk::config::OptimizerConfig;
    /// use fr_risk::portfolio::PortfolioOptimizer;
    ///
    /// let optimizer = PortfolioOptimizer::new(OptimizerConfig {
    ///     num_portfolios: 200,
    ///     random_seed: Some(7),
    ///     ..Default::default()
    /// });
    ///
    /// let returns = vec![
    ///     vec![0.01, -0.02, 0.015, 0.005, -0.01],
    ///     vec![0.002, 0.001, 0.003, -0.001, 0.002],
    /// ];
    /// let names = vec!["Stocks".to_string(), "Bonds".to_string()];
    ///
    /// let frontier = optimizer.calculate_efficient_frontier(&returns, &names).unwrap();
    /// assert_eq!(frontier.simulations.len(), 200);
    /// ```
    pub fn calculate_efficient_frontier(
        &self,
        asset_returns: &[Vec<f64>],
        asset_names: &[String],
    ) -> Result<EfficientFrontierResult> {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.calculate_efficient_frontier_with_rng(asset_returns, asset_names, &mut rng)
    }

    /// Run the Monte Carlo search with a caller-owned generator
    ///
    /// `random_seed` in the configuration is ignored here.
    pub fn calculate_efficient_frontier_with_rng<R: Rng + ?Sized>(
        &self,
        asset_returns: &[Vec<f64>],
        asset_names: &[String],
        rng: &mut R,
    ) -> Result<EfficientFrontierResult> {
        self.config.validate()?;

        if asset_names.len() != asset_returns.len() {
            return Err(RiskError::LengthMismatch {
                expected: asset_returns.len(),
                actual: asset_names.len(),
            });
        }

        let covariance = covariance_matrix(asset_returns)?;
        if covariance.diagonal().iter().all(|v| *v == 0.0) {
            return Err(RiskError::DivisionByZero(
                "every asset has zero variance, portfolio risk is always zero".to_string(),
            ));
        }

        let means = asset_returns
            .iter()
            .map(|returns| statistics::mean(returns))
            .collect::<Result<Vec<f64>>>()?;
        let means = DVector::from_vec(means);

        let num_assets = asset_returns.len();
        let num_portfolios = self.config.num_portfolios;
        let risk_free_rate = self.config.risk_free_rate;

        info!(
            assets = num_assets,
            portfolios = num_portfolios,
            seeded = self.config.random_seed.is_some(),
            "Calculating efficient frontier"
        );
        let start = Instant::now();

        let draws: Vec<DVector<f64>> = (0..num_portfolios)
            .map(|_| DVector::from_vec(random_weights(num_assets, &mut *rng)))
            .collect();

        let evaluate = |weights: &DVector<f64>| {
            evaluate_portfolio(weights, &means, &covariance, risk_free_rate)
        };

        let simulations: Vec<PortfolioResult> = if num_portfolios >= self.config.min_parallel_portfolios
        {
            draws.par_iter().map(evaluate).collect()
        } else {
            draws.iter().map(evaluate).collect()
        };

        let mut optimal_index = 0;
        for (index, portfolio) in simulations.iter().enumerate().skip(1) {
            if portfolio.sharpe_ratio > simulations[optimal_index].sharpe_ratio {
                optimal_index = index;
            }
        }
        let optimal = simulations[optimal_index].clone();

        debug!(
            optimal_index,
            sharpe = optimal.sharpe_ratio,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Efficient frontier complete"
        );

        Ok(EfficientFrontierResult {
            optimal,
            simulations,
            asset_names: asset_names.to_vec(),
        })
    }
}

fn evaluate_portfolio(
    weights: &DVector<f64>,
    means: &DVector<f64>,
    covariance: &DMatrix<f64>,
    risk_free_rate: f64,
) -> PortfolioResult {
    let expected_return = weights.dot(means);
    let risk = quadratic_risk(weights, covariance);
    let sharpe_ratio = if risk > 0.0 {
        (expected_return - risk_free_rate) / risk
    } else {
        f64::NEG_INFINITY
    };

    PortfolioResult {
        weights: weights.as_slice().to_vec(),
        expected_return,
        risk,
        sharpe_ratio,
    }
}

/// √(w^T Σ w); rounding can push a near-zero variance slightly negative
fn quadratic_risk(weights: &DVector<f64>, covariance: &DMatrix<f64>) -> f64 {
    let variance = (&weights.transpose() * covariance * weights)[(0, 0)];
    variance.max(0.0).sqrt()
}

/// Sample covariance matrix of K return series
///
/// Variances on the diagonal, pairwise covariances off it; the result is
/// symmetric and K x K.
pub fn covariance_matrix(asset_returns: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    validate_asset_returns(asset_returns)?;

    let n = asset_returns.len();
    let mut matrix = DMatrix::zeros(n, n);

    for i in 0..n {
        matrix[(i, i)] = statistics::variance(&asset_returns[i])?;
        for j in (i + 1)..n {
            let cov = statistics::covariance(&asset_returns[i], &asset_returns[j])?;
            matrix[(i, j)] = cov;
            matrix[(j, i)] = cov;
        }
    }

    Ok(matrix)
}

/// Weighted sum of per-asset mean returns
pub fn portfolio_return(weights: &[f64], mean_returns: &[f64]) -> Result<f64> {
    if weights.len() != mean_returns.len() {
        return Err(RiskError::LengthMismatch {
            expected: mean_returns.len(),
            actual: weights.len(),
        });
    }

    Ok(weights.iter().zip(mean_returns).map(|(w, r)| w * r).sum())
}

/// Portfolio volatility σ_p = √(w^T Σ w)
pub fn portfolio_risk(weights: &[f64], covariance: &DMatrix<f64>) -> Result<f64> {
    if covariance.nrows() != weights.len() || covariance.ncols() != weights.len() {
        return Err(RiskError::LengthMismatch {
            expected: covariance.nrows(),
            actual: weights.len(),
        });
    }

    let w = DVector::from_column_slice(weights);
    Ok(quadratic_risk(&w, covariance))
}

/// Random long-only weights summing to 1
///
/// Normalized exponential draws, which sample the simplex uniformly.
pub fn random_weights<R: Rng + ?Sized>(num_assets: usize, rng: &mut R) -> Vec<f64> {
    if num_assets == 0 {
        return Vec::new();
    }

    loop {
        let draws: Vec<f64> = (0..num_assets).map(|_| rng.sample::<f64, _>(Exp1)).collect();
        let sum: f64 = draws.iter().sum();
        if sum > 0.0 {
            return draws.into_iter().map(|d| d / sum).collect();
        }
    }
}

fn validate_asset_returns(asset_returns: &[Vec<f64>]) -> Result<()> {
    let first = asset_returns
        .first()
        .ok_or_else(|| RiskError::invalid("Asset returns cannot be empty"))?;

    for returns in asset_returns {
        if returns.len() != first.len() {
            return Err(RiskError::LengthMismatch {
                expected: first.len(),
                actual: returns.len(),
            });
        }
        ensure_observations(returns, 2)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn create_test_assets() -> (Vec<Vec<f64>>, Vec<String>) {
        let stocks = vec![0.02, -0.01, 0.03, -0.02, 0.015, 0.01, -0.005, 0.025, -0.015, 0.02];
        let bonds = vec![0.003, 0.002, 0.001, 0.004, 0.002, 0.003, 0.001, 0.002, 0.003, 0.002];
        let gold = vec![-0.01, 0.02, -0.005, 0.015, 0.0, -0.01, 0.012, -0.008, 0.01, 0.005];
        (
            vec![stocks, bonds, gold],
            vec!["Stocks".to_string(), "Bonds".to_string(), "Gold".to_string()],
        )
    }

    fn seeded_optimizer(num_portfolios: usize, seed: u64) -> PortfolioOptimizer {
        PortfolioOptimizer::new(OptimizerConfig {
            num_portfolios,
            risk_free_rate: 0.0,
            random_seed: Some(seed),
            min_parallel_portfolios: 100,
        })
    }

    #[test]
    fn test_covariance_matrix_is_symmetric() {
        let (returns, _) = create_test_assets();
        let cov = covariance_matrix(&returns).unwrap();

        assert_eq!(cov.nrows(), 3);
        assert_eq!(cov.ncols(), 3);
        for i in 0..3 {
            assert_relative_eq!(cov[(i, i)], statistics::variance(&returns[i]).unwrap());
            for j in 0..3 {
                assert_eq!(cov[(i, j)], cov[(j, i)]);
            }
        }
    }

    #[test]
    fn test_covariance_matrix_validation() {
        assert!(matches!(covariance_matrix(&[]), Err(RiskError::InvalidArgument(_))));

        let mismatched = vec![vec![0.1, 0.2, 0.3], vec![0.1, 0.2]];
        assert!(matches!(
            covariance_matrix(&mismatched),
            Err(RiskError::LengthMismatch { expected: 3, actual: 2 })
        ));

        let short = vec![vec![0.1], vec![0.2]];
        assert!(matches!(
            covariance_matrix(&short),
            Err(RiskError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_portfolio_return_and_risk() {
        let weights = [0.6, 0.4];
        assert_relative_eq!(portfolio_return(&weights, &[0.10, 0.05]).unwrap(), 0.08);

        // Uncorrelated: σ² = 0.36 * 0.04 + 0.16 * 0.01
        let cov = DMatrix::from_row_slice(2, 2, &[0.04, 0.0, 0.0, 0.01]);
        let risk = portfolio_risk(&weights, &cov).unwrap();
        assert_relative_eq!(risk, (0.36f64 * 0.04 + 0.16 * 0.01).sqrt(), epsilon = 1e-12);

        assert!(portfolio_return(&weights, &[0.1]).is_err());
        assert!(portfolio_risk(&[1.0], &cov).is_err());
    }

    #[test]
    fn test_random_weights_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..6 {
            let weights = random_weights(n, &mut rng);
            assert_eq!(weights.len(), n);
            assert!(weights.iter().all(|w| *w >= 0.0));
            assert_abs_diff_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_efficient_frontier_is_reproducible_with_seed() {
        let (returns, names) = create_test_assets();
        let optimizer = seeded_optimizer(500, 42);

        let first = optimizer.calculate_efficient_frontier(&returns, &names).unwrap();
        let second = optimizer.calculate_efficient_frontier(&returns, &names).unwrap();

        assert_eq!(first.optimal, second.optimal);
        assert_eq!(first.simulations, second.simulations);
        assert_eq!(first.asset_names, names);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let (returns, names) = create_test_assets();
        let parallel = seeded_optimizer(400, 9);
        let sequential = PortfolioOptimizer::new(OptimizerConfig {
            min_parallel_portfolios: usize::MAX,
            ..parallel.config().clone()
        });

        let a = parallel.calculate_efficient_frontier(&returns, &names).unwrap();
        let b = sequential.calculate_efficient_frontier(&returns, &names).unwrap();
        assert_eq!(a.simulations, b.simulations);
        assert_eq!(a.optimal, b.optimal);
    }

    #[test]
    fn test_optimal_dominates_all_simulations() {
        let (returns, names) = create_test_assets();
        let frontier = seeded_optimizer(1000, 1)
            .calculate_efficient_frontier(&returns, &names)
            .unwrap();

        assert_eq!(frontier.simulations.len(), 1000);
        for portfolio in &frontier.simulations {
            assert!(frontier.optimal.sharpe_ratio >= portfolio.sharpe_ratio);
            assert_abs_diff_eq!(portfolio.weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }

        let first_best = frontier
            .simulations
            .iter()
            .position(|p| p.sharpe_ratio == frontier.optimal.sharpe_ratio)
            .unwrap();
        assert_eq!(frontier.simulations[first_best], frontier.optimal);
    }

    #[test]
    fn test_efficient_frontier_with_caller_rng() {
        let (returns, names) = create_test_assets();
        let optimizer = seeded_optimizer(50, 0);

        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = optimizer
            .calculate_efficient_frontier_with_rng(&returns, &names, &mut rng_a)
            .unwrap();
        let b = optimizer
            .calculate_efficient_frontier_with_rng(&returns, &names, &mut rng_b)
            .unwrap();
        assert_eq!(a.simulations, b.simulations);
    }

    #[test]
    fn test_efficient_frontier_validation() {
        let (returns, names) = create_test_assets();

        let zero = PortfolioOptimizer::new(OptimizerConfig {
            num_portfolios: 0,
            ..Default::default()
        });
        assert!(matches!(
            zero.calculate_efficient_frontier(&returns, &names),
            Err(RiskError::InvalidArgument(_))
        ));

        let optimizer = seeded_optimizer(10, 1);
        assert!(matches!(
            optimizer.calculate_efficient_frontier(&returns, &names[..2]),
            Err(RiskError::LengthMismatch { .. })
        ));
        assert!(matches!(
            optimizer.calculate_efficient_frontier(&[], &[]),
            Err(RiskError::InvalidArgument(_))
        ));

        let flat = vec![vec![0.5; 5], vec![0.25; 5]];
        assert!(matches!(
            optimizer.calculate_efficient_frontier(&flat, &names[..2]),
            Err(RiskError::DivisionByZero(_))
        ));

        let inexact_flat = vec![vec![0.1; 5], vec![0.3; 5]];
        assert!(matches!(
            optimizer.calculate_efficient_frontier(&inexact_flat, &names[..2]),
            Err(RiskError::DivisionByZero(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_optimal_sharpe_is_maximum(
            seed in any::<u64>(),
            a in prop::collection::vec(-0.05f64..0.05, 8),
            b in prop::collection::vec(-0.05f64..0.05, 8),
        ) {
            prop_assume!(statistics::variance(&a).unwrap() > 1e-12);
            prop_assume!(statistics::variance(&b).unwrap() > 1e-12);

            let names = vec!["A".to_string(), "B".to_string()];
            let frontier = seeded_optimizer(100, seed)
                .calculate_efficient_frontier(&[a, b], &names)
                .unwrap();

            for portfolio in &frontier.simulations {
                prop_assert!(frontier.optimal.sharpe_ratio >= portfolio.sharpe_ratio);
                prop_assert!((portfolio.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            }
        }
    }
}
