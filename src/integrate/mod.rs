//! Numerical integration over a closed interval.
//!
//! Five fixed composite rules with two calling modes: an exact partition
//! count chosen by the caller, or automatic step selection by
//! Richardson-style doubling of the partition count until successive
//! estimates agree.

pub mod rules;

pub use rules::QuadratureMethod;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::Interval;
use crate::error::{NumcoreError, Result};
use crate::evaluate::{EvalPolicy, ScalarFunction};
use crate::minimize::check_epsilon;

/// Largest partition count the auto-refinement loop will use.
pub const MAX_PARTITIONS: usize = 1_000_000;

/// Maximum number of partition doublings in auto-refinement.
pub const MAX_DOUBLINGS: usize = 20;

/// Result of a quadrature call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationResult {
    /// The rule that produced the value.
    pub method: QuadratureMethod,

    /// The integral estimate.
    pub value: f64,

    /// The partition count behind `value`.
    pub partitions: usize,

    /// A-posteriori error indicator: the absolute difference between the
    /// final estimate and the estimate at half the step. A cheap indicator,
    /// not a rigorous bound.
    pub error_estimate: f64,

    /// Successive estimates, populated only by auto-refinement.
    pub history: Vec<f64>,
}

/// Numerical integrator over `[a, b]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Integrator {
    /// What to do when the evaluator fails at a sample point.
    pub policy: EvalPolicy,
}

impl Integrator {
    /// Create an integrator with the default (masking) evaluation policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate with a caller-chosen partition count.
    ///
    /// An odd `n` is bumped to the next even number for Simpson's rule. The
    /// error estimate is obtained by recomputing at `2n` partitions and
    /// taking the absolute difference.
    ///
    /// # Arguments
    ///
    /// * `f` - The integrand
    /// * `interval` - The integration domain
    /// * `method` - The quadrature rule
    /// * `n` - Partition count, must be at least 1
    ///
    /// # Returns
    ///
    /// * The integration result with an empty history
    pub fn fixed_partitions<F: ScalarFunction>(
        &self,
        f: &F,
        interval: Interval,
        method: QuadratureMethod,
        n: usize,
    ) -> Result<IntegrationResult> {
        if n == 0 {
            return Err(NumcoreError::InvalidArgument(
                "partition count must be at least 1".to_string(),
            ));
        }

        let n = even_for(method, n);
        let a = interval.a();
        let b = interval.b();

        let value = rules::apply(method, f, a, b, n, self.policy)?;
        let refined = rules::apply(method, f, a, b, 2 * n, self.policy)?;

        Ok(IntegrationResult {
            method,
            value,
            partitions: n,
            error_estimate: (refined - value).abs(),
            history: Vec::new(),
        })
    }

    /// Integrate with automatic step selection.
    ///
    /// Starting from `max(2, initial_n)` partitions (evened for Simpson),
    /// the partition count is doubled until the change between successive
    /// estimates falls below `epsilon`, the count would exceed
    /// [`MAX_PARTITIONS`], or [`MAX_DOUBLINGS`] rounds have run. Hitting a
    /// cap is not an error: the last value is returned with its achieved
    /// error estimate so the caller can judge acceptability.
    ///
    /// # Arguments
    ///
    /// * `f` - The integrand
    /// * `interval` - The integration domain
    /// * `method` - The quadrature rule
    /// * `epsilon` - Target change between successive estimates
    /// * `initial_n` - Starting partition count
    ///
    /// # Returns
    ///
    /// * The integration result; `history` holds every successive estimate
    pub fn auto_refine<F: ScalarFunction>(
        &self,
        f: &F,
        interval: Interval,
        method: QuadratureMethod,
        epsilon: f64,
        initial_n: usize,
    ) -> Result<IntegrationResult> {
        check_epsilon(epsilon)?;

        if initial_n > MAX_PARTITIONS {
            return Err(NumcoreError::InvalidArgument(format!(
                "initial partition count {} exceeds the {} cap",
                initial_n, MAX_PARTITIONS
            )));
        }

        let a = interval.a();
        let b = interval.b();

        let mut n = even_for(method, initial_n.max(2));
        let mut value = rules::apply(method, f, a, b, n, self.policy)?;

        let mut history = Vec::with_capacity(MAX_DOUBLINGS + 1);
        history.push(value);

        let mut error_estimate = f64::INFINITY;

        for _ in 0..MAX_DOUBLINGS {
            let next_n = 2 * n;
            if next_n > MAX_PARTITIONS {
                break;
            }

            let refined = rules::apply(method, f, a, b, next_n, self.policy)?;
            error_estimate = (refined - value).abs();
            history.push(refined);

            n = next_n;
            value = refined;

            if error_estimate < epsilon {
                break;
            }
        }

        debug!(
            "auto-refined {:?} to {} partitions, error estimate {:.3e}",
            method, n, error_estimate
        );

        Ok(IntegrationResult {
            method,
            value,
            partitions: n,
            error_estimate,
            history,
        })
    }
}

/// Bump `n` to the next even number when `method` requires it.
fn even_for(method: QuadratureMethod, n: usize) -> usize {
    if method.requires_even() && n % 2 != 0 {
        n + 1
    } else {
        n
    }
}
