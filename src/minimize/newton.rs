//! Damped Newton minimizer with interval projection and backtracking.
//!
//! Derivatives are numerical (central differences). The Newton step is only
//! trusted where the curvature approximation is positive; elsewhere a small
//! gradient-sign step is taken to escape flat or concave regions. If the
//! position or curvature ever becomes non-finite the whole search degrades
//! to golden section, which is a required safety net rather than an
//! optimization.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::Interval;
use crate::error::Result;
use crate::evaluate::{eval_scalar, EvalPolicy, ScalarFunction, EVAL_SENTINEL};
use crate::minimize::golden::GoldenSectionMinimizer;
use crate::minimize::{check_epsilon, SearchResult};
use crate::utils::finite_difference::{first_derivative, second_derivative};

/// Smallest curvature magnitude the Newton step divides by.
const CURVATURE_FLOOR: f64 = 1e-15;

/// Fixed gradient-sign step taken where the curvature is untrustworthy.
const GRADIENT_STEP: f64 = 0.1;

/// Maximum number of step halvings per outer iteration.
const MAX_BACKTRACKS: usize = 25;

/// Margin kept from the interval bounds when re-projecting a candidate.
const PROJECTION_MARGIN: f64 = 1e-9;

/// Damped Newton minimizer over an interval.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NewtonMinimizer {
    /// What to do when the evaluator fails at a probe point.
    pub policy: EvalPolicy,
}

impl NewtonMinimizer {
    /// Create a minimizer with the default (masking) evaluation policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the minimum of `f` on `interval`, starting from the midpoint.
    ///
    /// The outer loop stops when the displacement between successive points
    /// falls below `epsilon` (`converged = true`) or after `max_iterations`
    /// (`converged = false`; not an error).
    ///
    /// # Arguments
    ///
    /// * `f` - The objective
    /// * `interval` - The search domain; candidates are projected back into
    ///   it with a small margin
    /// * `epsilon` - Displacement tolerance, must be positive
    /// * `max_iterations` - Outer iteration budget
    ///
    /// # Returns
    ///
    /// * The search result; degraded to a golden-section search if the
    ///   position or curvature becomes non-finite
    pub fn find_minimum<F: ScalarFunction>(
        &self,
        f: &F,
        interval: Interval,
        epsilon: f64,
        max_iterations: usize,
    ) -> Result<SearchResult> {
        check_epsilon(epsilon)?;

        let eval = |x: f64| eval_scalar(f, x, self.policy, EVAL_SENTINEL);

        let mut x = interval.midpoint();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            let gradient = first_derivative(eval, x)?;
            let curvature = second_derivative(eval, x)?;

            if !x.is_finite() || !curvature.is_finite() {
                debug!("newton state non-finite at x = {}, falling back to golden section", x);
                return GoldenSectionMinimizer { policy: self.policy }
                    .find_minimum(f, interval, epsilon);
            }

            // The Newton step is only trusted at points of positive curvature.
            let mut step = if curvature.abs() >= CURVATURE_FLOOR && curvature > 0.0 {
                -gradient / curvature
            } else {
                -gradient.signum() * GRADIENT_STEP
            };

            let fx = eval(x)?;
            let mut candidate = x + step;
            let mut backtracks = 0;

            loop {
                let improves = interval.contains(candidate) && eval(candidate)? < fx;
                if improves {
                    break;
                }

                if backtracks >= MAX_BACKTRACKS {
                    // No improving point along this direction; stay put.
                    candidate = x;
                    break;
                }

                step /= 2.0;
                candidate = interval.clamp(x + step, PROJECTION_MARGIN);
                backtracks += 1;
            }

            let displacement = (candidate - x).abs();
            x = candidate;
            iterations += 1;

            if displacement < epsilon {
                converged = true;
                break;
            }
        }

        let value = eval(x)?;

        Ok(SearchResult {
            x,
            value,
            iterations,
            converged,
        })
    }
}
