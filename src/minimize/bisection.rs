//! Narrow-probe bisection minimizer.
//!
//! A ternary-search variant that probes two points a fixed small distance
//! apart around the interval midpoint and discards the half that cannot
//! contain the lower value.

use serde::{Deserialize, Serialize};

use crate::domain::Interval;
use crate::error::{NumcoreError, Result};
use crate::evaluate::{eval_scalar, EvalPolicy, ScalarFunction, EVAL_SENTINEL};
use crate::minimize::{check_epsilon, SearchResult, MAX_NARROWING_ITERATIONS};

/// Tolerance of the constant-function pre-check.
const CONSTANT_TOLERANCE: f64 = 1e-15;

/// Bisection-style minimizer over a unimodal interval.
///
/// Each iteration probes `x1 = (a+b-d)/2` and `x2 = (a+b+d)/2` with
/// `d = epsilon/3` and keeps the half containing the smaller value. The loop
/// runs while the interval is wider than `epsilon`, capped at
/// [`MAX_NARROWING_ITERATIONS`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BisectionMinimizer {
    /// What to do when the evaluator fails at a probe point.
    pub policy: EvalPolicy,
}

impl BisectionMinimizer {
    /// Create a minimizer with the default (masking) evaluation policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the minimum of `f` on `interval` to within `epsilon`.
    ///
    /// A constant-function pre-check samples five points (the bounds, the
    /// midpoint, and the quarter points) and short-circuits with the interval
    /// midpoint when all five agree to within `1e-15`.
    ///
    /// # Arguments
    ///
    /// * `f` - The objective
    /// * `interval` - The search domain
    /// * `epsilon` - Target interval width, must be positive
    ///
    /// # Returns
    ///
    /// * The search result, or `IterationLimitExceeded` if the interval fails
    ///   to narrow within the hard cap
    pub fn find_minimum<F: ScalarFunction>(
        &self,
        f: &F,
        interval: Interval,
        epsilon: f64,
    ) -> Result<SearchResult> {
        check_epsilon(epsilon)?;

        let mut a = interval.a();
        let mut b = interval.b();

        if self.is_constant(f, a, b)? {
            let x = (a + b) / 2.0;
            let value = eval_scalar(f, x, self.policy, EVAL_SENTINEL)?;
            return Ok(SearchResult {
                x,
                value,
                iterations: 1,
                converged: true,
            });
        }

        let delta = epsilon / 3.0;
        let mut iterations = 0;

        while (b - a) > epsilon {
            if iterations >= MAX_NARROWING_ITERATIONS {
                return Err(NumcoreError::IterationLimitExceeded(
                    MAX_NARROWING_ITERATIONS,
                ));
            }

            let x1 = (a + b - delta) / 2.0;
            let x2 = (a + b + delta) / 2.0;

            let f1 = eval_scalar(f, x1, self.policy, EVAL_SENTINEL)?;
            let f2 = eval_scalar(f, x2, self.policy, EVAL_SENTINEL)?;

            if f1 < f2 {
                b = x2;
            } else {
                a = x1;
            }

            iterations += 1;
        }

        let x = (a + b) / 2.0;
        let value = eval_scalar(f, x, self.policy, EVAL_SENTINEL)?;

        Ok(SearchResult {
            x,
            value,
            iterations,
            converged: true,
        })
    }

    /// Sample five evenly spaced points and report whether they all agree
    /// within [`CONSTANT_TOLERANCE`].
    fn is_constant<F: ScalarFunction>(&self, f: &F, a: f64, b: f64) -> Result<bool> {
        let width = b - a;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;

        for i in 0..5 {
            let x = a + width * (i as f64) / 4.0;
            let value = eval_scalar(f, x, self.policy, EVAL_SENTINEL)?;
            lo = lo.min(value);
            hi = hi.max(value);
        }

        Ok(hi - lo <= CONSTANT_TOLERANCE)
    }
}
