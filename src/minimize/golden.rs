//! Golden-section minimizer and the unimodality probe.
//!
//! Classic golden-section narrowing with ratio `(sqrt(5) - 1) / 2`. The
//! bounded variant that coordinate descent drives (fixed inner iteration
//! budget, selectable search direction) lives here too.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::domain::Interval;
use crate::error::{NumcoreError, Result};
use crate::evaluate::{eval_scalar, EvalPolicy, ScalarFunction, EVAL_SENTINEL};
use crate::minimize::{check_epsilon, SearchResult, MAX_NARROWING_ITERATIONS};

/// The golden section ratio `(sqrt(5) - 1) / 2`.
pub(crate) fn golden_ratio() -> f64 {
    (5.0_f64.sqrt() - 1.0) / 2.0
}

/// Default number of probe points for [`check_unimodality`].
pub const DEFAULT_UNIMODALITY_PROBES: usize = 9;

/// Golden-section minimizer over a unimodal interval.
///
/// Each iteration places the probes `x1 = b - r(b-a)` and `x2 = a + r(b-a)`
/// with `r` the golden ratio, compares the function values, and narrows to
/// the half that keeps the smaller one. The loop runs while the interval is
/// wider than `epsilon`, capped at [`MAX_NARROWING_ITERATIONS`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GoldenSectionMinimizer {
    /// What to do when the evaluator fails at a probe point.
    pub policy: EvalPolicy,
}

impl GoldenSectionMinimizer {
    /// Create a minimizer with the default (masking) evaluation policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the minimum of `f` on `interval` to within `epsilon`.
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
    ///   to narrow within the hard cap (the function is likely not unimodal
    ///   on the interval)
    pub fn find_minimum<F: ScalarFunction>(
        &self,
        f: &F,
        interval: Interval,
        epsilon: f64,
    ) -> Result<SearchResult> {
        check_epsilon(epsilon)?;

        let eval = |x: f64| eval_scalar(f, x, self.policy, EVAL_SENTINEL);
        let (x, iterations, width_met) = narrow(
            eval,
            interval.a(),
            interval.b(),
            epsilon,
            MAX_NARROWING_ITERATIONS,
            false,
        )?;

        if !width_met {
            return Err(NumcoreError::IterationLimitExceeded(
                MAX_NARROWING_ITERATIONS,
            ));
        }

        let value = eval_scalar(f, x, self.policy, EVAL_SENTINEL)?;

        Ok(SearchResult {
            x,
            value,
            iterations,
            converged: true,
        })
    }
}

/// Run the golden-section narrowing loop.
///
/// Returns the final interval midpoint, the number of iterations, and
/// whether the width criterion was met before `cap` iterations ran out.
/// With `maximize` set the comparison direction flips.
pub(crate) fn narrow<E>(
    eval: E,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    cap: usize,
    maximize: bool,
) -> Result<(f64, usize, bool)>
where
    E: Fn(f64) -> Result<f64>,
{
    let ratio = golden_ratio();
    let mut iterations = 0;

    while (b - a) > epsilon {
        if iterations >= cap {
            return Ok(((a + b) / 2.0, iterations, false));
        }

        let x1 = b - ratio * (b - a);
        let x2 = a + ratio * (b - a);

        let f1 = eval(x1)?;
        let f2 = eval(x2)?;

        let keep_left = if maximize { f1 > f2 } else { f1 < f2 };
        if keep_left {
            b = x2;
        } else {
            a = x1;
        }

        iterations += 1;
    }

    trace!("golden section narrowed to [{}, {}] in {} iterations", a, b, iterations);

    Ok(((a + b) / 2.0, iterations, true))
}

/// Probe whether `f` looks unimodal on `interval`.
///
/// Samples `probes` evenly spaced points (clamped into the 5..=10 band),
/// takes consecutive finite differences, and counts sign changes. More than
/// one sign change flags probable multimodality. The check is advisory: it
/// never blocks a search, and evaluation failures are masked.
///
/// # Arguments
///
/// * `f` - The function to probe
/// * `interval` - The domain to sample
/// * `probes` - Number of sample points, clamped to `5..=10`
///
/// # Returns
///
/// * `true` if at most one sign change was seen across the samples
pub fn check_unimodality<F: ScalarFunction>(
    f: &F,
    interval: Interval,
    probes: usize,
) -> Result<bool> {
    let probes = probes.clamp(5, 10);

    let a = interval.a();
    let width = interval.width();

    let mut values = Vec::with_capacity(probes);
    for i in 0..probes {
        let x = a + width * (i as f64) / ((probes - 1) as f64);
        values.push(eval_scalar(f, x, EvalPolicy::Mask, EVAL_SENTINEL)?);
    }

    let mut sign_changes = 0;
    let mut last_sign = 0i32;

    for pair in values.windows(2) {
        let diff = pair[1] - pair[0];
        let sign = if diff > 0.0 {
            1
        } else if diff < 0.0 {
            -1
        } else {
            0
        };

        if sign != 0 {
            if last_sign != 0 && sign != last_sign {
                sign_changes += 1;
            }
            last_sign = sign;
        }
    }

    Ok(sign_changes <= 1)
}
