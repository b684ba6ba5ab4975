//! The five composite quadrature formulas.
//!
//! Each rule evaluates the integrand at `O(n)` sample points over `[a, b]`
//! with step `h = (b - a) / n`. Simpson's rule requires an even partition
//! count at this level; the engine above auto-bumps odd counts before
//! calling in.

use serde::{Deserialize, Serialize};

use crate::error::{NumcoreError, Result};
use crate::evaluate::{eval_scalar, EvalPolicy, ScalarFunction, EVAL_SENTINEL};

/// Quadrature rule selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuadratureMethod {
    /// Rectangle rule sampling the left edge of each partition.
    RectangleLeft,

    /// Rectangle rule sampling the right edge of each partition.
    RectangleRight,

    /// Rectangle rule sampling the midpoint of each partition.
    RectangleMidpoint,

    /// Trapezoidal rule.
    Trapezoidal,

    /// Simpson's rule; requires an even partition count.
    Simpson,
}

impl QuadratureMethod {
    /// Whether the rule requires an even partition count.
    pub fn requires_even(&self) -> bool {
        matches!(self, QuadratureMethod::Simpson)
    }
}

/// Apply `method` to `f` over `[a, b]` with `n` partitions.
pub(crate) fn apply<F: ScalarFunction>(
    method: QuadratureMethod,
    f: &F,
    a: f64,
    b: f64,
    n: usize,
    policy: EvalPolicy,
) -> Result<f64> {
    let h = (b - a) / (n as f64);
    let eval = |x: f64| eval_scalar(f, x, policy, EVAL_SENTINEL);

    match method {
        QuadratureMethod::RectangleLeft => rectangle(eval, a, h, n, 0.0),
        QuadratureMethod::RectangleRight => rectangle(eval, a, h, n, 1.0),
        QuadratureMethod::RectangleMidpoint => rectangle(eval, a, h, n, 0.5),
        QuadratureMethod::Trapezoidal => {
            let mut sum = 0.5 * (eval(a)? + eval(b)?);
            for i in 1..n {
                sum += eval(a + h * (i as f64))?;
            }
            Ok(h * sum)
        }
        QuadratureMethod::Simpson => {
            if n % 2 != 0 {
                return Err(NumcoreError::InvalidArgument(format!(
                    "Simpson's rule requires an even partition count, got {}",
                    n
                )));
            }

            let mut sum = eval(a)? + eval(b)?;
            for i in 1..n {
                let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
                sum += weight * eval(a + h * (i as f64))?;
            }
            Ok(h / 3.0 * sum)
        }
    }
}

/// Composite rectangle rule with sample offset `offset` in `[0, 1]`.
fn rectangle<E>(eval: E, a: f64, h: f64, n: usize, offset: f64) -> Result<f64>
where
    E: Fn(f64) -> Result<f64>,
{
    let mut sum = 0.0;
    for i in 0..n {
        sum += eval(a + h * (i as f64 + offset))?;
    }
    Ok(h * sum)
}
