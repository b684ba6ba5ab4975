//! Coordinate descent for bivariate functions.
//!
//! Alternates bounded golden-section passes along x and y. Each pass is
//! restricted to a local window around the current coordinate rather than
//! the full domain, trading global coverage for stability. This is a local
//! method: it can stall at saddle points or local extrema and is sensitive
//! to the starting point, which is documented behavior rather than a defect.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::Rect;
use crate::error::{NumcoreError, Result};
use crate::evaluate::{eval_bivariate, BivariateFunction, EvalPolicy, EVAL_SENTINEL};
use crate::minimize::check_epsilon;
use crate::minimize::golden::narrow;

/// Minimum window width of a coordinate pass.
const MIN_WINDOW: f64 = 0.1;

/// Fraction of the domain extent used as the window width.
const WINDOW_FRACTION: f64 = 0.2;

/// Search direction of a coordinate descent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Search for a minimum.
    Minimize,

    /// Search for a maximum.
    Maximize,
}

/// One recorded outer iteration of a descent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationPoint {
    /// Outer iteration index; 0 is the starting point.
    pub step: usize,

    /// x coordinate after this iteration.
    pub x: f64,

    /// y coordinate after this iteration.
    pub y: f64,

    /// Function value at `(x, y)`.
    pub value: f64,

    /// Max coordinate displacement since the previous entry.
    pub delta: f64,
}

/// Result of a 2-D coordinate descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescentResult {
    /// Final x coordinate.
    pub x: f64,

    /// Final y coordinate.
    pub y: f64,

    /// Function value at the final point.
    pub value: f64,

    /// Number of outer iterations performed.
    pub iterations: usize,

    /// Whether both coordinate displacements and the value displacement
    /// fell below the tolerance.
    pub converged: bool,

    /// One entry per outer iteration, including the starting point.
    pub history: Vec<IterationPoint>,
}

/// Coordinate descent over a rectangular domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateDescent {
    /// Iteration budget of each inner golden-section pass.
    pub inner_iterations: usize,

    /// What to do when the evaluator fails at a probe point.
    pub policy: EvalPolicy,
}

impl Default for CoordinateDescent {
    fn default() -> Self {
        Self {
            inner_iterations: 30,
            policy: EvalPolicy::Mask,
        }
    }
}

impl CoordinateDescent {
    /// Create a descent with the default inner budget and masking policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run coordinate descent from `start`.
    ///
    /// One outer iteration fixes `y` and golden-searches `x` over a window
    /// of width `max(0.1, 0.2 * domain width)` centered on the current `x`
    /// and clipped to the domain, then does the symmetric pass over `y`.
    /// The run converges when both coordinate displacements and the value
    /// displacement all fall below `epsilon`; exhausting `max_iterations`
    /// is reported via `converged = false`, not as an error.
    ///
    /// # Arguments
    ///
    /// * `f` - The objective
    /// * `domain` - The rectangular search domain
    /// * `start` - Starting point, must lie inside the domain
    /// * `epsilon` - Convergence tolerance, must be positive
    /// * `max_iterations` - Outer iteration budget
    /// * `objective` - Whether to minimize or maximize
    ///
    /// # Returns
    ///
    /// * The descent result with its full iteration history
    pub fn optimize<F: BivariateFunction>(
        &self,
        f: &F,
        domain: Rect,
        start: (f64, f64),
        epsilon: f64,
        max_iterations: usize,
        objective: Objective,
    ) -> Result<DescentResult> {
        check_epsilon(epsilon)?;

        let (mut x, mut y) = start;
        if !domain.contains(x, y) {
            return Err(NumcoreError::InvalidArgument(format!(
                "starting point ({}, {}) is outside the domain",
                x, y
            )));
        }

        let maximize = objective == Objective::Maximize;
        let sentinel = if maximize {
            -EVAL_SENTINEL
        } else {
            EVAL_SENTINEL
        };

        let half_x = (MIN_WINDOW.max(WINDOW_FRACTION * domain.x.width())) / 2.0;
        let half_y = (MIN_WINDOW.max(WINDOW_FRACTION * domain.y.width())) / 2.0;

        let mut value = eval_bivariate(f, x, y, self.policy, sentinel)?;

        let mut history = Vec::with_capacity(max_iterations + 1);
        history.push(IterationPoint {
            step: 0,
            x,
            y,
            value,
            delta: 0.0,
        });

        let mut iterations = 0;
        let mut converged = false;

        for step in 1..=max_iterations {
            // Pass over x with y fixed.
            let window = domain.x.window(x, half_x);
            let (new_x, _, _) = narrow(
                |t| eval_bivariate(f, t, y, self.policy, sentinel),
                window.a(),
                window.b(),
                epsilon,
                self.inner_iterations,
                maximize,
            )?;

            // Pass over y with the new x fixed.
            let window = domain.y.window(y, half_y);
            let (new_y, _, _) = narrow(
                |t| eval_bivariate(f, new_x, t, self.policy, sentinel),
                window.a(),
                window.b(),
                epsilon,
                self.inner_iterations,
                maximize,
            )?;

            let new_value = eval_bivariate(f, new_x, new_y, self.policy, sentinel)?;

            let dx = (new_x - x).abs();
            let dy = (new_y - y).abs();
            let dvalue = (new_value - value).abs();

            history.push(IterationPoint {
                step,
                x: new_x,
                y: new_y,
                value: new_value,
                delta: dx.max(dy),
            });

            x = new_x;
            y = new_y;
            value = new_value;
            iterations = step;

            if dx < epsilon && dy < epsilon && dvalue < epsilon {
                converged = true;
                break;
            }
        }

        debug!(
            "coordinate descent finished at ({}, {}) after {} iterations, converged = {}",
            x, y, iterations, converged
        );

        Ok(DescentResult {
            x,
            y,
            value,
            iterations,
            converged,
            history,
        })
    }
}
