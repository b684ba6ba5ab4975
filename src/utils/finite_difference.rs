//! Finite difference methods for numerical differentiation.
//!
//! This module provides central-difference approximations of the first and
//! second derivative of a scalar function, used by the Newton minimizer.
//! There is no symbolic differentiation anywhere in the crate.

use crate::error::Result;

/// Default step size for central differences.
const DEFAULT_STEP: f64 = 1e-5;

/// Step size for central differences at `x`, shrunk near zero.
///
/// The default step is `1e-5`; when `|x|` falls below it, the step is scaled
/// down to `0.1 * |x| + 1e-10` so the probe points stay proportionate to the
/// magnitude of `x`.
pub fn step_size(x: f64) -> f64 {
    let h = DEFAULT_STEP;
    if x.abs() < h {
        0.1 * x.abs() + 1e-10
    } else {
        h
    }
}

/// Compute the first derivative of `f` at `x` using central differences.
///
/// # Arguments
///
/// * `f` - The function to differentiate
/// * `x` - The point at which to differentiate
///
/// # Returns
///
/// * The central-difference approximation `(f(x+h) - f(x-h)) / 2h`
pub fn first_derivative<F>(f: F, x: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let h = step_size(x);
    Ok((f(x + h)? - f(x - h)?) / (2.0 * h))
}

/// Compute the second derivative of `f` at `x` using central differences.
///
/// # Arguments
///
/// * `f` - The function to differentiate
/// * `x` - The point at which to differentiate
///
/// # Returns
///
/// * The central-difference approximation `(f(x+h) - 2f(x) + f(x-h)) / h^2`
pub fn second_derivative<F>(f: F, x: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let h = step_size(x);
    Ok((f(x + h)? - 2.0 * f(x)? + f(x - h)?) / (h * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_derivative_quadratic() {
        let f = |x: f64| Ok(x * x);

        assert_relative_eq!(first_derivative(f, 3.0).unwrap(), 6.0, epsilon = 1e-6);
        assert_relative_eq!(first_derivative(f, -1.5).unwrap(), -3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_second_derivative_quadratic() {
        let f = |x: f64| Ok(x * x);

        assert_relative_eq!(second_derivative(f, 3.0).unwrap(), 2.0, epsilon = 1e-3);
        assert_relative_eq!(second_derivative(f, 0.5).unwrap(), 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_first_derivative_sine() {
        let f = |x: f64| Ok(x.sin());

        assert_relative_eq!(first_derivative(f, 0.0).unwrap(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(
            first_derivative(f, std::f64::consts::FRAC_PI_2).unwrap(),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_step_shrinks_near_zero() {
        assert!(step_size(0.0) < step_size(1.0));
        assert_relative_eq!(step_size(0.0), 1e-10);
        assert_relative_eq!(step_size(1e-6), 0.1 * 1e-6 + 1e-10);
    }
}
