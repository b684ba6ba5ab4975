//! Integration tests for least-squares polynomial fitting.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{array, Array1};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use numcore::{fit_polynomial, NumcoreError};

/// Perfectly collinear points recover their generating line with unit R^2,
/// for random slopes and intercepts from a seeded generator.
#[test]
fn test_collinear_points_recover_line() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..10 {
        let slope: f64 = rng.gen_range(-5.0..5.0);
        let intercept: f64 = rng.gen_range(-10.0..10.0);

        let x = Array1::linspace(-3.0, 3.0, 12);
        let y = x.mapv(|xi| slope * xi + intercept);

        let fit = fit_polynomial(&x, &y, 1).unwrap();

        assert_relative_eq!(fit.coefficients[0], intercept, epsilon = 1e-8);
        assert_relative_eq!(fit.coefficients[1], slope, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.sse, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-10);
    }
}

#[test]
fn test_parabola_with_noise() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let x = Array1::linspace(-4.0, 4.0, 40);
    let y = x.mapv(|xi| 0.5 * xi * xi - 2.0 * xi + 3.0 + rng.gen_range(-0.05..0.05));

    let fit = fit_polynomial(&x, &y, 2).unwrap();

    assert_relative_eq!(fit.coefficients[0], 3.0, epsilon = 0.1);
    assert_relative_eq!(fit.coefficients[1], -2.0, epsilon = 0.1);
    assert_relative_eq!(fit.coefficients[2], 0.5, epsilon = 0.1);
    assert!(fit.r_squared > 0.999);
    assert!(fit.rmse < 0.1);
}

#[test]
fn test_degenerate_and_insufficient_inputs() {
    // All x identical: the normal equations are degenerate.
    let x = array![1.5, 1.5, 1.5, 1.5];
    let y = array![1.0, 2.0, 3.0, 4.0];
    assert!(matches!(
        fit_polynomial(&x, &y, 1),
        Err(NumcoreError::DegenerateSystem(_))
    ));
    assert!(matches!(
        fit_polynomial(&x, &y, 2),
        Err(NumcoreError::DegenerateSystem(_))
    ));

    // Too few points for the degree.
    let x = array![1.0];
    let y = array![1.0];
    assert!(matches!(
        fit_polynomial(&x, &y, 1),
        Err(NumcoreError::InsufficientData(_))
    ));

    // Mismatched lengths.
    let x = array![1.0, 2.0, 3.0];
    let y = array![1.0, 2.0];
    assert!(matches!(
        fit_polynomial(&x, &y, 1),
        Err(NumcoreError::InvalidArgument(_))
    ));
}

/// A line fit through parabolic data explains only part of the variance.
#[test]
fn test_r_squared_reflects_model_mismatch() {
    let x = Array1::linspace(-2.0, 2.0, 21);
    let y = x.mapv(|xi| xi * xi);

    let line = fit_polynomial(&x, &y, 1).unwrap();
    let parabola = fit_polynomial(&x, &y, 2).unwrap();

    assert!(line.r_squared < 0.5);
    assert!(parabola.r_squared > 0.999999);
    assert!(parabola.sse < line.sse);
}

#[test]
fn test_prediction_matches_data() {
    let x = array![0.0, 1.0, 2.0, 3.0];
    let y = array![1.0, 3.0, 5.0, 7.0]; // y = 2x + 1

    let fit = fit_polynomial(&x, &y, 1).unwrap();

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        assert_relative_eq!(fit.predict(xi), yi, epsilon = 1e-9);
    }
}
