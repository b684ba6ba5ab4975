//! Integration tests for the quadrature engine.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use numcore::{Formula, Integrator, Interval, QuadratureMethod};

#[test]
fn test_simpson_sine_scenario() {
    let integrator = Integrator::new();
    let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();

    let result = integrator
        .fixed_partitions(&|x: f64| x.sin(), interval, QuadratureMethod::Simpson, 100)
        .unwrap();

    assert_abs_diff_eq!(result.value, 2.0, epsilon = 1e-4);
    assert_eq!(result.partitions, 100);
    assert!(result.history.is_empty());
}

/// The trapezoidal and Simpson rules are exact for linear integrands at any
/// partition count.
#[test]
fn test_linear_exactness() {
    let integrator = Integrator::new();
    let interval = Interval::new(-1.0, 3.0).unwrap();
    let exact = (9.0 - 1.0) / 2.0; // integral of x over [-1, 3]

    for n in [1, 2, 3, 10, 101] {
        let trapezoid = integrator
            .fixed_partitions(&|x: f64| x, interval, QuadratureMethod::Trapezoidal, n)
            .unwrap();
        assert_relative_eq!(trapezoid.value, exact, epsilon = 1e-12);

        let simpson = integrator
            .fixed_partitions(&|x: f64| x, interval, QuadratureMethod::Simpson, n)
            .unwrap();
        assert_relative_eq!(simpson.value, exact, epsilon = 1e-12);
    }
}

/// Simpson's rule is exact for cubics at every even partition count.
#[test]
fn test_simpson_cubic_exactness() {
    let integrator = Integrator::new();
    let interval = Interval::new(0.0, 2.0).unwrap();

    let f = |x: f64| 3.0 * x * x * x - x * x + 2.0 * x - 7.0;
    // Antiderivative: (3/4)x^4 - x^3/3 + x^2 - 7x
    let exact = 12.0 - 8.0 / 3.0 + 4.0 - 14.0;

    for n in [2, 4, 8, 50, 256] {
        let result = integrator
            .fixed_partitions(&f, interval, QuadratureMethod::Simpson, n)
            .unwrap();
        assert_relative_eq!(result.value, exact, epsilon = 1e-10);
    }
}

#[test]
fn test_all_rules_converge_on_smooth_integrand() {
    let integrator = Integrator::new();
    let interval = Interval::new(0.0, 1.0).unwrap();
    let exact = std::f64::consts::E - 1.0;

    for method in [
        QuadratureMethod::RectangleLeft,
        QuadratureMethod::RectangleRight,
        QuadratureMethod::RectangleMidpoint,
        QuadratureMethod::Trapezoidal,
        QuadratureMethod::Simpson,
    ] {
        // The one-sided rectangle rules converge O(h), so the shared
        // tolerance stays modest to keep them under the partition cap.
        let result = integrator
            .auto_refine(&|x: f64| x.exp(), interval, method, 1e-5, 4)
            .unwrap();

        assert_abs_diff_eq!(result.value, exact, epsilon = 1e-4);
        assert!(result.error_estimate < 1e-5);
    }
}

/// The auto-refinement error estimate shrinks monotonically for smooth
/// integrands.
#[test]
fn test_error_estimates_monotone_under_doubling() {
    let integrator = Integrator::new();
    let interval = Interval::new(0.0, 2.0).unwrap();

    let result = integrator
        .auto_refine(
            &|x: f64| (x * x).cos(),
            interval,
            QuadratureMethod::Trapezoidal,
            1e-10,
            2,
        )
        .unwrap();

    let diffs: Vec<f64> = result
        .history
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .collect();

    assert!(diffs.len() >= 2);
    for pair in diffs.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-14);
    }
}

#[test]
fn test_formula_integrand() {
    let integrator = Integrator::new();
    let interval = Interval::new(1.0, std::f64::consts::E).unwrap();

    let f = Formula::scalar("1 / x").unwrap();
    let result = integrator
        .auto_refine(&f, interval, QuadratureMethod::Simpson, 1e-9, 8)
        .unwrap();

    // Integral of 1/x over [1, e] is 1.
    assert_abs_diff_eq!(result.value, 1.0, epsilon = 1e-7);
}

#[test]
fn test_fixed_error_estimate_halves_step() {
    let integrator = Integrator::new();
    let interval = Interval::new(0.0, 1.0).unwrap();

    let coarse = integrator
        .fixed_partitions(&|x: f64| x.exp(), interval, QuadratureMethod::Trapezoidal, 4)
        .unwrap();
    let fine = integrator
        .fixed_partitions(&|x: f64| x.exp(), interval, QuadratureMethod::Trapezoidal, 8)
        .unwrap();

    assert_abs_diff_eq!(
        coarse.error_estimate,
        (fine.value - coarse.value).abs(),
        epsilon = 1e-15
    );
    assert!(fine.error_estimate < coarse.error_estimate);
}
