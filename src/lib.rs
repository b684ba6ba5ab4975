//! # numcore
//!
//! `numcore` is a Rust implementation of the classic numerical-analysis
//! routines behind a family of teaching tools: 1-D unimodal minimum search,
//! 2-D coordinate descent, definite-integral quadrature, linear
//! least-squares curve fitting, and dense linear-system solvers.
//!
//! The library provides:
//! - Three interchangeable 1-D minimizers (bisection, golden section,
//!   damped Newton with golden-section fallback)
//! - Coordinate descent for bivariate functions, built on golden section
//! - Five quadrature rules with fixed and automatically refined step
//! - Degree-1 and degree-2 least-squares fits with goodness-of-fit metrics
//! - Gaussian elimination, Gauss-Jordan elimination, and Cramer's rule
//! - A formula evaluator compiling user-entered expressions once into an AST
//!
//! All methods are local, synchronous, and bounded by explicit iteration
//! caps. Derivatives are numerical; there is no symbolic differentiation.
//!
//! ## Basic Usage
//!
//! ```
//! use numcore::{Formula, GoldenSectionMinimizer, Interval};
//!
//! let f = Formula::scalar("pow(x - 1, 2)").unwrap();
//! let interval = Interval::new(-4.0, 4.0).unwrap();
//!
//! let result = GoldenSectionMinimizer::new()
//!     .find_minimum(&f, interval, 1e-6)
//!     .unwrap();
//!
//! assert!((result.x - 1.0).abs() < 1e-5);
//! ```

// Public modules
pub mod error;

pub mod domain;
pub mod evaluate;
pub mod fit;
pub mod integrate;
pub mod minimize;
pub mod solve;

mod utils;

// Re-exports for convenience
pub use error::{NumcoreError, Result};

pub use domain::{Interval, Rect};

pub use evaluate::{
    BivariateFunction, EvalPolicy, Expression, ExpressionError, Formula, ScalarFunction,
    EVAL_SENTINEL,
};

pub use minimize::{
    check_unimodality, BisectionMinimizer, CoordinateDescent, DescentResult,
    GoldenSectionMinimizer, IterationPoint, NewtonMinimizer, Objective, SearchResult,
};

pub use integrate::{IntegrationResult, Integrator, QuadratureMethod};

pub use fit::{fit_polynomial, PolynomialFit};

pub use solve::{cramer, determinant, gauss_jordan, gaussian_elimination, solve, SolveMethod};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
