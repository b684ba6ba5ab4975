//! Dense linear-system solvers.
//!
//! Three interchangeable solvers for square systems `Ax = b`: Gaussian
//! elimination with back substitution, Gauss-Jordan reduction, and Cramer's
//! rule over pivoted determinants. Every solver copies the system into a
//! private augmented matrix; the caller's `A` and `b` are never mutated.
//! All three assume a unique solution exists and perform no iterative
//! refinement or condition-number reporting.

pub mod cramer;
pub mod elimination;

pub use cramer::{cramer, determinant};
pub use elimination::{gauss_jordan, gaussian_elimination};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{NumcoreError, Result};

/// Pivot/determinant magnitude below which a system is treated as singular.
pub(crate) const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Solver selector for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    /// Gaussian elimination with back substitution.
    Gaussian,

    /// Gauss-Jordan reduction to the identity.
    GaussJordan,

    /// Cramer's rule via pivoted determinants.
    Cramer,
}

/// Solve `Ax = b` with the chosen method.
///
/// # Arguments
///
/// * `a` - The coefficient matrix, n x n
/// * `b` - The right-hand side, length n
/// * `method` - The solver to run
///
/// # Returns
///
/// * The solution vector, or `SingularMatrix` when the system has no unique
///   solution
pub fn solve(a: &Array2<f64>, b: &Array1<f64>, method: SolveMethod) -> Result<Array1<f64>> {
    match method {
        SolveMethod::Gaussian => gaussian_elimination(a, b),
        SolveMethod::GaussJordan => gauss_jordan(a, b),
        SolveMethod::Cramer => cramer(a, b),
    }
}

/// Validate that `a` is square, non-empty, and agrees with `b` in size.
pub(crate) fn check_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<usize> {
    let n = a.nrows();

    if n == 0 {
        return Err(NumcoreError::InvalidArgument(
            "system must have at least one equation".to_string(),
        ));
    }

    if a.ncols() != n {
        return Err(NumcoreError::InvalidArgument(format!(
            "coefficient matrix must be square, got {}x{}",
            n,
            a.ncols()
        )));
    }

    if b.len() != n {
        return Err(NumcoreError::InvalidArgument(format!(
            "Expected right-hand side of length {}, got {}",
            n,
            b.len()
        )));
    }

    Ok(n)
}

/// Build the augmented matrix `[A | b]` as a private working copy.
pub(crate) fn augmented(a: &Array2<f64>, b: &Array1<f64>, n: usize) -> Array2<f64> {
    let mut aug = Array2::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }
    aug
}

/// Find the row with the largest-magnitude entry in `column`, at or below
/// `start`.
pub(crate) fn pivot_row(aug: &Array2<f64>, column: usize, start: usize, n: usize) -> usize {
    let mut max_idx = start;
    let mut max_val = aug[[start, column]].abs();
    for i in start + 1..n {
        if aug[[i, column]].abs() > max_val {
            max_idx = i;
            max_val = aug[[i, column]].abs();
        }
    }
    max_idx
}

/// Swap two rows of an augmented matrix in place.
pub(crate) fn swap_rows(aug: &mut Array2<f64>, r1: usize, r2: usize) {
    if r1 == r2 {
        return;
    }
    let cols = aug.ncols();
    for k in 0..cols {
        aug.swap([r1, k], [r2, k]);
    }
}
