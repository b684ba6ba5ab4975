//! Cramer's rule and the pivoted determinant behind it.

use ndarray::{Array1, Array2};

use crate::error::{NumcoreError, Result};
use crate::solve::{check_system, pivot_row, swap_rows, SINGULARITY_TOLERANCE};

/// Compute the determinant of a square matrix by Gaussian elimination with
/// partial pivoting, tracking the sign flips from row swaps.
///
/// Returns exactly `0.0` as soon as a pivot magnitude falls below the
/// singularity tolerance.
///
/// # Arguments
///
/// * `a` - The matrix; not mutated
///
/// # Returns
///
/// * The determinant, or `InvalidArgument` for a non-square matrix
pub fn determinant(a: &Array2<f64>) -> Result<f64> {
    let n = a.nrows();
    if n == 0 || a.ncols() != n {
        return Err(NumcoreError::InvalidArgument(format!(
            "determinant requires a non-empty square matrix, got {}x{}",
            n,
            a.ncols()
        )));
    }

    let mut m = a.clone();
    let mut sign = 1.0;

    for i in 0..n {
        let max_idx = pivot_row(&m, i, i, n);
        if m[[max_idx, i]].abs() < SINGULARITY_TOLERANCE {
            return Ok(0.0);
        }

        if max_idx != i {
            swap_rows(&mut m, i, max_idx);
            sign = -sign;
        }

        for j in i + 1..n {
            let factor = m[[j, i]] / m[[i, i]];
            for k in i..n {
                m[[j, k]] -= factor * m[[i, k]];
            }
        }
    }

    let mut det = sign;
    for i in 0..n {
        det *= m[[i, i]];
    }

    Ok(det)
}

/// Solve `Ax = b` by Cramer's rule.
///
/// The main determinant and each column-replaced determinant are computed
/// by pivoted elimination. Fails with `SingularMatrix` when the main
/// determinant magnitude falls below the singularity tolerance; a singular
/// system never yields a numeric result.
///
/// # Arguments
///
/// * `a` - The coefficient matrix, n x n; not mutated
/// * `b` - The right-hand side, length n; not mutated
///
/// # Returns
///
/// * The solution vector, or `SingularMatrix`
pub fn cramer(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = check_system(a, b)?;

    let det = determinant(a)?;
    if det.abs() < SINGULARITY_TOLERANCE {
        return Err(NumcoreError::SingularMatrix);
    }

    let mut x = Array1::zeros(n);
    for j in 0..n {
        // Replace column j with the right-hand side.
        let mut replaced = a.clone();
        for i in 0..n {
            replaced[[i, j]] = b[i];
        }
        x[j] = determinant(&replaced)? / det;
    }

    Ok(x)
}
