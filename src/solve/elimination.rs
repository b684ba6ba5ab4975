//! Gaussian and Gauss-Jordan elimination.

use ndarray::{Array1, Array2};

use crate::error::{NumcoreError, Result};
use crate::solve::{augmented, check_system, pivot_row, swap_rows, SINGULARITY_TOLERANCE};

/// Solve `Ax = b` by Gaussian elimination with partial pivoting and back
/// substitution.
///
/// # Arguments
///
/// * `a` - The coefficient matrix, n x n; not mutated
/// * `b` - The right-hand side, length n; not mutated
///
/// # Returns
///
/// * The solution vector, or `SingularMatrix` if a pivot vanishes
pub fn gaussian_elimination(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = check_system(a, b)?;
    let mut aug = augmented(a, b, n);

    // Forward elimination.
    for i in 0..n {
        let max_idx = pivot_row(&aug, i, i, n);
        if aug[[max_idx, i]].abs() < SINGULARITY_TOLERANCE {
            return Err(NumcoreError::SingularMatrix);
        }
        swap_rows(&mut aug, i, max_idx);

        for j in i + 1..n {
            let factor = aug[[j, i]] / aug[[i, i]];
            for k in i..=n {
                aug[[j, k]] -= factor * aug[[i, k]];
            }
        }
    }

    // Back substitution.
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in i + 1..n {
            sum += aug[[i, j]] * x[j];
        }
        x[i] = (aug[[i, n]] - sum) / aug[[i, i]];
    }

    Ok(x)
}

/// Solve `Ax = b` by Gauss-Jordan elimination.
///
/// The augmented matrix is fully reduced to the identity on the left
/// (pivot rows normalized, elimination both above and below), so the
/// solution is read directly off the augmented column.
///
/// # Arguments
///
/// * `a` - The coefficient matrix, n x n; not mutated
/// * `b` - The right-hand side, length n; not mutated
///
/// # Returns
///
/// * The solution vector, or `SingularMatrix` if a pivot vanishes
pub fn gauss_jordan(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = check_system(a, b)?;
    let mut aug = augmented(a, b, n);

    for i in 0..n {
        let max_idx = pivot_row(&aug, i, i, n);
        if aug[[max_idx, i]].abs() < SINGULARITY_TOLERANCE {
            return Err(NumcoreError::SingularMatrix);
        }
        swap_rows(&mut aug, i, max_idx);

        // Normalize the pivot row.
        let pivot = aug[[i, i]];
        for k in i..=n {
            aug[[i, k]] /= pivot;
        }

        // Eliminate the column everywhere else.
        for j in 0..n {
            if j == i {
                continue;
            }
            let factor = aug[[j, i]];
            for k in i..=n {
                aug[[j, k]] -= factor * aug[[i, k]];
            }
        }
    }

    let mut x = Array1::zeros(n);
    for i in 0..n {
        x[i] = aug[[i, n]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_gaussian_known_system() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];

        let x = gaussian_elimination(&a, &b).unwrap();

        assert_relative_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_jordan_known_system() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];

        let x = gauss_jordan(&a, &b).unwrap();

        assert_relative_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        let a = array![[0.0, 2.0], [3.0, 1.0]];
        let b = array![4.0, 5.0];

        let x = gaussian_elimination(&a, &b).unwrap();

        // 2y = 4 -> y = 2; 3x + y = 5 -> x = 1.
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);

        let x = gauss_jordan(&a, &b).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_by_three() {
        let a = array![[1.0, 2.0, -1.0], [2.0, 1.0, 1.0], [-1.0, 1.0, 2.0]];
        let b = array![2.0, 7.0, 3.0];

        // Known solution x = (2, 1, 2).
        for solver in [gaussian_elimination, gauss_jordan] {
            let x = solver(&a, &b).unwrap();
            assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
            assert_relative_eq!(x[1], 1.0, epsilon = 1e-10);
            assert_relative_eq!(x[2], 2.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_singular_rejected() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];

        assert!(matches!(
            gaussian_elimination(&a, &b),
            Err(NumcoreError::SingularMatrix)
        ));
        assert!(matches!(
            gauss_jordan(&a, &b),
            Err(NumcoreError::SingularMatrix)
        ));
    }
}
