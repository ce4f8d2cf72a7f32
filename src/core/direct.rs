//! Dense complex LU decomposition
//!
//! LU factorization with partial pivoting for the global TMM system. The
//! systems are small (a few dozen unknowns) and dense, so a direct solve is
//! both the fastest and the most robust option.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use thiserror::Error;

/// Pivot magnitude below which the matrix is treated as singular
const SINGULAR_THRESHOLD: f64 = 1.0e-30;

/// Errors that can occur during LU factorization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LuError {
    /// The matrix is singular or nearly singular
    #[error("matrix is singular or nearly singular")]
    SingularMatrix,
    /// Matrix/vector dimensions are inconsistent
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },
}

/// LU factorization of a square complex matrix
///
/// L is unit lower triangular and stored below the diagonal of `lu`;
/// U occupies the diagonal and above.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    lu: Array2<Complex64>,
    pivots: Vec<usize>,
    n: usize,
}

impl LuFactorization {
    /// Solve Ax = b using the precomputed factors
    pub fn solve(&self, b: &Array1<Complex64>) -> Result<Array1<Complex64>, LuError> {
        if b.len() != self.n {
            return Err(LuError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }

        let mut x = b.clone();

        // Apply the row permutation
        for (i, &pivot) in self.pivots.iter().enumerate() {
            if pivot != i {
                x.swap(i, pivot);
            }
        }

        // Forward substitution: Ly = Pb
        for i in 1..self.n {
            let mut acc = x[i];
            for j in 0..i {
                acc -= self.lu[[i, j]] * x[j];
            }
            x[i] = acc;
        }

        // Backward substitution: Ux = y
        for i in (0..self.n).rev() {
            let mut acc = x[i];
            for j in (i + 1)..self.n {
                acc -= self.lu[[i, j]] * x[j];
            }
            let u_ii = self.lu[[i, i]];
            if u_ii.norm() < SINGULAR_THRESHOLD {
                return Err(LuError::SingularMatrix);
            }
            x[i] = acc / u_ii;
        }

        Ok(x)
    }
}

/// Compute the LU factorization of `a` with partial pivoting
pub fn lu_factorize(a: &Array2<Complex64>) -> Result<LuFactorization, LuError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Select the largest remaining pivot in column k
        let mut max_val = lu[[k, k]].norm();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = lu[[i, k]].norm();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < SINGULAR_THRESHOLD {
            return Err(LuError::SingularMatrix);
        }

        if max_row != k {
            for j in 0..n {
                lu.swap([k, j], [max_row, j]);
            }
            pivots.swap(k, max_row);
        }

        let pivot = lu[[k, k]];
        for i in (k + 1)..n {
            let mult = lu[[i, k]] / pivot;
            lu[[i, k]] = mult;
            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, pivots, n })
}

/// Solve Ax = b by LU decomposition (factorize + solve in one call)
pub fn lu_solve(a: &Array2<Complex64>, b: &Array1<Complex64>) -> Result<Array1<Complex64>, LuError> {
    lu_factorize(a)?.solve(b)
}
