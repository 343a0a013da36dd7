use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Tensor};

/// LU decomposition with partial pivoting: `P @ A = L @ U`.
///
/// `L` is unit lower-triangular, `U` upper-triangular and `P` the row
/// permutation accumulated while pivoting.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    n: usize,
    /// Row-major `n × n`.
    l: Vec<f64>,
    /// Row-major `n × n`.
    u: Vec<f64>,
    /// Row `i` of `P @ A` is row `permutation[i]` of `A`.
    permutation: Vec<usize>,
    swaps: usize,
    /// Largest element magnitude of the factored matrix.
    scale: f64,
}

impl LuDecomposition {
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn l(&self) -> Tensor {
        Tensor::Matrix(Matrix::from_row_major(self.n, self.n, self.l.clone()))
    }

    pub fn u(&self) -> Tensor {
        Tensor::Matrix(Matrix::from_row_major(self.n, self.n, self.u.clone()))
    }

    /// Permutation matrix `P`.
    pub fn p(&self) -> Tensor {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for (row, &src) in self.permutation.iter().enumerate() {
            data[row * n + src] = 1.0;
        }
        Tensor::Matrix(Matrix::from_row_major(n, n, data))
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Number of row interchanges performed while pivoting.
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    pub fn u_diagonal(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.u[i * self.n + i]).collect()
    }

    /// `(-1)^swaps · Π diag(U)`, without any noise suppression.
    pub fn determinant(&self) -> f64 {
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.u_diagonal().iter().product::<f64>()
    }

    /// Fail with `SingularMatrix` on the first `U` pivot whose magnitude is at
    /// or below `tolerance · max|a_ij|`.
    pub(crate) fn check_nonsingular(&self, tolerance: f64) -> Result<()> {
        let threshold = tolerance * self.scale;
        match self
            .u_diagonal()
            .iter()
            .position(|d| d.abs() <= threshold)
        {
            Some(pivot) => {
                log::debug!("zero pivot in U at position {} (threshold {:e})", pivot, threshold);
                Err(LinalgError::SingularMatrix { pivot })
            }
            None => Ok(()),
        }
    }

    /// Solve `A x = b` for one right-hand side: forward substitution
    /// `L y = P b`, then backward substitution `U x = y`.
    ///
    /// Callers run [`check_nonsingular`](Self::check_nonsingular) first.
    pub(crate) fn substitute(&self, b: &[f64]) -> Vec<f64> {
        let n = self.n;
        debug_assert_eq!(b.len(), n);

        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut acc = b[self.permutation[i]];
            for k in 0..i {
                acc -= self.l[i * n + k] * y[k];
            }
            y[i] = acc;
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut acc = y[i];
            for k in (i + 1)..n {
                acc -= self.u[i * n + k] * x[k];
            }
            x[i] = acc / self.u[i * n + i];
        }
        x
    }
}

pub(crate) fn require_square<'a>(op: &str, m: &'a Tensor) -> Result<&'a Matrix> {
    match m {
        Tensor::Matrix(matrix) if matrix.is_square() => Ok(matrix),
        _ => Err(LinalgError::shape(format!(
            "{} requires a square matrix, got shape {}",
            op,
            m.shape()
        ))),
    }
}

/// LU decomposition with partial pivoting.
///
/// At each column `k` the row at or below `k` with the largest absolute value
/// becomes the pivot. A pivot that is exactly zero after pivoting leaves that
/// column's multipliers at zero; the resulting `U` is degenerate and
/// `det`/`inv` handle it.
///
/// # Errors
///
/// `Shape` unless `m` is a square matrix.
pub fn lu_decompose(m: &Tensor) -> Result<LuDecomposition> {
    let matrix = require_square("lu_decompose", m)?;
    Ok(factor(matrix))
}

pub(crate) fn factor(matrix: &Matrix) -> LuDecomposition {
    let n = matrix.nrows();
    let mut u = matrix.to_row_major();
    let scale = u.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let mut l = vec![0.0; n * n];
    let mut permutation: Vec<usize> = (0..n).collect();
    let mut swaps = 0usize;

    for k in 0..n {
        let mut pivot_row = k;
        let mut max_val = u[k * n + k].abs();
        for row in (k + 1)..n {
            let val = u[row * n + k].abs();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }

        if pivot_row != k {
            for j in 0..n {
                u.swap(k * n + j, pivot_row * n + j);
            }
            // Only the multipliers already recorded move with the row.
            for j in 0..k {
                l.swap(k * n + j, pivot_row * n + j);
            }
            permutation.swap(k, pivot_row);
            swaps += 1;
            log::trace!("lu: column {} pivots on row {}", k, pivot_row);
        }

        let pivot = u[k * n + k];
        if pivot == 0.0 {
            log::debug!("lu: zero pivot in column {}, matrix is singular", k);
            continue;
        }

        for row in (k + 1)..n {
            let multiplier = u[row * n + k] / pivot;
            l[row * n + k] = multiplier;
            u[row * n + k] = 0.0;
            for j in (k + 1)..n {
                u[row * n + j] -= multiplier * u[k * n + j];
            }
        }
    }

    for i in 0..n {
        l[i * n + i] = 1.0;
    }

    LuDecomposition {
        n,
        l,
        u,
        permutation,
        swaps,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn pivots_on_largest_magnitude() {
        let lu = factor(&square(vec![vec![1.0, 2.0], vec![-4.0, 1.0]]));
        assert_eq!(lu.permutation(), &[1, 0]);
        assert_eq!(lu.swaps(), 1);
        assert_eq!(lu.u_diagonal()[0], -4.0);
    }

    #[test]
    fn zero_column_records_zero_multipliers() {
        let lu = factor(&square(vec![
            vec![0.0, 1.0, 2.0],
            vec![0.0, 3.0, 4.0],
            vec![0.0, 5.0, 7.0],
        ]));
        assert_eq!(lu.u_diagonal()[0], 0.0);
        assert_eq!(lu.l[3], 0.0);
        assert_eq!(lu.l[6], 0.0);
        assert_eq!(lu.determinant(), 0.0);
    }

    #[test]
    fn singular_threshold_follows_matrix_scale() {
        let tiny = factor(&square(vec![vec![1e-13, 0.0], vec![0.0, 2e-13]]));
        tiny.check_nonsingular(1e-12).unwrap();

        let rank_deficient = factor(&square(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]));
        assert!(matches!(
            rank_deficient.check_nonsingular(1e-12),
            Err(LinalgError::SingularMatrix { pivot: 2 })
        ));

        let zero = factor(&square(vec![vec![0.0, 0.0], vec![0.0, 0.0]]));
        assert!(zero.check_nonsingular(1e-12).is_err());
    }

    #[test]
    fn substitution_solves_small_system() {
        // 2x + y = 5, x + 3y = 10  =>  x = 1, y = 3
        let lu = factor(&square(vec![vec![2.0, 1.0], vec![1.0, 3.0]]));
        lu.check_nonsingular(1e-12).unwrap();
        let x = lu.substitute(&[5.0, 10.0]);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }
}
