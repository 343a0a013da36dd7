//! Linear-system utilities built on LU decomposition with partial pivoting.
//!
//! The plain functions use [`LinalgConfig::default`]; the `*_with` variants
//! take explicit tolerances.
pub mod lu;
pub mod rotation;

use crate::config::LinalgConfig;
use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Tensor};

pub use lu::{lu_decompose, LuDecomposition};
pub use rotation::{orientation_flipped, polar_unitary, rotation_matrix, skew_symmetric};

use lu::{factor, require_square};

/// Determinant of a square matrix.
pub fn det(m: &Tensor) -> Result<f64> {
    det_with(m, &LinalgConfig::default())
}

/// Determinant as the signed product of `U`'s diagonal. Magnitudes below
/// `config.det_zero_threshold` are reported as exactly `0.0`.
pub fn det_with(m: &Tensor, config: &LinalgConfig) -> Result<f64> {
    let matrix = require_square("det", m)?;
    let raw = factor(matrix).determinant();
    if raw.abs() < config.det_zero_threshold {
        return Ok(0.0);
    }
    Ok(raw)
}

/// Inverse of a square matrix.
pub fn inv(m: &Tensor) -> Result<Tensor> {
    inv_with(m, &LinalgConfig::default())
}

/// Inverse via `m @ X = I`, solved one column at a time.
///
/// # Errors
///
/// * `Shape` unless `m` is a square matrix.
/// * `SingularMatrix` when a pivot of `U` is zero (magnitude at or below
///   `config.singular_tolerance` times the largest element magnitude of `m`).
pub fn inv_with(m: &Tensor, config: &LinalgConfig) -> Result<Tensor> {
    let matrix = require_square("inv", m)?;
    let lu = factor(matrix);
    lu.check_nonsingular(config.singular_tolerance)?;

    let n = lu.size();
    let mut data = vec![0.0; n * n];
    let mut e = vec![0.0; n];
    for j in 0..n {
        e[j] = 1.0;
        let column = lu.substitute(&e);
        e[j] = 0.0;
        for (i, value) in column.into_iter().enumerate() {
            data[i * n + j] = value;
        }
    }
    Ok(Tensor::Matrix(Matrix::from_row_major(n, n, data)))
}

/// Solve `a @ x = b` for a vector or matrix right-hand side.
pub fn solve(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    solve_with(a, b, &LinalgConfig::default())
}

pub fn solve_with(a: &Tensor, b: &Tensor, config: &LinalgConfig) -> Result<Tensor> {
    let matrix = require_square("solve", a)?;
    let n = matrix.nrows();
    if b.len() != n {
        return Err(LinalgError::dimension_mismatch("solve", a.shape(), b.shape()));
    }
    let lu = factor(matrix);
    lu.check_nonsingular(config.singular_tolerance)?;

    match b {
        Tensor::Vector(v) => Ok(Tensor::vector(v.with_slice(|b| lu.substitute(b)))),
        Tensor::Matrix(rhs) => {
            let k = rhs.ncols();
            let mut data = vec![0.0; n * k];
            for j in 0..k {
                let column = lu.substitute(&rhs.column(j)?.to_vec());
                for (i, value) in column.into_iter().enumerate() {
                    data[i * k + j] = value;
                }
            }
            Ok(Tensor::Matrix(Matrix::from_row_major(n, k, data)))
        }
    }
}

/// Transpose into fresh storage. A vector is returned unchanged.
pub fn transpose(m: &Tensor) -> Tensor {
    match m {
        Tensor::Vector(v) => Tensor::Vector(v.clone()),
        Tensor::Matrix(matrix) => Tensor::Matrix(matrix.transpose()),
    }
}

impl Tensor {
    pub fn transpose(&self) -> Tensor {
        transpose(self)
    }

    pub fn det(&self) -> Result<f64> {
        det(self)
    }

    pub fn inv(&self) -> Result<Tensor> {
        inv(self)
    }
}
