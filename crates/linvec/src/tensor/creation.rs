use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Tensor, Vector};

/// `n × n` identity matrix. `n` must be positive.
pub fn identity(n: usize) -> Result<Tensor> {
    Matrix::from_shape_fn((n, n), |r, c| if r == c { 1.0 } else { 0.0 }).map(Tensor::Matrix)
}

pub fn zeros_vector(n: usize) -> Tensor {
    Tensor::Vector(Vector::zeros(n))
}

pub fn zeros_matrix(rows: usize, cols: usize) -> Result<Tensor> {
    filled_matrix(rows, cols, 0.0)
}

pub fn ones_vector(n: usize) -> Tensor {
    Tensor::Vector(Vector::ones(n))
}

pub fn ones_matrix(rows: usize, cols: usize) -> Result<Tensor> {
    filled_matrix(rows, cols, 1.0)
}

fn filled_matrix(rows: usize, cols: usize, value: f64) -> Result<Tensor> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        LinalgError::shape(format!("matrix shape ({}, {}) overflows usize", rows, cols))
    })?;
    Matrix::from_shape_vec((rows, cols), vec![value; len]).map(Tensor::Matrix)
}
