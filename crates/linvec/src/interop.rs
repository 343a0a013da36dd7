//! Conversions to and from `ndarray` (feature `ndarray`).

use ndarray::{Array1, Array2};

use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Tensor, Vector};

impl From<&Vector> for Array1<f64> {
    fn from(value: &Vector) -> Self {
        Array1::from_vec(value.to_vec())
    }
}

impl From<Array1<f64>> for Vector {
    fn from(value: Array1<f64>) -> Self {
        value.iter().copied().collect()
    }
}

impl From<&Matrix> for Array2<f64> {
    fn from(value: &Matrix) -> Self {
        let (rows, cols) = value.dims();
        let data = value.to_row_major();
        Array2::from_shape_fn((rows, cols), |(r, c)| data[r * cols + c])
    }
}

impl TryFrom<&Array2<f64>> for Matrix {
    type Error = LinalgError;

    /// Fails with `Shape` when either axis is empty.
    fn try_from(value: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = value.dim();
        Matrix::from_shape_vec((rows, cols), value.iter().copied().collect())
    }
}

impl TryFrom<&Array2<f64>> for Tensor {
    type Error = LinalgError;

    fn try_from(value: &Array2<f64>) -> Result<Self> {
        Matrix::try_from(value).map(Tensor::Matrix)
    }
}
