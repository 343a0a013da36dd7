use std::ops::Mul;

use crate::error::{LinalgError, Result};
use crate::tensor::vector::dot_slices;
use crate::tensor::{Matrix, Tensor, Vector};

/// Result of [`dot`]: a bare scalar for two vectors, a tensor otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Scalar(f64),
    Tensor(Tensor),
}

impl Product {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Product::Scalar(v) => Some(*v),
            Product::Tensor(_) => None,
        }
    }

    pub fn into_tensor(self) -> Option<Tensor> {
        match self {
            Product::Tensor(t) => Some(t),
            Product::Scalar(_) => None,
        }
    }
}

fn vector_dot(op: &'static str, a: &Vector, b: &Vector) -> Result<f64> {
    a.dot(b)
        .ok_or_else(|| LinalgError::dimension_mismatch(op, a.shape(), b.shape()))
}

fn matrix_product(op: &'static str, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (m, k) = a.dims();
    let (k2, n) = b.dims();
    if k != k2 {
        return Err(LinalgError::dimension_mismatch(op, a.shape(), b.shape()));
    }
    let lhs = a.to_row_major();
    let rhs = b.to_row_major();
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = lhs[i * k + p];
            let rhs_row = &rhs[p * n..(p + 1) * n];
            for (o, &b_pj) in out[i * n..(i + 1) * n].iter_mut().zip(rhs_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    Ok(Matrix::from_row_major(m, n, out))
}

/// `a @ v` with `v` read as a column; the result is a vector of length `rows(a)`.
fn matrix_vector(op: &'static str, a: &Matrix, v: &Vector) -> Result<Vector> {
    if a.ncols() != v.len() {
        return Err(LinalgError::dimension_mismatch(op, a.shape(), v.shape()));
    }
    v.with_slice(|column| {
        Ok((0..a.nrows())
            .map(|r| dot_slices(&a.row_values(r), column))
            .collect())
    })
}

fn vector_on_left(op: &'static str, v: &Vector, m: &Matrix) -> LinalgError {
    log::debug!(
        "{}: rejecting vector {} on the left of matrix {}; operands are never swapped",
        op,
        v.shape(),
        m.shape()
    );
    LinalgError::dimension_mismatch(op, v.shape(), m.shape())
}

/// Dot product.
///
/// * vector · vector → scalar (lengths must match)
/// * matrix · matrix → matrix product (`cols(a) == rows(b)`)
/// * matrix · vector → matrix-vector product, `b` read as a column
/// * vector · matrix → `DimensionMismatch`; the operands are never reordered
pub fn dot(a: &Tensor, b: &Tensor) -> Result<Product> {
    match (a, b) {
        (Tensor::Vector(x), Tensor::Vector(y)) => vector_dot("dot", x, y).map(Product::Scalar),
        (Tensor::Matrix(x), Tensor::Matrix(y)) => {
            matrix_product("dot", x, y).map(|m| Product::Tensor(Tensor::Matrix(m)))
        }
        (Tensor::Matrix(x), Tensor::Vector(y)) => {
            matrix_vector("dot", x, y).map(|v| Product::Tensor(Tensor::Vector(v)))
        }
        (Tensor::Vector(x), Tensor::Matrix(y)) => Err(vector_on_left("dot", x, y)),
    }
}

/// Matrix product. Same as [`dot`] except that two vectors yield a
/// one-element vector rather than a bare scalar.
pub fn matmul(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    match (a, b) {
        (Tensor::Vector(x), Tensor::Vector(y)) => {
            vector_dot("matmul", x, y).map(|s| Tensor::vector(vec![s]))
        }
        (Tensor::Matrix(x), Tensor::Matrix(y)) => matrix_product("matmul", x, y).map(Tensor::Matrix),
        (Tensor::Matrix(x), Tensor::Vector(y)) => matrix_vector("matmul", x, y).map(Tensor::Vector),
        (Tensor::Vector(x), Tensor::Matrix(y)) => Err(vector_on_left("matmul", x, y)),
    }
}

/// Cross product of two 3-vectors.
pub fn cross(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    let (x, y) = match (a, b) {
        (Tensor::Vector(x), Tensor::Vector(y)) => (x, y),
        _ => {
            return Err(LinalgError::shape(format!(
                "cross product is defined for vectors only, got {} and {}",
                a.shape(),
                b.shape()
            )))
        }
    };
    if x.len() != 3 || y.len() != 3 {
        return Err(LinalgError::dimension_mismatch("cross", x.shape(), y.shape()));
    }
    let (x, y) = (x.to_vec(), y.to_vec());
    Ok(Tensor::vector(vec![
        x[1] * y[2] - x[2] * y[1],
        x[2] * y[0] - x[0] * y[2],
        x[0] * y[1] - x[1] * y[0],
    ]))
}

/// Frobenius norm: square root of the sum of squares of every element.
pub fn norm(a: &Tensor) -> f64 {
    a.to_vec().iter().map(|v| v * v).sum::<f64>().sqrt()
}

impl<'a, 'b> Mul<&'b Tensor> for &'a Tensor {
    type Output = Result<Tensor>;

    /// Matrix multiplication, see [`matmul`].
    fn mul(self, rhs: &'b Tensor) -> Self::Output {
        matmul(self, rhs)
    }
}

impl Tensor {
    pub fn dot(&self, other: &Tensor) -> Result<Product> {
        dot(self, other)
    }

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor> {
        matmul(self, other)
    }

    pub fn norm(&self) -> f64 {
        norm(self)
    }
}
