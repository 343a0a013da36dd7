use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::config::LinalgConfig;
use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Tensor, Vector};

fn zip_with<F>(op: &'static str, a: &Tensor, b: &Tensor, f: F) -> Result<Tensor>
where
    F: FnMut(f64, f64) -> f64,
{
    match (a, b) {
        (Tensor::Vector(x), Tensor::Vector(y)) if x.len() == y.len() => {
            Ok(Tensor::Vector(x.zip_map(y, f)))
        }
        (Tensor::Matrix(x), Tensor::Matrix(y)) if x.dims() == y.dims() => {
            Ok(Tensor::Matrix(x.zip_map(y, f)))
        }
        _ => Err(LinalgError::dimension_mismatch(op, a.shape(), b.shape())),
    }
}

/// Elementwise sum of two tensors of identical shape.
pub fn add(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    zip_with("add", a, b, |x, y| x + y)
}

/// Elementwise difference of two tensors of identical shape.
pub fn subtract(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    zip_with("subtract", a, b, |x, y| x - y)
}

pub fn scale(a: &Tensor, k: f64) -> Tensor {
    a.mapv(|x| x * k)
}

/// Elementwise division by a scalar. A zero divisor is rejected rather than
/// producing infinities.
pub fn divide(a: &Tensor, k: f64) -> Result<Tensor> {
    if k == 0.0 {
        return Err(LinalgError::DivisionByZero);
    }
    Ok(a.mapv(|x| x / k))
}

pub fn negate(a: &Tensor) -> Tensor {
    scale(a, -1.0)
}

pub fn elementwise_abs(a: &Tensor) -> Tensor {
    a.mapv(f64::abs)
}

/// Position of the largest element of a non-empty vector (first on ties).
pub fn argmax(a: &Tensor) -> Result<usize> {
    let v = match a {
        Tensor::Vector(v) => v,
        Tensor::Matrix(m) => {
            return Err(LinalgError::shape(format!(
                "argmax requires a vector, got a matrix of shape {}",
                m.shape()
            )))
        }
    };
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in v.to_vec().into_iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
        .ok_or_else(|| LinalgError::shape("argmax of an empty vector"))
}

/// Shape equality plus elementwise `|a_i - b_i| < tolerance`.
pub fn approx_eq(a: &Tensor, b: &Tensor, tolerance: f64) -> bool {
    a.shape() == b.shape() && slices_close(&a.to_vec(), &b.to_vec(), tolerance)
}

/// [`approx_eq`] with the default tolerance of `1e-6`.
pub fn equals(a: &Tensor, b: &Tensor) -> bool {
    approx_eq(a, b, LinalgConfig::DEFAULT_EQUALITY_TOLERANCE)
}

/// [`approx_eq`] with `config.equality_tolerance`.
pub fn equals_with(a: &Tensor, b: &Tensor, config: &LinalgConfig) -> bool {
    approx_eq(a, b, config.equality_tolerance)
}

fn slices_close(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < tolerance)
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Tensor) -> bool {
        equals(self, other)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Vector) -> bool {
        self.len() == other.len()
            && slices_close(
                &self.to_vec(),
                &other.to_vec(),
                LinalgConfig::DEFAULT_EQUALITY_TOLERANCE,
            )
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.dims() == other.dims()
            && slices_close(
                &self.to_row_major(),
                &other.to_row_major(),
                LinalgConfig::DEFAULT_EQUALITY_TOLERANCE,
            )
    }
}

impl<'a, 'b> Add<&'b Tensor> for &'a Tensor {
    type Output = Result<Tensor>;

    fn add(self, rhs: &'b Tensor) -> Self::Output {
        add(self, rhs)
    }
}

impl Add for Tensor {
    type Output = Result<Tensor>;

    fn add(self, rhs: Tensor) -> Self::Output {
        add(&self, &rhs)
    }
}

impl<'a, 'b> Sub<&'b Tensor> for &'a Tensor {
    type Output = Result<Tensor>;

    fn sub(self, rhs: &'b Tensor) -> Self::Output {
        subtract(self, rhs)
    }
}

impl Sub for Tensor {
    type Output = Result<Tensor>;

    fn sub(self, rhs: Tensor) -> Self::Output {
        subtract(&self, &rhs)
    }
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, k: f64) -> Self::Output {
        scale(self, k)
    }
}

impl Mul<f64> for Tensor {
    type Output = Tensor;

    fn mul(self, k: f64) -> Self::Output {
        scale(&self, k)
    }
}

impl Mul<&Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, rhs: &Tensor) -> Self::Output {
        scale(rhs, self)
    }
}

impl Mul<Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, rhs: Tensor) -> Self::Output {
        scale(&rhs, self)
    }
}

impl Div<f64> for &Tensor {
    type Output = Result<Tensor>;

    fn div(self, k: f64) -> Self::Output {
        divide(self, k)
    }
}

impl Div<f64> for Tensor {
    type Output = Result<Tensor>;

    fn div(self, k: f64) -> Self::Output {
        divide(&self, k)
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        negate(self)
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        negate(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_first_maximum() {
        let v = Tensor::vector(vec![1.0, 7.0, 3.0, 7.0]);
        assert_eq!(argmax(&v).unwrap(), 1);
    }

    #[test]
    fn argmax_rejects_empty_and_matrix() {
        assert!(matches!(argmax(&Tensor::vector(vec![])), Err(LinalgError::Shape(_))));
        let m = Tensor::matrix(vec![vec![1.0]]).unwrap();
        assert!(matches!(argmax(&m), Err(LinalgError::Shape(_))));
    }

    #[test]
    fn equality_tolerates_accumulated_error() {
        let a = Tensor::vector(vec![0.1 + 0.2, 1.0]);
        let b = Tensor::vector(vec![0.3, 1.0 + 5e-7]);
        assert_eq!(a, b);
        assert!(!approx_eq(&a, &b, 1e-9));
    }
}
