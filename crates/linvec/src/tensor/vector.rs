use std::cell::RefCell;
use std::fmt;
use std::iter::FromIterator;
use std::rc::Rc;

use crate::error::{LinalgError, Result};
use crate::tensor::Shape;

/// 1-D sequence of `f64` behind shared storage.
///
/// A vector has no row/column orientation, so its transposed view is a handle
/// onto the same storage: writes through either handle are visible through
/// both. `Clone` is a deep copy, like [`Matrix`](crate::Matrix)'s.
#[derive(Default)]
pub struct Vector {
    data: Rc<RefCell<Vec<f64>>>,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::new(data)
    }

    pub fn from_elem(len: usize, value: f64) -> Self {
        Vector::from_vec(vec![value; len])
    }

    pub fn zeros(len: usize) -> Self {
        Vector::from_elem(len, 0.0)
    }

    pub fn ones(len: usize) -> Self {
        Vector::from_elem(len, 1.0)
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    pub fn shape(&self) -> Shape {
        Shape::Vector(self.len())
    }

    /// A second handle onto this vector's storage.
    pub fn share(&self) -> Vector {
        Vector {
            data: Rc::clone(&self.data),
        }
    }

    pub fn shares_storage_with(&self, other: &Vector) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Run `f` over the elements without copying them.
    pub fn with_slice<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[f64]) -> R,
    {
        f(&self.data.borrow())
    }

    /// Element read; panics when out of range.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> f64 {
        self.data.borrow()[index]
    }

    /// Bounds-checked element read.
    pub fn get(&self, index: usize) -> Result<f64> {
        let data = self.data.borrow();
        data.get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                index,
                len: data.len(),
            })
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(LinalgError::IndexOutOfBounds { index, len });
        }
        self.write_positions(&[index], &[value]);
        Ok(())
    }

    /// Write `values[k]` to `positions[k]`. Positions are already validated,
    /// and `values` must not borrow this storage.
    pub(crate) fn write_positions(&mut self, positions: &[usize], values: &[f64]) {
        debug_assert_eq!(positions.len(), values.len());
        let mut data = self.data.borrow_mut();
        for (&p, &v) in positions.iter().zip(values) {
            data[p] = v;
        }
    }

    pub fn mapv<F>(&self, mut f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        self.with_slice(|data| data.iter().map(|&v| f(v)).collect())
    }

    /// Combine two equal-length vectors elementwise. Callers check lengths.
    pub(crate) fn zip_map<F>(&self, other: &Vector, mut f: F) -> Vector
    where
        F: FnMut(f64, f64) -> f64,
    {
        debug_assert_eq!(self.len(), other.len());
        self.with_slice(|lhs| {
            other.with_slice(|rhs| lhs.iter().zip(rhs).map(|(&a, &b)| f(a, b)).collect())
        })
    }

    /// Gather the elements at `indices`, which must already be in bounds.
    pub fn select(&self, indices: &[usize]) -> Vector {
        self.with_slice(|data| indices.iter().map(|&idx| data[idx]).collect())
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.borrow().clone()
    }

    pub fn sum(&self) -> f64 {
        self.with_slice(|data| data.iter().sum())
    }

    /// Inner product; `None` when the lengths differ.
    pub fn dot(&self, other: &Vector) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(self.with_slice(|lhs| other.with_slice(|rhs| dot_slices(lhs, rhs))))
    }
}

pub(crate) fn dot_slices(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

impl Clone for Vector {
    fn clone(&self) -> Self {
        Vector::from_vec(self.to_vec())
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector").field("data", &self.to_vec()).finish()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<&[f64]> for Vector {
    fn from(value: &[f64]) -> Self {
        Vector::from_vec(value.to_vec())
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.to_vec()
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        write!(f, "[")?;
        for (idx, value) in data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
