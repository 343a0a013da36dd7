//! The 1-D/2-D container.
//!
//! [`Tensor`] is a tagged union over [`Vector`] and [`Matrix`]; every
//! operation in the crate pattern-matches on it at its entry point.
pub mod creation;
pub mod index;
pub mod matrix;
pub mod shape;
pub mod vector;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LinalgError, Result};

pub use index::{Assign, AxisIndex, Index, Selection, SliceSpec};
pub use matrix::Matrix;
pub use shape::Shape;
pub use vector::Vector;

/// One top-level element of construction input: a number (vector input) or a
/// row (matrix input).
///
/// Serializes untagged, so `[1, 2]` and `[[1, 2], [3, 4]]` both deserialize
/// into a `Vec<Component>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Component {
    Scalar(f64),
    Row(Vec<f64>),
}

impl From<f64> for Component {
    fn from(value: f64) -> Self {
        Component::Scalar(value)
    }
}

impl From<Vec<f64>> for Component {
    fn from(value: Vec<f64>) -> Self {
        Component::Row(value)
    }
}

/// A 1-D vector or a 2-D matrix of `f64`.
///
/// Algebraic operations return new, independent tensors. The one exception is
/// [`Tensor::transpose_view`], which aliases the parent's storage.
#[derive(Debug, Clone)]
pub enum Tensor {
    Vector(Vector),
    Matrix(Matrix),
}

impl Tensor {
    /// Validate and build a tensor from top-level components.
    ///
    /// All scalars yields a vector, all rows yields a matrix, empty input
    /// yields an empty vector with shape `(0,)`.
    ///
    /// # Errors
    ///
    /// * `TypeMismatch` when scalars and rows are mixed.
    /// * `Shape` when rows differ in length or are empty.
    pub fn from_components(components: Vec<Component>) -> Result<Tensor> {
        let rows = components
            .iter()
            .filter(|c| matches!(c, Component::Row(_)))
            .count();
        if rows == 0 {
            let data = components
                .into_iter()
                .filter_map(|c| match c {
                    Component::Scalar(v) => Some(v),
                    Component::Row(_) => None,
                })
                .collect();
            return Ok(Tensor::vector(data));
        }
        if rows != components.len() {
            return Err(LinalgError::TypeMismatch(format!(
                "mix of {} scalars and {} rows; input must be all numbers or all rows",
                components.len() - rows,
                rows
            )));
        }
        let rows = components
            .into_iter()
            .filter_map(|c| match c {
                Component::Row(row) => Some(row),
                Component::Scalar(_) => None,
            })
            .collect();
        Tensor::matrix(rows)
    }

    pub fn vector(data: Vec<f64>) -> Tensor {
        Tensor::Vector(Vector::from_vec(data))
    }

    /// Build a matrix from rows. No rows at all yields an empty vector.
    pub fn matrix(rows: Vec<Vec<f64>>) -> Result<Tensor> {
        if rows.is_empty() {
            return Ok(Tensor::vector(Vec::new()));
        }
        Matrix::from_rows(rows).map(Tensor::Matrix)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Tensor::Vector(v) => v.shape(),
            Tensor::Matrix(m) => m.shape(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.shape().dimension()
    }

    /// Number of top-level elements: rows for a matrix, elements for a vector.
    pub fn len(&self) -> usize {
        match self {
            Tensor::Vector(v) => v.len(),
            Tensor::Matrix(m) => m.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Tensor::Vector(v) => Some(v),
            Tensor::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Tensor::Matrix(m) => Some(m),
            Tensor::Vector(_) => None,
        }
    }

    /// Transposed view.
    ///
    /// Both kinds share this tensor's storage, so writes through either side
    /// are visible through both. A vector has no orientation and its view is
    /// the same vector; a matrix view reads rows and columns swapped.
    pub fn transpose_view(&self) -> Tensor {
        match self {
            Tensor::Vector(v) => Tensor::Vector(v.share()),
            Tensor::Matrix(m) => Tensor::Matrix(m.transpose_view()),
        }
    }

    /// Deep copy, fully independent of any transposed-view relationship.
    pub fn copy(&self) -> Tensor {
        self.clone()
    }

    /// All elements, flattened in logical row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Tensor::Vector(v) => v.to_vec(),
            Tensor::Matrix(m) => m.to_row_major(),
        }
    }

    /// Rows in logical order; a vector is a single row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        match self {
            Tensor::Vector(v) => vec![v.to_vec()],
            Tensor::Matrix(m) => m.to_rows(),
        }
    }

    pub fn to_components(&self) -> Vec<Component> {
        match self {
            Tensor::Vector(v) => v.to_vec().into_iter().map(Component::Scalar).collect(),
            Tensor::Matrix(m) => m.to_rows().into_iter().map(Component::Row).collect(),
        }
    }

    pub fn mapv<F>(&self, f: F) -> Tensor
    where
        F: FnMut(f64) -> f64,
    {
        match self {
            Tensor::Vector(v) => Tensor::Vector(v.mapv(f)),
            Tensor::Matrix(m) => Tensor::Matrix(m.mapv(f)),
        }
    }
}

impl From<Vector> for Tensor {
    fn from(value: Vector) -> Self {
        Tensor::Vector(value)
    }
}

impl From<Matrix> for Tensor {
    fn from(value: Matrix) -> Self {
        Tensor::Matrix(value)
    }
}

impl From<Vec<f64>> for Tensor {
    fn from(value: Vec<f64>) -> Self {
        Tensor::vector(value)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Tensor {
    type Error = LinalgError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self> {
        Tensor::matrix(value)
    }
}

impl TryFrom<Vec<Component>> for Tensor {
    type Error = LinalgError;

    fn try_from(value: Vec<Component>) -> Result<Self> {
        Tensor::from_components(value)
    }
}

impl Serialize for Tensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_components().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tensor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let components = Vec::<Component>::deserialize(deserializer)?;
        Tensor::from_components(components).map_err(D::Error::custom)
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tensor::Vector(v) => write!(f, "vector({})", v),
            Tensor::Matrix(m) => write!(f, "vector({})", m),
        }
    }
}
