use thiserror::Error;

use crate::tensor::Shape;

/// Result type alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, LinalgError>;

/// Errors raised by tensor construction, indexing and linear algebra.
///
/// Every error is raised at the point of detection; nothing is retried and no
/// partial result is ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Input is not a valid 1-D/2-D layout for the requested construction or
    /// operation (ragged rows, non-square input, matrix where a vector is required).
    #[error("Shape error: {0}")]
    Shape(String),

    /// Operand sizes are incompatible for a product or elementwise operation.
    #[error("Dimension mismatch in '{op}': {lhs} vs {rhs}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    #[error("Index {index} out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Slice descriptor that cannot address anything (zero step, start past stop).
    #[error("Invalid slice {start}..{stop} step {step}")]
    InvalidSlice {
        start: usize,
        stop: usize,
        step: usize,
    },

    /// Input mixes scalar elements with nested sequences.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Matrix is singular: zero pivot at diagonal position {pivot}")]
    SingularMatrix { pivot: usize },

    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: &'static str, reason: String },

    #[error("Iteration did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },
}

impl LinalgError {
    pub fn shape(reason: impl Into<String>) -> Self {
        LinalgError::Shape(reason.into())
    }

    pub fn dimension_mismatch(op: &'static str, lhs: Shape, rhs: Shape) -> Self {
        LinalgError::DimensionMismatch { op, lhs, rhs }
    }

    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        LinalgError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
