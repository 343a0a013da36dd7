//! linvec: dense 1-D vectors and 2-D matrices with LU-based linear algebra.
//!
//! The crate provides a [`Tensor`] container (a vector or a matrix, with
//! shared-storage transposed views), elementwise operators, dot/matrix/cross
//! products, and determinant, inverse and linear solves built on LU
//! decomposition with partial pivoting. Small extras cover 3-D rotations, the
//! polar decomposition and fixed-step RK4 integration.
//!
//! Everything is single-threaded and synchronous. Tensors share storage
//! through `Rc<RefCell<_>>`, so tensors are neither `Send` nor `Sync`.
//! Results leave the crate as plain `Vec<f64>` sequences, `(x, y)` pairs or
//! JSON via serde; rendering is left to callers.
//!
//! ```
//! use linvec::{det, inv, matmul, identity, Tensor};
//!
//! let m = Tensor::matrix(vec![vec![3.0, 6.0], vec![3.0, 8.0]]).unwrap();
//! assert!((det(&m).unwrap() - 6.0).abs() < 1e-12);
//! let product = matmul(&m, &inv(&m).unwrap()).unwrap();
//! assert_eq!(product, identity(2).unwrap());
//! ```
pub mod config;
pub mod error;
#[cfg(feature = "ndarray")]
pub mod interop;
pub mod linalg;
pub mod ode;
pub mod ops;
pub mod tensor;

pub use config::LinalgConfig;
pub use error::{LinalgError, Result};
pub use linalg::{
    det, det_with, inv, inv_with, lu_decompose, orientation_flipped, polar_unitary,
    rotation_matrix, skew_symmetric, solve, solve_with, transpose, LuDecomposition,
};
pub use ode::{rk4, rk4_scalar, Trajectory};
pub use ops::{
    add, approx_eq, argmax, cross, divide, dot, elementwise_abs, equals, equals_with, matmul,
    negate, norm, scale, subtract, Product,
};
pub use tensor::creation::{identity, ones_matrix, ones_vector, zeros_matrix, zeros_vector};
pub use tensor::{
    Assign, AxisIndex, Component, Index, Matrix, Selection, Shape, SliceSpec, Tensor, Vector,
};
