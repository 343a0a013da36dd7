//! Elementwise operators and products over [`Tensor`](crate::Tensor).
pub mod elementwise;
pub mod products;

pub use elementwise::{
    add, approx_eq, argmax, divide, elementwise_abs, equals, equals_with, negate, scale,
    subtract,
};
pub use products::{cross, dot, matmul, norm, Product};
