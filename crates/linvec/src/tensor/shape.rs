use std::fmt;

/// Logical shape of a [`Tensor`](crate::Tensor).
///
/// Displays as `(3,)` for a vector and `(2, 3)` for a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Vector(usize),
    Matrix(usize, usize),
}

impl Shape {
    /// 1 for vectors, 2 for matrices.
    pub fn dimension(&self) -> usize {
        match self {
            Shape::Vector(_) => 1,
            Shape::Matrix(..) => 2,
        }
    }

    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Shape::Vector(n) => vec![n],
            Shape::Matrix(r, c) => vec![r, c],
        }
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        match *self {
            Shape::Vector(n) => n,
            Shape::Matrix(r, c) => r * c,
        }
    }

    pub fn is_square(&self) -> bool {
        matches!(*self, Shape::Matrix(r, c) if r == c)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vector(n) => write!(f, "({},)", n),
            Shape::Matrix(r, c) => write!(f, "({}, {})", r, c),
        }
    }
}
