//! Element, row, slice and block access for [`Tensor`].
//!
//! Indices are resolved into explicit position lists before any storage is
//! touched, so every out-of-range position is reported and nothing is
//! partially written.

use std::ops::Range;

use crate::error::{LinalgError, Result};
use crate::tensor::{Matrix, Shape, Tensor, Vector};

/// `start..stop` visiting every `step`-th position.
///
/// Positions are never clamped: each visited position must lie inside the
/// indexed axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl SliceSpec {
    pub fn new(start: usize, stop: usize, step: usize) -> Self {
        Self { start, stop, step }
    }

    pub fn range(start: usize, stop: usize) -> Self {
        Self::new(start, stop, 1)
    }

    /// Resolve the positions this slice visits on an axis of length `len`.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        if self.step == 0 || self.start > self.stop {
            return Err(LinalgError::InvalidSlice {
                start: self.start,
                stop: self.stop,
                step: self.step,
            });
        }
        if self.start == self.stop {
            return Ok(Vec::new());
        }
        // Bounds are checked on the arithmetic progression before anything is
        // allocated.
        let last = self.start + ((self.stop - self.start - 1) / self.step) * self.step;
        if last >= len {
            let index = if self.start >= len {
                self.start
            } else {
                self.start + (len - self.start).div_ceil(self.step) * self.step
            };
            return Err(LinalgError::IndexOutOfBounds { index, len });
        }
        Ok((self.start..self.stop).step_by(self.step).collect())
    }
}

impl From<Range<usize>> for SliceSpec {
    fn from(range: Range<usize>) -> Self {
        SliceSpec::range(range.start, range.end)
    }
}

/// Selection along one axis of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIndex {
    At(usize),
    Slice(SliceSpec),
}

impl AxisIndex {
    fn positions(&self, len: usize) -> Result<Vec<usize>> {
        match *self {
            AxisIndex::At(index) if index < len => Ok(vec![index]),
            AxisIndex::At(index) => Err(LinalgError::IndexOutOfBounds { index, len }),
            AxisIndex::Slice(spec) => spec.positions(len),
        }
    }
}

impl From<usize> for AxisIndex {
    fn from(index: usize) -> Self {
        AxisIndex::At(index)
    }
}

impl From<SliceSpec> for AxisIndex {
    fn from(spec: SliceSpec) -> Self {
        AxisIndex::Slice(spec)
    }
}

impl From<Range<usize>> for AxisIndex {
    fn from(range: Range<usize>) -> Self {
        AxisIndex::Slice(range.into())
    }
}

/// Index accepted by [`Tensor::get`] and [`Tensor::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// Element of a vector, or a whole row of a matrix.
    At(usize),
    /// `(row, col)` element of a matrix.
    Pair(usize, usize),
    /// Elements of a vector, or rows (all columns) of a matrix.
    Slice(SliceSpec),
    /// Rows and columns of a matrix.
    Block(AxisIndex, AxisIndex),
}

impl From<usize> for Index {
    fn from(index: usize) -> Self {
        Index::At(index)
    }
}

impl From<(usize, usize)> for Index {
    fn from((row, col): (usize, usize)) -> Self {
        Index::Pair(row, col)
    }
}

impl From<SliceSpec> for Index {
    fn from(spec: SliceSpec) -> Self {
        Index::Slice(spec)
    }
}

impl From<Range<usize>> for Index {
    fn from(range: Range<usize>) -> Self {
        Index::Slice(range.into())
    }
}

/// Result of [`Tensor::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Scalar(f64),
    Tensor(Tensor),
}

impl Selection {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Selection::Scalar(v) => Some(*v),
            Selection::Tensor(_) => None,
        }
    }

    pub fn into_tensor(self) -> Option<Tensor> {
        match self {
            Selection::Tensor(t) => Some(t),
            Selection::Scalar(_) => None,
        }
    }
}

/// Right-hand side of [`Tensor::set`]. A scalar broadcasts over the whole
/// selection.
#[derive(Debug, Clone)]
pub enum Assign {
    Scalar(f64),
    Tensor(Tensor),
}

impl From<f64> for Assign {
    fn from(value: f64) -> Self {
        Assign::Scalar(value)
    }
}

impl From<Tensor> for Assign {
    fn from(value: Tensor) -> Self {
        Assign::Tensor(value)
    }
}

impl From<Vec<f64>> for Assign {
    fn from(value: Vec<f64>) -> Self {
        Assign::Tensor(Tensor::vector(value))
    }
}

/// Resolved addressing of an index against a vector.
enum VectorTarget {
    Element(usize),
    Positions(Vec<usize>),
}

/// Resolved addressing of an index against a matrix.
enum MatrixTarget {
    Element(usize, usize),
    /// Rows × columns, plus the shape the selection reads as.
    Block {
        rows: Vec<usize>,
        cols: Vec<usize>,
        shape: Shape,
    },
}

/// Shape a block selection collapses to: `None` for a single element, a
/// vector for one row or one column, otherwise a sub-matrix.
fn collapsed_shape(rows: usize, cols: usize) -> Option<Shape> {
    match (rows, cols) {
        (1, 1) => None,
        (0, _) | (_, 0) => Some(Shape::Vector(0)),
        (1, n) | (n, 1) => Some(Shape::Vector(n)),
        (r, c) => Some(Shape::Matrix(r, c)),
    }
}

fn resolve_vector(v: &Vector, index: Index) -> Result<VectorTarget> {
    let len = v.len();
    match index {
        Index::At(i) if i < len => Ok(VectorTarget::Element(i)),
        Index::At(i) => Err(LinalgError::IndexOutOfBounds { index: i, len }),
        Index::Slice(spec) => spec.positions(len).map(VectorTarget::Positions),
        Index::Pair(..) | Index::Block(..) => Err(LinalgError::shape(
            "two-axis index requires a matrix, got a vector",
        )),
    }
}

fn resolve_matrix(m: &Matrix, index: Index) -> Result<MatrixTarget> {
    let (nrows, ncols) = m.dims();
    let (rows, cols) = match index {
        Index::At(r) => {
            let rows = AxisIndex::At(r).positions(nrows)?;
            return Ok(MatrixTarget::Block {
                rows,
                cols: (0..ncols).collect(),
                shape: Shape::Vector(ncols),
            });
        }
        Index::Pair(r, c) => {
            AxisIndex::At(r).positions(nrows)?;
            AxisIndex::At(c).positions(ncols)?;
            return Ok(MatrixTarget::Element(r, c));
        }
        Index::Slice(spec) => (spec.positions(nrows)?, (0..ncols).collect::<Vec<_>>()),
        Index::Block(row_index, col_index) => {
            (row_index.positions(nrows)?, col_index.positions(ncols)?)
        }
    };
    match collapsed_shape(rows.len(), cols.len()) {
        None => Ok(MatrixTarget::Element(rows[0], cols[0])),
        Some(shape) => Ok(MatrixTarget::Block { rows, cols, shape }),
    }
}

fn block_cells(rows: &[usize], cols: &[usize]) -> Vec<(usize, usize)> {
    rows.iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .collect()
}

/// Values for every slot of a selection of shape `expected`, in row-major order.
fn assigned_values(value: Assign, expected: Shape) -> Result<Vec<f64>> {
    match value {
        Assign::Scalar(v) => Ok(vec![v; expected.numel()]),
        Assign::Tensor(t) if t.shape() == expected => Ok(t.to_vec()),
        Assign::Tensor(t) => Err(LinalgError::dimension_mismatch(
            "set",
            expected,
            t.shape(),
        )),
    }
}

fn scalar_value(value: Assign) -> Result<f64> {
    match value {
        Assign::Scalar(v) => Ok(v),
        Assign::Tensor(t) => Err(LinalgError::TypeMismatch(format!(
            "cannot assign a tensor of shape {} to a single element",
            t.shape()
        ))),
    }
}

impl Tensor {
    /// Read an element, row, slice or block.
    ///
    /// On a matrix, slice and block selections collapse: 1×1 reads as a
    /// scalar, a single row or column as a vector, anything larger as a
    /// sub-matrix. The result never aliases this tensor.
    pub fn get(&self, index: impl Into<Index>) -> Result<Selection> {
        let index = index.into();
        match self {
            Tensor::Vector(v) => match resolve_vector(v, index)? {
                VectorTarget::Element(i) => Ok(Selection::Scalar(v.at(i))),
                VectorTarget::Positions(positions) => {
                    Ok(Selection::Tensor(Tensor::Vector(v.select(&positions))))
                }
            },
            Tensor::Matrix(m) => match resolve_matrix(m, index)? {
                MatrixTarget::Element(r, c) => Ok(Selection::Scalar(m.at(r, c))),
                MatrixTarget::Block { rows, cols, shape } => {
                    let values: Vec<f64> = block_cells(&rows, &cols)
                        .into_iter()
                        .map(|(r, c)| m.at(r, c))
                        .collect();
                    let tensor = match shape {
                        Shape::Vector(_) => Tensor::vector(values),
                        Shape::Matrix(r, c) => {
                            Tensor::Matrix(Matrix::from_row_major(r, c, values))
                        }
                    };
                    Ok(Selection::Tensor(tensor))
                }
            },
        }
    }

    /// Write an element, row, slice or block.
    ///
    /// A scalar right-hand side broadcasts over the selection; a tensor must
    /// have exactly the shape [`Tensor::get`] returns for the same index.
    /// Writing through a transposed view updates the shared storage.
    pub fn set(&mut self, index: impl Into<Index>, value: impl Into<Assign>) -> Result<()> {
        let index = index.into();
        let value = value.into();
        match self {
            Tensor::Vector(v) => match resolve_vector(v, index)? {
                VectorTarget::Element(i) => {
                    let x = scalar_value(value)?;
                    v.write_positions(&[i], &[x]);
                    Ok(())
                }
                VectorTarget::Positions(positions) => {
                    let values = assigned_values(value, Shape::Vector(positions.len()))?;
                    // Materialized before the write: `value` may share this storage.
                    v.write_positions(&positions, &values);
                    Ok(())
                }
            },
            Tensor::Matrix(m) => match resolve_matrix(m, index)? {
                MatrixTarget::Element(r, c) => {
                    let x = scalar_value(value)?;
                    m.write_cells(&[(r, c)], &[x]);
                    Ok(())
                }
                MatrixTarget::Block { rows, cols, shape } => {
                    // Materialize the right-hand side first: it may be a view of `m`.
                    let values = assigned_values(value, shape)?;
                    m.write_cells(&block_cells(&rows, &cols), &values);
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_positions_honor_step() {
        let spec = SliceSpec::new(1, 8, 3);
        assert_eq!(spec.positions(10).unwrap(), vec![1, 4, 7]);
    }

    #[test]
    fn slice_positions_reject_out_of_range() {
        let err = SliceSpec::range(2, 6).positions(4).unwrap_err();
        assert_eq!(err, LinalgError::IndexOutOfBounds { index: 4, len: 4 });
    }

    #[test]
    fn huge_stop_is_rejected_without_allocating() {
        let err = SliceSpec::range(0, usize::MAX).positions(3).unwrap_err();
        assert_eq!(err, LinalgError::IndexOutOfBounds { index: 3, len: 3 });
        let err = SliceSpec::new(1, usize::MAX, 4).positions(3).unwrap_err();
        assert_eq!(err, LinalgError::IndexOutOfBounds { index: 5, len: 3 });
    }

    #[test]
    fn stepped_slice_may_stop_past_end() {
        // 0, 3 are visited; 6 is never reached
        assert_eq!(SliceSpec::new(0, 5, 3).positions(4).unwrap(), vec![0, 3]);
    }

    #[test]
    fn slice_positions_reject_zero_step() {
        assert!(matches!(
            SliceSpec::new(0, 3, 0).positions(3),
            Err(LinalgError::InvalidSlice { .. })
        ));
    }

    #[test]
    fn empty_slice_is_allowed() {
        assert!(SliceSpec::range(2, 2).positions(2).unwrap().is_empty());
    }

    #[test]
    fn collapse_rules() {
        assert_eq!(collapsed_shape(1, 1), None);
        assert_eq!(collapsed_shape(1, 4), Some(Shape::Vector(4)));
        assert_eq!(collapsed_shape(3, 1), Some(Shape::Vector(3)));
        assert_eq!(collapsed_shape(2, 3), Some(Shape::Matrix(2, 3)));
        assert_eq!(collapsed_shape(0, 3), Some(Shape::Vector(0)));
    }
}
