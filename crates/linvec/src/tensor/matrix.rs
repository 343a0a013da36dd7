//! 2-D matrix with explicit transposed-view aliasing.
//!
//! Storage is a row-major [`Grid`] behind `Rc<RefCell<_>>`. A matrix either
//! owns the grid in its natural orientation ([`Storage::Owned`]) or is a
//! [`Storage::View`] onto a grid that reads and writes at swapped
//! `(row, col)` coordinates. Both sides of a view relationship hold the same
//! `Rc`, so a write through one is visible through the other.
//!
//! `Matrix` is `!Send` and `!Sync`. Sharing a matrix and its transposed view
//! across threads would require external synchronization.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{LinalgError, Result};
use crate::tensor::{Shape, Vector};

#[derive(Clone, Debug)]
pub(crate) struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }
}

type SharedGrid = Rc<RefCell<Grid>>;

#[derive(Debug)]
struct TransposedView {
    source: SharedGrid,
}

#[derive(Debug)]
enum Storage {
    Owned(SharedGrid),
    View(TransposedView),
}

/// Dense `f64` matrix, either owning its grid or viewing another matrix's
/// grid with rows and columns swapped.
///
/// `Clone` is a deep copy: the clone never aliases the original, even when the
/// original is a view. Use [`Matrix::transpose_view`] to alias on purpose.
pub struct Matrix {
    storage: Storage,
}

impl Matrix {
    fn from_grid(grid: Grid) -> Self {
        Matrix {
            storage: Storage::Owned(Rc::new(RefCell::new(grid))),
        }
    }

    /// Build a `rows × cols` matrix from row-major data.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(LinalgError::shape(format!(
                "matrix dimensions must be positive, got ({}, {})",
                rows, cols
            )));
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(LinalgError::shape(format!(
                "invalid shape ({}, {}) for buffer of length {}",
                rows,
                cols,
                data.len()
            )));
        }
        Ok(Self::from_grid(Grid { data, rows, cols }))
    }

    /// Build a matrix from equal-length rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(LinalgError::shape(format!(
                "all rows must have the same length: row 0 has {}, row {} has {}",
                ncols,
                idx,
                row.len()
            )));
        }
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            data.extend(row);
        }
        Self::from_shape_vec((nrows, ncols), data)
    }

    pub fn from_shape_fn<F>(shape: (usize, usize), f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(LinalgError::shape(format!(
                "matrix dimensions must be positive, got ({}, {})",
                rows, cols
            )));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(LinalgError::shape(format!(
                "matrix shape ({}, {}) overflows usize",
                rows, cols
            )));
        }
        Ok(Self::filled_with(rows, cols, f))
    }

    /// Infallible constructor for internal results whose dimensions are known
    /// to be positive.
    pub(crate) fn filled_with<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        debug_assert!(rows > 0 && cols > 0);
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self::from_grid(Grid { data, rows, cols })
    }

    pub(crate) fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self::from_grid(Grid { data, rows, cols })
    }

    fn source(&self) -> &SharedGrid {
        match &self.storage {
            Storage::Owned(grid) => grid,
            Storage::View(view) => &view.source,
        }
    }

    fn grid(&self) -> Ref<'_, Grid> {
        self.source().borrow()
    }

    /// Map logical coordinates to storage coordinates.
    #[inline]
    fn physical(&self, row: usize, col: usize) -> (usize, usize) {
        match self.storage {
            Storage::Owned(_) => (row, col),
            Storage::View(_) => (col, row),
        }
    }

    pub fn nrows(&self) -> usize {
        let grid = self.grid();
        match self.storage {
            Storage::Owned(_) => grid.rows,
            Storage::View(_) => grid.cols,
        }
    }

    pub fn ncols(&self) -> usize {
        let grid = self.grid();
        match self.storage {
            Storage::Owned(_) => grid.cols,
            Storage::View(_) => grid.rows,
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn shape(&self) -> Shape {
        let (rows, cols) = self.dims();
        Shape::Matrix(rows, cols)
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// True when this matrix reads another matrix's storage transposed.
    pub fn is_view(&self) -> bool {
        matches!(self.storage, Storage::View(_))
    }

    /// True when both matrices read or write the same underlying grid.
    pub fn shares_storage_with(&self, other: &Matrix) -> bool {
        Rc::ptr_eq(self.source(), other.source())
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = self.dims();
        if row >= rows {
            return Err(LinalgError::IndexOutOfBounds {
                index: row,
                len: rows,
            });
        }
        if col >= cols {
            return Err(LinalgError::IndexOutOfBounds {
                index: col,
                len: cols,
            });
        }
        Ok(())
    }

    /// Element read without bounds reporting; panics when out of range.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        let (r, c) = self.physical(row, col);
        let grid = self.grid();
        grid.data[grid.offset(r, c)]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_bounds(row, col)?;
        Ok(self.at(row, col))
    }

    /// Write one element. Through a view this lands at the swapped position
    /// of the shared grid.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_bounds(row, col)?;
        self.write_cells(&[(row, col)], &[value]);
        Ok(())
    }

    /// Write `values[k]` to logical position `cells[k]`. Positions are
    /// already validated, and `values` must not borrow this grid.
    pub(crate) fn write_cells(&mut self, cells: &[(usize, usize)], values: &[f64]) {
        debug_assert_eq!(cells.len(), values.len());
        let mut grid = self.source().borrow_mut();
        for (&(row, col), &value) in cells.iter().zip(values) {
            let (r, c) = self.physical(row, col);
            let offset = grid.offset(r, c);
            grid.data[offset] = value;
        }
    }

    pub fn row(&self, row: usize) -> Result<Vector> {
        self.check_bounds(row, 0)?;
        Ok(self.row_values(row).into())
    }

    pub fn column(&self, col: usize) -> Result<Vector> {
        self.check_bounds(0, col)?;
        Ok((0..self.nrows()).map(|r| self.at(r, col)).collect())
    }

    pub(crate) fn row_values(&self, row: usize) -> Vec<f64> {
        match &self.storage {
            Storage::Owned(grid) => grid.borrow().row_slice(row).to_vec(),
            Storage::View(_) => (0..self.ncols()).map(|c| self.at(row, c)).collect(),
        }
    }

    /// Elements in logical row-major order.
    pub fn to_row_major(&self) -> Vec<f64> {
        match &self.storage {
            Storage::Owned(grid) => grid.borrow().data.clone(),
            Storage::View(view) => {
                let grid = view.source.borrow();
                let mut data = Vec::with_capacity(grid.data.len());
                for c in 0..grid.cols {
                    for r in 0..grid.rows {
                        data.push(grid.data[grid.offset(r, c)]);
                    }
                }
                data
            }
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows()).map(|r| self.row_values(r)).collect()
    }

    /// A matrix sharing this one's storage with rows and columns swapped.
    ///
    /// The view of a view reads the grid in its original orientation and
    /// still shares it.
    pub fn transpose_view(&self) -> Matrix {
        let storage = match &self.storage {
            Storage::Owned(grid) => Storage::View(TransposedView {
                source: Rc::clone(grid),
            }),
            Storage::View(view) => Storage::Owned(Rc::clone(&view.source)),
        };
        Matrix { storage }
    }

    /// Materialized transpose that owns fresh storage.
    pub fn transpose(&self) -> Matrix {
        self.transpose_view().copy()
    }

    /// Deep copy in logical orientation, independent of any view relationship.
    pub fn copy(&self) -> Matrix {
        let (rows, cols) = self.dims();
        Matrix::from_row_major(rows, cols, self.to_row_major())
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        let (rows, cols) = self.dims();
        let data = self.to_row_major().into_iter().map(|v| f(v)).collect();
        Matrix::from_row_major(rows, cols, data)
    }

    /// Combine two equal-shape matrices elementwise. Callers check shapes.
    pub(crate) fn zip_map<F>(&self, other: &Matrix, mut f: F) -> Matrix
    where
        F: FnMut(f64, f64) -> f64,
    {
        debug_assert_eq!(self.dims(), other.dims());
        let (rows, cols) = self.dims();
        let data = self
            .to_row_major()
            .into_iter()
            .zip(other.to_row_major())
            .map(|(a, b)| f(a, b))
            .collect();
        Matrix::from_row_major(rows, cols, data)
    }
}

impl Clone for Matrix {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.dims())
            .field("view", &self.is_view())
            .field("rows", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let rows = self.nrows();
        for r in 0..rows {
            write!(f, "{}", Vector::from(self.row_values(r)))?;
            if r + 1 != rows {
                write!(f, ",\n\t")?;
            }
        }
        write!(f, "]")
    }
}
