/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::{Result, BadDataError, DimensionError};

use ::ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, Axis};
use ::std::ops::Index;

/// Owned, immutable, row-major matrix of `f64`.
///
/// Matrices built from user data always have at least one row and one
/// column.  The engine may produce matrices with zero columns (e.g. the
/// null space of a full-rank matrix).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(
    // invariant: standard (C-contiguous) layout
    Array2<f64>
);

/// Owned, immutable vector of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector(Array1<f64>);

impl Matrix {
    /// Build a matrix from nested rows.
    ///
    /// Fails with a `BadData` error if there are no rows, the rows are empty,
    /// or the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let expected = match rows.first() {
            None => return Err(BadDataError::Empty.into()),
            Some(row) if row.is_empty() => return Err(BadDataError::Empty.into()),
            Some(row) => row.len(),
        };
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(BadDataError::Ragged { row, expected, actual: bad.len() }.into());
        }

        let height = rows.len();
        let data = rows.into_iter().flatten().collect();
        let arr = Array::from_shape_vec((height, expected), data).expect("(BUG) shape was checked");
        Ok(Matrix(arr))
    }

    /// Wrap an existing array.  Fails with `BadData` if it has no entries.
    pub fn from_array(arr: Array2<f64>) -> Result<Matrix> {
        match arr.is_empty() {
            true => Err(BadDataError::Empty.into()),
            false => Ok(Matrix::from_array_unchecked(arr)),
        }
    }

    pub(crate) fn from_array_unchecked(arr: Array2<f64>) -> Matrix {
        match arr.is_standard_layout() {
            true => Matrix(arr),
            false => Matrix(arr.as_standard_layout().into_owned()),
        }
    }

    pub fn from_shape_fn<F>((rows, cols): (usize, usize), f: F) -> Matrix
    where F: FnMut((usize, usize)) -> f64,
    { Matrix(Array2::from_shape_fn((rows, cols), f)) }

    pub fn identity(n: usize) -> Matrix { Matrix(Array2::eye(n)) }

    pub fn zeros(rows: usize, cols: usize) -> Matrix { Matrix(Array2::zeros((rows, cols))) }

    pub fn rows(&self) -> usize { self.0.nrows() }
    pub fn cols(&self) -> usize { self.0.ncols() }
    pub fn dims(&self) -> (usize, usize) { self.0.dim() }
    pub fn is_square(&self) -> bool { self.rows() == self.cols() }

    pub fn as_array(&self) -> ArrayView2<'_, f64> { self.0.view() }
    pub fn into_inner(self) -> Array2<f64> { self.0 }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.0.outer_iter().map(|row| row.to_vec()).collect()
    }

    pub fn row(&self, r: usize) -> Vector { Vector(self.0.row(r).to_owned()) }
    pub fn column(&self, c: usize) -> Vector { Vector(self.0.column(c).to_owned()) }

    /// Side length of a square matrix, or a `Dimension` error.
    pub(crate) fn require_square(&self) -> Result<usize> {
        match self.is_square() {
            true => Ok(self.rows()),
            false => Err(DimensionError::NotSquare { rows: self.rows(), cols: self.cols() }.into()),
        }
    }

    /// `[self | other]`
    pub fn augment(&self, other: &Matrix) -> Result<Matrix> {
        if self.rows() != other.rows() {
            let (left_rows, right_rows) = (self.rows(), other.rows());
            return Err(DimensionError::Augment { left_rows, right_rows }.into());
        }
        let arr = ::ndarray::concatenate(Axis(1), &[self.0.view(), other.0.view()])
            .expect("(BUG) row counts were checked");
        Ok(Matrix::from_array_unchecked(arr))
    }

    /// `[self | v]`
    pub fn augment_vector(&self, v: &Vector) -> Result<Matrix> {
        if self.rows() != v.len() {
            return Err(DimensionError::VectorLength { rows: self.rows(), len: v.len() }.into());
        }
        self.augment(&v.as_column_matrix())
    }

    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(DimensionError::Multiply { left: self.dims(), right: other.dims() }.into());
        }
        Ok(Matrix(self.0.dot(&other.0)))
    }

    pub fn dot_vector(&self, v: &Vector) -> Result<Vector> {
        if self.cols() != v.len() {
            return Err(DimensionError::Multiply { left: self.dims(), right: (v.len(), 1) }.into());
        }
        Ok(Vector(self.0.dot(&v.0)))
    }

    pub fn transpose(&self) -> Matrix { Matrix::from_array_unchecked(self.0.t().to_owned()) }

    /// `self - λI`
    pub fn shifted(&self, lambda: f64) -> Matrix {
        let mut arr = self.0.clone();
        arr.diag_mut().mapv_inplace(|x| x - lambda);
        Matrix(arr)
    }

    pub fn trace(&self) -> f64 { self.0.diag().sum() }

    /// Largest magnitude of any entry (0 for an empty matrix).
    pub fn max_abs(&self) -> f64 { self.0.iter().fold(0.0, |acc, x| f64::max(acc, x.abs())) }

    pub fn frobenius_norm(&self) -> f64 { self.0.iter().map(|x| x * x).sum::<f64>().sqrt() }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, idx: (usize, usize)) -> &f64 { &self.0[idx] }
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Vector { Vector(Array1::from(data)) }

    pub fn from_array(arr: Array1<f64>) -> Vector { Vector(arr) }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_array(&self) -> ArrayView1<'_, f64> { self.0.view() }
    pub fn into_inner(self) -> Array1<f64> { self.0 }

    pub fn as_slice(&self) -> &[f64] { self.0.as_slice().expect("(BUG) not contiguous!!") }
    pub fn to_vec(&self) -> Vec<f64> { self.0.to_vec() }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 { self.0.dot(&self.0).sqrt() }

    /// Scaled to unit norm.  A zero vector is returned unchanged.
    pub fn normalized(&self) -> Vector {
        match self.norm() {
            norm if norm == 0.0 => self.clone(),
            norm => Vector(&self.0 / norm),
        }
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(DimensionError::VectorLength { rows: self.len(), len: other.len() }.into());
        }
        Ok(self.0.dot(&other.0))
    }

    /// `n x 1` matrix
    pub fn as_column_matrix(&self) -> Matrix {
        Matrix(self.0.clone().insert_axis(Axis(1)).as_standard_layout().into_owned())
    }

    /// `1 x n` matrix
    pub fn as_row_matrix(&self) -> Matrix { Matrix(self.0.clone().insert_axis(Axis(0))) }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self { Vector::new(data) }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 { &self.0[i] }
}
