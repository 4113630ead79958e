/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Every failure the engine can report.
///
/// Near-zero pivots and determinants are deliberately absent from this list;
/// those are resolved by the algorithms themselves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("dimension mismatch: {0}")]
    Dimension(#[from] DimensionError),

    #[error("invalid data: {0}")]
    InvalidData(#[from] InvalidDataError),

    #[error("unrecognized eigenvalue method: {name:?}")]
    InvalidMethod { name: String },

    #[error("bad matrix data: {0}")]
    BadData(#[from] BadDataError),

    #[error("characteristic polynomial has complex roots (discriminant {discriminant:e})")]
    ComplexEigenvalues { discriminant: f64 },
}

/// Coarse classification of [`Error`], handy for matching in tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Dimension,
    InvalidData,
    InvalidMethod,
    BadData,
    ComplexEigenvalues,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Dimension(_) => ErrorKind::Dimension,
            Error::InvalidData(_) => ErrorKind::InvalidData,
            Error::InvalidMethod { .. } => ErrorKind::InvalidMethod,
            Error::BadData(_) => ErrorKind::BadData,
            Error::ComplexEigenvalues { .. } => ErrorKind::ComplexEigenvalues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("closed-form eigenvalues need a 2x2 or 3x3 matrix, got {rows}x{cols}")]
    UnsupportedEigenSize { rows: usize, cols: usize },

    #[error("a {expected}x{expected} matrix has {expected} eigenvalues, but {actual} were supplied")]
    EigenvalueCount { expected: usize, actual: usize },

    #[error("vector of length {len} does not match a matrix with {rows} rows")]
    VectorLength { rows: usize, len: usize },

    #[error("cannot augment a {left_rows}-row matrix with a {right_rows}-row matrix")]
    Augment { left_rows: usize, right_rows: usize },

    #[error("cannot multiply {left:?} by {right:?}")]
    Multiply { left: (usize, usize), right: (usize, usize) },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidDataError {
    #[error("eigenvalue #{index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("{value} is not an eigenvalue of this matrix (|det(A - λI)| / max(1, ‖A‖)ⁿ = {residual:e})")]
    NotAnEigenvalue { value: f64, residual: f64 },

    #[error("the system has no solution (row {row} of the reduced system reads 0 = nonzero)")]
    InconsistentSystem { row: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BadDataError {
    #[error("matrix has no entries")]
    Empty,

    #[error("row {row} has length {actual}, but row 0 has length {expected}")]
    Ragged { row: usize, expected: usize, actual: usize },

    #[error("tolerance must be finite and non-negative, got {0}")]
    BadTolerance(f64),
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        let e: Error = DimensionError::NotSquare { rows: 1, cols: 2 }.into();
        assert_eq!(e.kind(), ErrorKind::Dimension);

        let e: Error = InvalidDataError::NotAnEigenvalue { value: 0.0, residual: 2.0 }.into();
        assert_eq!(e.kind(), ErrorKind::InvalidData);

        let e: Error = BadDataError::Empty.into();
        assert_eq!(e.kind(), ErrorKind::BadData);

        let e = Error::InvalidMethod { name: "SecretMethod".into() };
        assert_eq!(e.kind(), ErrorKind::InvalidMethod);
        assert!(e.to_string().contains("SecretMethod"));
    }
}
