/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense linear algebra where "zero" means "at most ε".
//!
//! Every decision that compares a floating point magnitude against zero
//! (pivot selection, rank, singularity, null spaces) goes through a single
//! [`Tolerance`].  The free functions take it explicitly; [`Engine`] owns one
//! and threads it through for you.

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate lintol_assert_close;

mod error;
mod tolerance;
mod matrix;
mod rref;
mod lu;
mod det;
mod solve;
pub mod poly;
mod eigen;
mod eigenvector;
mod engine;

pub use crate::error::{Error, ErrorKind, Result, DimensionError, InvalidDataError, BadDataError};
pub use crate::tolerance::Tolerance;
pub use crate::matrix::{Matrix, Vector};
pub use crate::rref::{rref, row_reduce, rank, RowReduction};
pub use crate::lu::LuDecomposition;
pub use crate::det::{det, is_singular, is_nonsingular};
pub use crate::solve::solve;
pub use crate::eigen::{eigenvalues, EigenMethod};
pub use crate::eigenvector::{eigenvectors, eigenvectors_by, null_space};
pub use crate::engine::Engine;
