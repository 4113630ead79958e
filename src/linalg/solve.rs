/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::det::is_singular;
use crate::error::{Result, DimensionError, InvalidDataError};
use crate::lu::LuDecomposition;
use crate::matrix::{Matrix, Vector};
use crate::rref::row_reduce;
use crate::tolerance::Tolerance;

/// Solve `Ax = b`.
///
/// Nonsingular systems with healthy pivots go through LU substitution.
/// Anything the tolerance flags (a near-zero determinant, or a near-zero
/// LU pivot) is instead solved by reducing `[A | b]`, where free variables
/// are set to zero.  A near-singular matrix therefore never causes a
/// division by a tiny pivot.
///
/// An augmented system that reduces to `0 = nonzero` is reported as
/// [`InvalidDataError::InconsistentSystem`].
pub fn solve(a: &Matrix, b: &Vector, tol: Tolerance) -> Result<Vector> {
    let n = a.require_square()?;
    if b.len() != n {
        return Err(DimensionError::VectorLength { rows: n, len: b.len() }.into());
    }

    if is_singular(a, tol)? {
        debug!("solve: {}x{} matrix is singular under ε = {:e}; reducing the augmented system", n, n, tol.value());
        return solve_by_rref(a, b, tol);
    }

    let lu = LuDecomposition::new(a)?;
    let min_pivot = lu.min_abs_pivot();
    if tol.is_zero(min_pivot) {
        debug!("solve: smallest LU pivot {:e} is within ε = {:e}; reducing the augmented system", min_pivot, tol.value());
        return solve_by_rref(a, b, tol);
    }
    lu.solve(b)
}

fn solve_by_rref(a: &Matrix, b: &Vector, tol: Tolerance) -> Result<Vector> {
    let n = a.cols();
    let reduced = row_reduce(&a.augment_vector(b)?, tol);

    let mut x = vec![0.0; n];
    for (row, &col) in reduced.pivots.iter().enumerate() {
        if col == n {
            return Err(InvalidDataError::InconsistentSystem { row }.into());
        }
        x[col] = reduced.matrix[(row, n)];
    }

    let free = n - reduced.pivots.len();
    if free > 0 {
        debug!("solve: {} free variable(s) set to zero", free);
    }
    Ok(Vector::new(x))
}
