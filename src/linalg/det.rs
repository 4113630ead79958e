/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::Result;
use crate::lu::LuDecomposition;
use crate::matrix::Matrix;
use crate::tolerance::Tolerance;

/// Determinant of a square matrix.
///
/// Matrices up to 3x3 use cofactor expansion; anything larger goes through
/// [`LuDecomposition`].  The tolerance plays no part here; it only enters
/// when the result is classified by [`is_singular`].
pub fn det(m: &Matrix) -> Result<f64> {
    let n = m.require_square()?;
    let a = m.as_array();
    Ok(match n {
        1 => a[(0, 0)],
        2 => det2(a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]),
        3 => {
            a[(0, 0)] * det2(a[(1, 1)], a[(1, 2)], a[(2, 1)], a[(2, 2)])
            - a[(0, 1)] * det2(a[(1, 0)], a[(1, 2)], a[(2, 0)], a[(2, 2)])
            + a[(0, 2)] * det2(a[(1, 0)], a[(1, 1)], a[(2, 0)], a[(2, 1)])
        },
        _ => LuDecomposition::new(m)?.det(),
    })
}

/// `|det(m)| <= ε`
pub fn is_singular(m: &Matrix, tol: Tolerance) -> Result<bool> {
    Ok(tol.is_zero(det(m)?))
}

pub fn is_nonsingular(m: &Matrix, tol: Tolerance) -> Result<bool> {
    is_singular(m, tol).map(|b| !b)
}

#[inline]
fn det2(a: f64, b: f64, c: f64, d: f64) -> f64 { a * d - b * c }
