/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::{Result, DimensionError};
use crate::matrix::{Matrix, Vector};

use ::ndarray::{Array1, Array2};

/// `PA = LU` with partial (row) pivoting.
///
/// `L` is unit lower triangular and `U` is upper triangular; both are
/// stored packed in a single array.  A column with no nonzero candidate
/// leaves a zero on the diagonal of `U` and elimination simply moves on,
/// so decomposing never fails for a square input.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    packed: Array2<f64>,
    // row i of PA is row order[i] of A
    order: Vec<usize>,
    swaps: usize,
}

impl LuDecomposition {
    pub fn new(m: &Matrix) -> Result<LuDecomposition> {
        let n = m.require_square()?;
        let mut a = m.as_array().to_owned();
        let mut order: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for k in 0..n {
            let (p, _) = (k..n)
                .map(|i| (i, a[(i, k)].abs()))
                .fold((k, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

            if p != k {
                for j in 0..n {
                    a.swap((k, j), (p, j));
                }
                order.swap(k, p);
                swaps += 1;
            }

            let pivot = a[(k, k)];
            if pivot == 0.0 {
                continue;
            }
            for i in k + 1..n {
                let factor = a[(i, k)] / pivot;
                a[(i, k)] = factor;
                if factor != 0.0 {
                    for j in k + 1..n {
                        a[(i, j)] -= factor * a[(k, j)];
                    }
                }
            }
        }
        Ok(LuDecomposition { packed: a, order, swaps })
    }

    pub fn dim(&self) -> usize { self.packed.nrows() }

    pub fn l(&self) -> Matrix {
        let n = self.dim();
        Matrix::from_shape_fn((n, n), |(i, j)| match i.cmp(&j) {
            ::std::cmp::Ordering::Less => 0.0,
            ::std::cmp::Ordering::Equal => 1.0,
            ::std::cmp::Ordering::Greater => self.packed[(i, j)],
        })
    }

    pub fn u(&self) -> Matrix {
        let n = self.dim();
        Matrix::from_shape_fn((n, n), |(i, j)| if i <= j { self.packed[(i, j)] } else { 0.0 })
    }

    /// The permutation matrix `P` in `PA = LU`.
    pub fn permutation(&self) -> Matrix {
        let n = self.dim();
        Matrix::from_shape_fn((n, n), |(i, j)| if self.order[i] == j { 1.0 } else { 0.0 })
    }

    /// Row `i` of `PA` is row `row_order()[i]` of `A`.
    pub fn row_order(&self) -> &[usize] { &self.order }

    /// Smallest `|U[i][i]|`.  The solver compares this against the tolerance.
    pub fn min_abs_pivot(&self) -> f64 {
        self.packed.diag().iter().fold(::std::f64::INFINITY, |acc, x| acc.min(x.abs()))
    }

    /// Product of the pivots, negated once per row swap.
    pub fn det(&self) -> f64 {
        let prod: f64 = self.packed.diag().iter().product();
        match self.swaps % 2 {
            0 => prod,
            _ => -prod,
        }
    }

    /// Forward then back substitution.
    ///
    /// Only meaningful when every pivot is nonzero; a zero pivot produces
    /// non-finite output rather than an error.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let n = self.dim();
        if b.len() != n {
            return Err(DimensionError::VectorLength { rows: n, len: b.len() }.into());
        }

        // Ly = Pb
        let mut y = Array1::from_shape_fn(n, |i| b[self.order[i]]);
        for i in 0..n {
            let mut acc = y[i];
            for j in 0..i {
                acc -= self.packed[(i, j)] * y[j];
            }
            y[i] = acc;
        }

        // Ux = y
        let mut x = y;
        for i in (0..n).rev() {
            let mut acc = x[i];
            for j in i + 1..n {
                acc -= self.packed[(i, j)] * x[j];
            }
            x[i] = acc / self.packed[(i, i)];
        }
        Ok(Vector::from_array(x))
    }
}
