/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Gauss-Jordan elimination to reduced row echelon form.

use crate::matrix::Matrix;
use crate::tolerance::Tolerance;

use ::ndarray::Array2;

/// The reduced form of a matrix together with where its pivots landed.
#[derive(Debug, Clone, PartialEq)]
pub struct RowReduction {
    pub matrix: Matrix,
    /// `pivots[r]` is the column of the leading 1 in row `r`.
    /// Rows at index `pivots.len()` and beyond are entirely zero.
    pub pivots: Vec<usize>,
}

impl RowReduction {
    pub fn rank(&self) -> usize { self.pivots.len() }

    /// Columns that did not receive a pivot.
    pub fn free_columns(&self) -> Vec<usize> {
        let mut pivots = self.pivots.iter().cloned().peekable();
        (0..self.matrix.cols())
            .filter(|&c| match pivots.peek() {
                Some(&p) if p == c => { pivots.next(); false },
                _ => true,
            })
            .collect()
    }
}

/// Reduce `m` with partial pivoting.
///
/// Candidate pivots with magnitude `<= tol` are treated as zero and are
/// written back as exact zeros, as are all entries cleared by elimination
/// and every pivot (exactly `1.0`).  Consequently the output is a fixed
/// point: reducing it again with the same tolerance gives it back unchanged.
pub fn row_reduce(m: &Matrix, tol: Tolerance) -> RowReduction {
    let mut a = m.as_array().to_owned();
    let pivots = reduce_in_place(&mut a, tol);
    RowReduction { matrix: Matrix::from_array_unchecked(a), pivots }
}

/// Reduced row echelon form of `m`.
pub fn rref(m: &Matrix, tol: Tolerance) -> Matrix { row_reduce(m, tol).matrix }

/// Number of pivots in the reduced form of `m`.
pub fn rank(m: &Matrix, tol: Tolerance) -> usize { row_reduce(m, tol).rank() }

fn reduce_in_place(a: &mut Array2<f64>, tol: Tolerance) -> Vec<usize> {
    let (nrows, ncols) = a.dim();
    let mut pivots = vec![];

    for c in 0..ncols {
        let r = pivots.len();
        if r == nrows {
            break;
        }

        // partial pivoting; ties go to the topmost row
        let (best, best_abs) = (r..nrows)
            .map(|i| (i, a[(i, c)].abs()))
            .fold((r, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        if tol.is_zero(best_abs) {
            trace!("rref: column {} has no usable pivot (max |x| = {:e})", c, best_abs);
            for i in r..nrows {
                a[(i, c)] = 0.0;
            }
            continue;
        }

        if best != r {
            for j in c..ncols {
                a.swap((r, j), (best, j));
            }
        }

        let pivot = a[(r, c)];
        for j in c + 1..ncols {
            a[(r, j)] /= pivot;
        }
        a[(r, c)] = 1.0;

        for i in 0..nrows {
            if i == r {
                continue;
            }
            let factor = a[(i, c)];
            if factor != 0.0 {
                for j in c + 1..ncols {
                    a[(i, j)] -= factor * a[(r, j)];
                }
                a[(i, c)] = 0.0;
            }
        }
        pivots.push(c);
    }
    pivots
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use ::rand::Rng;

    fn mat(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn random_matrix(rows: usize, cols: usize) -> Matrix {
        let mut rng = ::rand::thread_rng();
        Matrix::from_shape_fn((rows, cols), |_| rng.gen_range(-10.0..10.0))
    }

    #[test]
    fn textbook() {
        let m = mat(&[
            &[1.0, 2.0, -1.0, -4.0],
            &[2.0, 3.0, -1.0, -11.0],
            &[-2.0, 0.0, -3.0, 22.0],
        ]);
        let red = row_reduce(&m, Tolerance::DEFAULT);
        assert_eq!(red.pivots, vec![0, 1, 2]);
        assert_close!(abs=1e-12, red.matrix.as_array(), ::ndarray::array![
            [1.0, 0.0, 0.0, -8.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, -2.0],
        ]);
    }

    #[test]
    fn rank_deficient() {
        let m = mat(&[
            &[1.0, 2.0, 3.0],
            &[4.0, 5.0, 6.0],
            &[7.0, 8.0, 9.0],
        ]);
        let red = row_reduce(&m, Tolerance::DEFAULT);
        assert_eq!(red.pivots, vec![0, 1]);
        assert_eq!(red.free_columns(), vec![2]);
        assert_close!(abs=1e-12, red.matrix.as_array(), ::ndarray::array![
            [1.0, 0.0, -1.0],
            [0.0, 1.0, 2.0],
            [0.0, 0.0, 0.0],
        ]);
        // the zero row is exactly zero, not merely small
        assert!(red.matrix.row(2).as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn skipped_column_leaves_later_pivots() {
        let m = mat(&[
            &[0.0, 1.0, 2.0],
            &[0.0, 3.0, 4.0],
        ]);
        let red = row_reduce(&m, Tolerance::DEFAULT);
        assert_eq!(red.pivots, vec![1, 2]);
        assert_eq!(red.free_columns(), vec![0]);
        assert_eq!(red.matrix.to_rows(), vec![vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]);
    }

    #[test]
    fn tolerance_decides_rank() {
        let m = mat(&[&[1.0, 0.0], &[0.0, 1e-12]]);
        assert_eq!(rank(&m, Tolerance::DEFAULT), 1);
        assert_eq!(rank(&m, Tolerance::new(1e-13).unwrap()), 2);
        assert_eq!(rank(&m, Tolerance::new(1e-12).unwrap()), 1);

        let zero = Matrix::zeros(2, 3);
        assert_eq!(rref(&zero, Tolerance::DEFAULT), zero);
        assert_eq!(rank(&zero, Tolerance::DEFAULT), 0);
    }

    #[test]
    fn idempotent() {
        for &(rows, cols) in &[(3, 3), (4, 2), (2, 5), (5, 5)] {
            let mut m = random_matrix(rows, cols);
            if rows > 2 {
                // force a dependent row
                let arr = m.as_array();
                let dependent = &arr.row(0) * 2.0 - &arr.row(1);
                let mut arr = arr.to_owned();
                arr.row_mut(rows - 1).assign(&dependent);
                m = Matrix::from_array(arr).unwrap();
            }
            let once = rref(&m, Tolerance::DEFAULT);
            let twice = rref(&once, Tolerance::DEFAULT);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn random_square_reduces_to_identity() {
        for _ in 0..20 {
            let m = random_matrix(6, 6);
            let red = row_reduce(&m, Tolerance::DEFAULT);
            assert_eq!(red.rank(), 6);
            assert_close!(abs=1e-9, red.matrix.as_array(), Matrix::identity(6).as_array());
        }
    }
}
