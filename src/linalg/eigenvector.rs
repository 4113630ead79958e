/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Eigenvectors as null spaces of `A - λI`.

use crate::det::det;
use crate::eigen::{eigenvalues as compute_eigenvalues, EigenMethod};
use crate::error::{Result, DimensionError, InvalidDataError};
use crate::matrix::{Matrix, Vector};
use crate::rref::{row_reduce, RowReduction};
use crate::tolerance::Tolerance;

use ::ndarray::Array1;

/// A Gram-Schmidt residual smaller than this fraction of the candidate's
/// original norm marks the candidate as linearly dependent.
const DEPENDENCE_REL: f64 = 1e-10;

/// Orthonormal basis of `{ x : Mx = 0 }`, as columns.
///
/// The result has `M.cols()` rows and one column per free variable of
/// `rref(M)`; it has zero columns when `M` has full column rank.
///
/// The basis is built deterministically.  Free columns whose reduced column
/// is entirely zero contribute their axis vector first; then comes the
/// solution with every other free variable set to 1; then the solutions with
/// a single free variable set to 1.  These candidates are orthonormalized in
/// that order, dropping any that are dependent on earlier ones.
pub fn null_space(m: &Matrix, tol: Tolerance) -> Matrix {
    columns_to_matrix(m.cols(), &null_basis(&row_reduce(m, tol)))
}

/// Unit eigenvectors of `a`, one column per eigenvalue.
///
/// When `eigenvalues` is `None` they are computed by the closed-form method,
/// which limits `a` to 2x2 or 3x3.  Caller-supplied eigenvalues are checked
/// first: there must be exactly `n`, all finite, and each must make
/// `|det(A - λI)|` vanish to within `ε · max(1, ‖A‖)ⁿ`.
///
/// Column `i` belongs to eigenvalue `i`.  When an eigenvalue repeats, its
/// k-th occurrence receives the k-th vector of the shared eigenspace basis
/// (or the last one, for a defective matrix), so equal eigenvalues never get
/// parallel vectors unless the eigenspace is too small.  Signs are arbitrary.
pub fn eigenvectors(a: &Matrix, eigenvalues: Option<&[f64]>, tol: Tolerance) -> Result<Matrix> {
    match eigenvalues {
        Some(values) => {
            validate_eigenvalues(a, values, tol)?;
            vectors_for(a, values, tol)
        },
        None => eigenvectors_by(a, EigenMethod::default(), tol),
    }
}

/// Like `eigenvectors(a, None, tol)`, computing eigenvalues with `method`.
pub fn eigenvectors_by(a: &Matrix, method: EigenMethod, tol: Tolerance) -> Result<Matrix> {
    a.require_square()?;
    let values = compute_eigenvalues(a, method)?;
    vectors_for(a, &values, tol)
}

fn validate_eigenvalues(a: &Matrix, values: &[f64], tol: Tolerance) -> Result<()> {
    let n = a.require_square()?;
    if values.len() != n {
        return Err(DimensionError::EigenvalueCount { expected: n, actual: values.len() }.into());
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(InvalidDataError::NonFinite { index, value }.into());
    }

    for &value in values {
        let residual = scaled_residual(a, value)?;
        if residual > tol.value() {
            return Err(InvalidDataError::NotAnEigenvalue { value, residual }.into());
        }
    }
    Ok(())
}

/// `|det(A - λI)| / max(1, ‖A‖)ⁿ`.
///
/// The shifted matrix is divided through before taking the determinant, so
/// neither the power nor the determinant can overflow.
fn scaled_residual(a: &Matrix, value: f64) -> Result<f64> {
    let scale = f64::max(1.0, a.frobenius_norm());
    let scaled = Matrix::from_array_unchecked(a.shifted(value).into_inner() / scale);
    Ok(det(&scaled)?.abs())
}

fn vectors_for(a: &Matrix, values: &[f64], tol: Tolerance) -> Result<Matrix> {
    let n = a.require_square()?;

    let mut columns: Vec<Vector> = Vec::with_capacity(n);
    // (eigenvalue, basis, occurrences so far)
    let mut seen: Vec<(f64, Vec<Vector>, usize)> = vec![];

    for &value in values {
        let same = |other: f64| (value - other).abs() <= tol.value() * 1f64.max(value.abs()).max(other.abs());

        let index = match seen.iter().position(|&(other, _, _)| same(other)) {
            Some(index) => index,
            None => {
                seen.push((value, eigenspace(a, value, tol)?, 0));
                seen.len() - 1
            },
        };
        let (_, basis, count) = &mut seen[index];
        if *count == basis.len() {
            debug!("eigenvectors: λ = {} repeats more often than its eigenspace has dimensions", value);
        }
        columns.push(basis[usize::min(*count, basis.len() - 1)].clone());
        *count += 1;
    }
    Ok(columns_to_matrix(n, &columns))
}

/// Nonempty orthonormal basis of the null space of `A - λI`.
fn eigenspace(a: &Matrix, value: f64, tol: Tolerance) -> Result<Vec<Vector>> {
    let shifted = a.shifted(value);

    let reduced = row_reduce(&shifted, tol);
    if reduced.rank() < shifted.cols() {
        return Ok(null_basis(&reduced));
    }

    // rounding in λ can leave a pivot just above ε
    let relaxed = Tolerance::new({
        let scale = f64::max(1.0, shifted.max_abs());
        f64::max(tol.value(), ::std::f64::EPSILON.sqrt() * scale)
    })?;
    warn!(
        "eigenvectors: A - λI is nonsingular under ε = {:e} for λ = {}; retrying with ε = {:e}",
        tol.value(), value, relaxed.value(),
    );

    let reduced = row_reduce(&shifted, relaxed);
    if reduced.rank() < shifted.cols() {
        return Ok(null_basis(&reduced));
    }
    let residual = scaled_residual(a, value)?;
    Err(InvalidDataError::NotAnEigenvalue { value, residual }.into())
}

fn null_basis(reduced: &RowReduction) -> Vec<Vector> {
    let r = &reduced.matrix;
    let n = r.cols();
    let free = reduced.free_columns();

    let is_zero_column = |f: usize| (0..reduced.rank()).all(|row| r[(row, f)] == 0.0);
    let (axes, coupled): (Vec<usize>, Vec<usize>) = free.iter().cloned().partition(|&f| is_zero_column(f));

    // solution of Rx = 0 with the given free variables set to 1 and the rest 0
    let solution = |ones: &[usize]| {
        let mut x = Array1::zeros(n);
        for &f in ones {
            x[f] = 1.0;
        }
        for (row, &pivot) in reduced.pivots.iter().enumerate() {
            x[pivot] = -ones.iter().map(|&f| r[(row, f)]).sum::<f64>();
        }
        Vector::from_array(x)
    };

    let mut candidates: Vec<Vector> = axes.iter().map(|&f| solution(&[f])).collect();
    if !coupled.is_empty() {
        candidates.push(solution(&coupled));
        candidates.extend(coupled.iter().map(|&f| solution(&[f])));
    }
    gram_schmidt(candidates, free.len())
}

/// Orthonormalize `candidates` in order, stopping after `limit` vectors.
fn gram_schmidt(candidates: Vec<Vector>, limit: usize) -> Vec<Vector> {
    let mut basis: Vec<Array1<f64>> = vec![];
    for candidate in candidates {
        if basis.len() == limit {
            break;
        }
        let original_norm = candidate.norm();
        let mut v = candidate.into_inner();
        // twice is enough
        for _ in 0..2 {
            for u in &basis {
                let overlap = u.dot(&v);
                v.scaled_add(-overlap, u);
            }
        }
        let norm = v.dot(&v).sqrt();
        if norm > DEPENDENCE_REL * original_norm {
            basis.push(v / norm);
        }
    }
    basis.into_iter().map(Vector::from_array).collect()
}

fn columns_to_matrix(rows: usize, columns: &[Vector]) -> Matrix {
    Matrix::from_shape_fn((rows, columns.len()), |(i, j)| columns[j][i])
}
