/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::det;
use crate::eigen::{self, EigenMethod};
use crate::eigenvector;
use crate::error::Result;
use crate::lu::LuDecomposition;
use crate::matrix::{Matrix, Vector};
use crate::rref::{self, RowReduction};
use crate::solve;
use crate::tolerance::Tolerance;

/// Entry point that carries the zero tolerance and eigenvalue method.
///
/// Each method reads the tolerance at call time, so after
/// [`Engine::set_tolerance`] the next call sees the new value.
///
/// ```
/// use lintol_linalg::{Engine, Matrix, Vector};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]])?;
/// let mut engine = Engine::new();
/// assert!(engine.is_singular(&a)?);
///
/// engine.set_tolerance(0.0)?;
/// let x = engine.solve(&a, &Vector::new(vec![3.0, 6.0]))?;
/// assert_eq!(x.to_vec(), vec![3.0, 0.0]);
/// # Ok::<(), lintol_linalg::Error>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Engine {
    tolerance: Tolerance,
    eigen_method: EigenMethod,
}

impl Engine {
    pub fn new() -> Engine { Engine::default() }

    pub fn with_tolerance(self, tolerance: Tolerance) -> Engine { Engine { tolerance, ..self } }

    pub fn with_eigen_method(self, eigen_method: EigenMethod) -> Engine { Engine { eigen_method, ..self } }

    /// Replace the tolerance.  Negative or non-finite values are rejected
    /// and leave the current one in place.
    pub fn set_tolerance(&mut self, eps: f64) -> Result<()> {
        self.tolerance = Tolerance::new(eps)?;
        Ok(())
    }

    pub fn tolerance(&self) -> Tolerance { self.tolerance }

    pub fn eigen_method(&self) -> EigenMethod { self.eigen_method }

    pub fn rref(&self, m: &Matrix) -> Matrix { rref::rref(m, self.tolerance) }

    pub fn row_reduce(&self, m: &Matrix) -> RowReduction { rref::row_reduce(m, self.tolerance) }

    pub fn rank(&self, m: &Matrix) -> usize { rref::rank(m, self.tolerance) }

    /// Independent of the tolerance.
    pub fn det(&self, m: &Matrix) -> Result<f64> { det::det(m) }

    pub fn lu(&self, m: &Matrix) -> Result<LuDecomposition> { LuDecomposition::new(m) }

    pub fn is_singular(&self, m: &Matrix) -> Result<bool> { det::is_singular(m, self.tolerance) }

    pub fn is_nonsingular(&self, m: &Matrix) -> Result<bool> { det::is_nonsingular(m, self.tolerance) }

    pub fn solve(&self, a: &Matrix, b: &Vector) -> Result<Vector> { solve::solve(a, b, self.tolerance) }

    /// Eigenvalues by this engine's method.
    pub fn eigenvalues(&self, m: &Matrix) -> Result<Vec<f64>> { self.eigenvalues_with(m, self.eigen_method) }

    pub fn eigenvalues_with(&self, m: &Matrix, method: EigenMethod) -> Result<Vec<f64>> {
        eigen::eigenvalues(m, method)
    }

    /// Eigenvalues by a method named at runtime.  Unknown names are an
    /// [`InvalidMethod`](crate::Error::InvalidMethod) error.
    pub fn eigenvalues_by_name(&self, m: &Matrix, method: &str) -> Result<Vec<f64>> {
        self.eigenvalues_with(m, method.parse()?)
    }

    /// See [`eigenvector::eigenvectors`].  Missing eigenvalues are computed
    /// with this engine's method.
    pub fn eigenvectors(&self, m: &Matrix, eigenvalues: Option<&[f64]>) -> Result<Matrix> {
        match eigenvalues {
            Some(_) => eigenvector::eigenvectors(m, eigenvalues, self.tolerance),
            None => eigenvector::eigenvectors_by(m, self.eigen_method, self.tolerance),
        }
    }

    pub fn null_space(&self, m: &Matrix) -> Matrix { eigenvector::null_space(m, self.tolerance) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn mat(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn latest_tolerance_wins() {
        let m = mat(&[&[1.0, 0.0], &[0.0, 1e-12]]);
        let mut engine = Engine::new();
        assert_eq!(engine.tolerance(), Tolerance::DEFAULT);
        assert!(engine.is_singular(&m).unwrap());
        assert_eq!(engine.rank(&m), 1);

        engine.set_tolerance(1e-13).unwrap();
        assert!(engine.is_nonsingular(&m).unwrap());
        assert_eq!(engine.rank(&m), 2);

        // the determinant itself does not move
        assert_eq!(engine.det(&m).unwrap(), 1e-12);

        engine.set_tolerance(1e-11).unwrap();
        assert!(engine.is_singular(&m).unwrap());
    }

    #[test]
    fn rejected_tolerance_keeps_old_value() {
        let mut engine = Engine::new().with_tolerance(Tolerance::new(1e-6).unwrap());
        assert_eq!(engine.set_tolerance(-1.0).unwrap_err().kind(), ErrorKind::BadData);
        assert_eq!(engine.tolerance().value(), 1e-6);
    }

    #[test]
    fn method_by_name() {
        let engine = Engine::new();
        let m = mat(&[&[6.0, -1.0], &[2.0, 3.0]]);
        assert_close!(engine.eigenvalues_by_name(&m, "closedFormPolynomialRootMethod").unwrap(), [4.0, 5.0]);
        assert_eq!(engine.eigenvalues_by_name(&m, "SecretMethod").unwrap_err().kind(), ErrorKind::InvalidMethod);
    }

    #[test]
    fn eigenvectors_default_to_computed_values() {
        let engine = Engine::new().with_eigen_method(EigenMethod::ClosedFormPolynomialRoot);
        let m = mat(&[&[6.0, -1.0], &[2.0, 3.0]]);
        let computed = engine.eigenvectors(&m, None).unwrap();
        let supplied = engine.eigenvectors(&m, Some(&[4.0, 5.0][..])).unwrap();
        assert_close!(abs=1e-12, computed.as_array(), supplied.as_array());
    }
}
