/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!` and the [`CheckClose`] trait behind it.
//!
//! ```ignore
//! assert_close!(a, b);                     // rel = DEFAULT_NONZERO_TOL
//! assert_close!(abs=1e-8, a, b);
//! assert_close!(rel=1e-6, abs=1e-12, a, b, "at step {}", i);
//! ```

use ::ndarray::{ArrayBase, ArrayView2, Array2, Data, Dimension};
use ::thiserror::Error;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]])
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]])
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {{
        // matching on references keeps temporaries in $a and $b alive
        match (&$a, &$b) {
            (a, b) => {
                let tol = $crate::Tolerances { abs: 0.0, rel: 0.0 };
                $(
                    let tol = $crate::assert_close_impl!{@with tol $assignment};
                )*

                if let Err(e) = $crate::CheckClose::check_close(a, b, tol) {
                    panic!(
                    "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                     format!($($fmt)*), tol.rel, tol.abs, a, b, e);
                }
            },
        }
    }};
    (@with $tol:ident [@abs $x:expr]) => { $crate::Tolerances { abs: $x, ..$tol } };
    (@with $tol:ident [@rel $x:expr]) => { $crate::Tolerances { rel: $x, ..$tol } };
}

/// Python's `math.isclose`.
#[inline]
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // case for general values and NaN.
    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

#[derive(Debug, Clone, Error)]
pub enum CheckCloseError {
    #[error("failed at:\n  left: {left:?}\n right: {right:?}\n   tol: {tol:?}")]
    Value { left: f64, right: f64, tol: Tolerances },

    #[error("shapes differ: {left:?} vs {right:?}")]
    Shape { left: Vec<usize>, right: Vec<usize> },
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::Value { left: *self, right: *other, tol }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.len() != other.len() {
            return Err(CheckCloseError::Shape { left: vec![self.len()], right: vec![other.len()] });
        }
        self.iter().zip(other)
            .map(|(a, b)| a.check_close(b, tol))
            .collect()
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(other, tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose, const N: usize> CheckClose<[T; N]> for Vec<T> {
    fn check_close(&self, other: &[T; N], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<A, S1, S2, D> CheckClose<ArrayBase<S2, D>> for ArrayBase<S1, D>
where
    A: CheckClose,
    S1: Data<Elem=A>,
    S2: Data<Elem=A>,
    D: Dimension,
{
    fn check_close(&self, other: &ArrayBase<S2, D>, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.shape() != other.shape() {
            let (left, right) = (self.shape().to_vec(), other.shape().to_vec());
            return Err(CheckCloseError::Shape { left, right });
        }
        self.iter().zip(other.iter())
            .map(|(a, b)| a.check_close(b, tol))
            .collect()
    }
}

/// Flip columns so that the first entry of each column whose magnitude
/// exceeds `zero_tol` is positive.
///
/// Eigenvectors are only defined up to sign; comparing the canonical forms
/// of two bases makes the comparison sign-agnostic.
pub fn canonical_column_signs(m: ArrayView2<'_, f64>, zero_tol: f64) -> Array2<f64> {
    let mut out = m.to_owned();
    for mut col in out.columns_mut() {
        let leading = col.iter().cloned().find(|x| x.abs() > zero_tol);
        if let Some(x) = leading {
            if x < 0.0 {
                col.mapv_inplace(|x| -x);
            }
        }
    }
    out
}
