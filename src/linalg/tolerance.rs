/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::{BadDataError, Result};

/// Threshold at or below which a magnitude is treated as zero.
///
/// This is the single knob behind every rank, pivot and singularity
/// decision in the crate.  It is a plain `Copy` value; whoever owns it
/// (normally an [`Engine`]) passes it into each computation, so a changed
/// tolerance takes effect on the very next call.
///
/// [`Engine`]: crate::Engine
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(1e-11);

    /// Fails for negative, infinite or NaN values.
    pub fn new(eps: f64) -> Result<Tolerance> {
        match eps.is_finite() && eps >= 0.0 {
            true => Ok(Tolerance(eps)),
            false => Err(BadDataError::BadTolerance(eps).into()),
        }
    }

    #[inline]
    pub fn value(self) -> f64 { self.0 }

    /// `|x| <= ε`
    #[inline]
    pub fn is_zero(self, x: f64) -> bool { x.abs() <= self.0 }
}

impl Default for Tolerance {
    fn default() -> Self { Tolerance::DEFAULT }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_garbage() {
        for &bad in &[-1e-12, ::std::f64::NAN, ::std::f64::INFINITY] {
            let err = Tolerance::new(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadData);
        }
        assert_eq!(Tolerance::new(0.0).unwrap().value(), 0.0);
    }

    #[test]
    fn zero_test_is_inclusive() {
        let tol = Tolerance::new(1e-9).unwrap();
        assert!(tol.is_zero(1e-9));
        assert!(tol.is_zero(-1e-9));
        assert!(!tol.is_zero(1.1e-9));

        // an exact tolerance still recognizes exact zeros
        assert!(Tolerance::new(0.0).unwrap().is_zero(0.0));
    }
}
