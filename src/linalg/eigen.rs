/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::{Error, Result, DimensionError};
use crate::matrix::Matrix;
use crate::poly::{Cubic, CubicRoots, Quadratic};

use ::std::fmt;
use ::std::str;

/// Algorithm used to compute eigenvalues.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EigenMethod {
    /// Roots of the characteristic polynomial in closed form.
    /// Supports 2x2 and 3x3 matrices.
    ClosedFormPolynomialRoot,
}

impl EigenMethod {
    pub const ALL: &'static [EigenMethod] = &[EigenMethod::ClosedFormPolynomialRoot];

    /// The canonical identifier, as printed by `Display`.
    pub fn name(self) -> &'static str {
        match self {
            EigenMethod::ClosedFormPolynomialRoot => "closed-form-polynomial-root",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            EigenMethod::ClosedFormPolynomialRoot => &[
                "closed-form-polynomial-root",
                "closedFormPolynomialRootMethod",
                "CLOSED_FORM_POLYNOMIAL_ROOT_METHOD",
            ],
        }
    }
}

impl Default for EigenMethod {
    fn default() -> Self { EigenMethod::ClosedFormPolynomialRoot }
}

impl fmt::Display for EigenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { fmt::Display::fmt(self.name(), f) }
}

impl str::FromStr for EigenMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EigenMethod::ALL.iter().cloned()
            .find(|method| method.aliases().contains(&s))
            .ok_or_else(|| Error::InvalidMethod { name: s.to_string() })
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use ::serde::{Serialize, Deserialize, ser, de};

    impl Serialize for EigenMethod {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
            self.name().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for EigenMethod {
        fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(&raw), &"an eigenvalue method name")
            })
        }
    }
}

/// Eigenvalues of a 2x2 or 3x3 matrix.
///
/// The order is whatever the root formula produces and is never sorted:
///
/// * 2x2: `[(tr - √D)/2, (tr + √D)/2]`
/// * 3x3, distinct roots: `[largest, smallest, middle]`
/// * 3x3, a double root `d` and single root `s`: `[s, d, d]` if `s > d`,
///   otherwise `[d, s, d]`.
///
/// Complex roots are reported as [`Error::ComplexEigenvalues`].
pub fn eigenvalues(m: &Matrix, method: EigenMethod) -> Result<Vec<f64>> {
    match method {
        EigenMethod::ClosedFormPolynomialRoot => closed_form(m),
    }
}

fn closed_form(m: &Matrix) -> Result<Vec<f64>> {
    match m.dims() {
        (2, 2) => Ok(Quadratic::characteristic(m.as_array()).real_roots()?.to_vec()),
        (3, 3) => {
            let roots = Cubic::characteristic(m.as_array()).real_roots()?;
            match roots {
                CubicRoots::Distinct(_) => {},
                CubicRoots::Double(_) => debug!("eigenvalues: characteristic cubic has a double root"),
                CubicRoots::Triple(_) => debug!("eigenvalues: characteristic cubic has a triple root"),
            }
            Ok(roots.values().to_vec())
        },
        (rows, cols) => Err(DimensionError::UnsupportedEigenSize { rows, cols }.into()),
    }
}
