/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Characteristic polynomials of 2x2 and 3x3 matrices, and their real roots
//! in closed form.

use crate::error::{Error, Result};

use ::ndarray::ArrayView2;
use ::std::f64::consts::PI;

/// Relative roundoff allowed in a discriminant (or in the depressed cubic's
/// coefficients) before it stops being treated as exactly zero.
///
/// This is a few ulps, not the engine's tolerance.  Roots closer together
/// than roughly `√ROUNDOFF` times the matrix scale cannot be told apart by
/// the closed form anyway; anything farther apart must stay distinct, and a
/// complex pair must stay complex.
pub const ROUNDOFF: f64 = 8.0 * ::std::f64::EPSILON;

/// Largest `|entry|`: the magnitude that the roundoff in every coefficient
/// is measured against.
fn entry_scale(m: ArrayView2<'_, f64>) -> f64 { m.iter().fold(0.0, |acc, x| f64::max(acc, x.abs())) }

/// `λ² - tλ + d` for a matrix with trace `t` and determinant `d`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quadratic {
    pub trace: f64,
    pub det: f64,
    /// Largest `|entry|` of the matrix the coefficients came from.
    pub scale: f64,
}

impl Quadratic {
    pub fn characteristic(m: ArrayView2<'_, f64>) -> Quadratic {
        assert_eq!(m.dim(), (2, 2));
        Quadratic {
            trace: m[(0, 0)] + m[(1, 1)],
            det: m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
            scale: entry_scale(m),
        }
    }

    pub fn discriminant(&self) -> f64 { self.trace * self.trace - 4.0 * self.det }

    /// Both roots in ascending order.
    ///
    /// A negative discriminant no larger than the roundoff in computing it
    /// (a repeated root) is clamped to zero; anything beyond that is an error.
    pub fn real_roots(&self) -> Result<[f64; 2]> {
        let Quadratic { trace, det, scale } = *self;
        let allowance = ROUNDOFF * (trace * trace + 4.0 * det.abs() + 4.0 * scale * scale);
        let disc = match self.discriminant() {
            d if d >= 0.0 => d,
            d if -d <= allowance => 0.0,
            d => return Err(Error::ComplexEigenvalues { discriminant: d }),
        };
        let root = disc.sqrt();
        Ok([(trace - root) / 2.0, (trace + root) / 2.0])
    }
}

/// Monic `λ³ + a2 λ² + a1 λ + a0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cubic {
    pub a2: f64,
    pub a1: f64,
    pub a0: f64,
    /// Largest `|entry|` of the matrix the coefficients came from.
    pub scale: f64,
}

/// Roots of a cubic, sorted by which formula produced them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CubicRoots {
    /// Three distinct roots: `[largest, smallest, middle]`.
    Distinct([f64; 3]),
    /// One single and one double root.  `[single, double, double]` when the
    /// single root is the larger, otherwise `[double, single, double]`.
    Double([f64; 3]),
    Triple(f64),
}

impl CubicRoots {
    pub fn values(&self) -> [f64; 3] {
        match *self {
            CubicRoots::Distinct(v) | CubicRoots::Double(v) => v,
            CubicRoots::Triple(x) => [x; 3],
        }
    }
}

impl Cubic {
    /// `det(λI - A)` for a 3x3 `A`.
    pub fn characteristic(m: ArrayView2<'_, f64>) -> Cubic {
        assert_eq!(m.dim(), (3, 3));
        let a = |i: usize, j: usize| m[(i, j)];
        let minor = |i: usize, j: usize| a(i, i) * a(j, j) - a(i, j) * a(j, i);

        let trace = a(0, 0) + a(1, 1) + a(2, 2);
        let det = {
            a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1))
            - a(0, 1) * (a(1, 0) * a(2, 2) - a(1, 2) * a(2, 0))
            + a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0))
        };
        Cubic {
            a2: -trace,
            a1: minor(0, 1) + minor(0, 2) + minor(1, 2),
            a0: -det,
            scale: entry_scale(m),
        }
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 { ((x + self.a2) * x + self.a1) * x + self.a0 }

    /// Real roots through the depressed cubic `t³ + pt + q` (with
    /// `λ = t - a2/3`), using the trigonometric form for three distinct roots.
    ///
    /// The repeated-root formulas are only used when the discriminant is
    /// zero to within the roundoff of the coefficients that produced it;
    /// the root is triple when `p` is also zero to within its roundoff.
    pub fn real_roots(&self) -> Result<CubicRoots> {
        let Cubic { a2, a1, a0, scale } = *self;
        let shift = -a2 / 3.0;

        let p = a1 - a2 * a2 / 3.0;
        let q = 2.0 * a2 * a2 * a2 / 27.0 - a2 * a1 / 3.0 + a0;

        // absolute roundoff in p and q; the coefficients themselves carry
        // error proportional to scale² and scale³
        let p_err = ROUNDOFF * (a2 * a2 / 3.0 + a1.abs() + 2.0 * scale * scale);
        let q_err = ROUNDOFF * {
            (2.0 * a2 * a2 * a2 / 27.0).abs() + (a2 * a1 / 3.0).abs() + a0.abs()
            + 2.0 * scale * scale * scale
        };

        let half_q = q / 2.0;
        let third_p = p / 3.0;
        let disc = half_q * half_q + third_p * third_p * third_p;
        let disc_err = half_q.abs() * q_err + third_p * third_p * p_err;

        if disc.abs() <= disc_err {
            if p.abs() <= p_err {
                return Ok(CubicRoots::Triple(shift));
            }
            debug_assert!(p != 0.0);
            let single = 3.0 * q / p + shift;
            let double = -3.0 * q / (2.0 * p) + shift;
            return Ok(CubicRoots::Double(match single > double {
                true => [single, double, double],
                false => [double, single, double],
            }));
        }

        if disc > 0.0 {
            return Err(Error::ComplexEigenvalues { discriminant: disc });
        }

        // disc < 0 implies p < 0
        let r = -half_q;
        let cos_theta = r / (-third_p * third_p * third_p).sqrt();
        let theta = cos_theta.max(-1.0).min(1.0).acos();
        let amplitude = 2.0 * (-third_p).sqrt();
        let root = |k: f64| amplitude * ((theta + 2.0 * PI * k) / 3.0).cos() + shift;
        Ok(CubicRoots::Distinct([root(0.0), root(1.0), root(2.0)]))
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use ::ndarray::array;

    fn cubic(a2: f64, a1: f64, a0: f64) -> Cubic { Cubic { a2, a1, a0, scale: 1.0 } }

    #[test]
    fn quadratic() {
        let poly = Quadratic::characteristic(array![[0.0, 1.0], [-2.0, -3.0]].view());
        assert_eq!(poly, Quadratic { trace: -3.0, det: 2.0, scale: 3.0 });
        assert_close!(poly.real_roots().unwrap(), [-2.0, -1.0]);

        let poly = Quadratic::characteristic(array![[1.0, -2.0], [-2.0, 0.0]].view());
        let s17 = 17f64.sqrt();
        assert_close!(poly.real_roots().unwrap(), [(1.0 - s17) / 2.0, (1.0 + s17) / 2.0]);
    }

    #[test]
    fn quadratic_repeated_root_with_roundoff() {
        // exact double root at 0.1, but det cancels two much larger products
        let poly = Quadratic::characteristic(array![
            [0.7999999999999999, 0.1],
            [-4.8999999999999995, -0.6],
        ].view());
        assert!(poly.discriminant() < 0.0);
        assert_close!(abs=1e-12, poly.real_roots().unwrap(), [0.1, 0.1]);
    }

    #[test]
    fn quadratic_close_roots_stay_apart() {
        let poly = Quadratic::characteristic(array![[1.0, 0.0], [0.0, 1.0 + 1e-6]].view());
        assert_close!(abs=1e-9, poly.real_roots().unwrap(), [1.0, 1.0 + 1e-6]);
    }

    #[test]
    fn quadratic_complex() {
        // rotation
        let poly = Quadratic::characteristic(array![[0.0, -1.0], [1.0, 0.0]].view());
        match poly.real_roots() {
            Err(Error::ComplexEigenvalues { discriminant }) => assert_eq!(discriminant, -4.0),
            r => panic!("{:?}", r),
        }

        // 1 ± 1e-6 i is far larger than roundoff
        let poly = Quadratic::characteristic(array![[1.0, 1e-6], [-1e-6, 1.0]].view());
        match poly.real_roots() {
            Err(Error::ComplexEigenvalues { discriminant }) => assert_close!(rel=1e-3, discriminant, -4e-12),
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn cubic_coefficients() {
        let poly = Cubic::characteristic(array![
            [-2.0, -4.0, 2.0],
            [-2.0, 1.0, 2.0],
            [4.0, 2.0, 5.0],
        ].view());
        assert_eq!(poly, Cubic { a2: -4.0, a1: -27.0, a0: 90.0, scale: 5.0 });
        for &x in &[6.0, -5.0, 3.0] {
            assert_eq!(poly.eval(x), 0.0);
        }
    }

    #[test]
    fn distinct_order() {
        // (λ - 6)(λ + 5)(λ - 3)
        match cubic(-4.0, -27.0, 90.0).real_roots().unwrap() {
            CubicRoots::Distinct(v) => assert_close!(abs=1e-12, v, [6.0, -5.0, 3.0]),
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn close_roots_stay_distinct() {
        for &gap in &[1e-4, 1e-5, 1e-6] {
            let poly = Cubic::characteristic(array![
                [1.0, 0.0, 0.0],
                [0.0, 1.0 + gap, 0.0],
                [0.0, 0.0, 4.0],
            ].view());
            match poly.real_roots().unwrap() {
                CubicRoots::Distinct(v) => assert_close!(abs=1e-8, v, [4.0, 1.0, 1.0 + gap], "gap = {}", gap),
                r => panic!("gap = {}: {:?}", gap, r),
            }
        }
    }

    #[test]
    fn double_order() {
        // (λ - 2)²(λ - 1): single root is the smaller
        match cubic(-5.0, 8.0, -4.0).real_roots().unwrap() {
            CubicRoots::Double(v) => assert_close!(abs=1e-12, v, [2.0, 1.0, 2.0]),
            r => panic!("{:?}", r),
        }

        // (λ - 1)²(λ - 4): single root is the larger
        match cubic(-6.0, 9.0, -4.0).real_roots().unwrap() {
            CubicRoots::Double(v) => assert_close!(abs=1e-12, v, [4.0, 1.0, 1.0]),
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn triple() {
        // (λ - 1)³
        let roots = cubic(-3.0, 3.0, -1.0).real_roots().unwrap();
        assert_eq!(roots, CubicRoots::Triple(1.0));
        assert_eq!(roots.values(), [1.0; 3]);

        let roots = Cubic::characteristic(array![
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 2.0],
        ].view()).real_roots().unwrap();
        assert_eq!(roots, CubicRoots::Triple(2.0));

        let roots = Cubic { a2: 0.0, a1: 0.0, a0: 0.0, scale: 0.0 }.real_roots().unwrap();
        assert_eq!(roots.values(), [0.0; 3]);
    }

    #[test]
    fn complex_pair() {
        // (λ - 1)(λ² + 1)
        match cubic(-1.0, 1.0, -1.0).real_roots() {
            Err(Error::ComplexEigenvalues { discriminant }) => assert!(discriminant > 0.0),
            r => panic!("{:?}", r),
        }
    }
}
