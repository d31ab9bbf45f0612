//! Scalar trait for storage element types.
//!
//! Dense storage comes in exactly two element types, `f64` and [`c64`].
//! Handlers are written once, generic over [`Scalar`], and instantiated for
//! both.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

pub use faer::c64;

/// Trait for scalar types supported by dense storage.
///
/// This wraps faer's `ComplexField` (needed by the GEMM contraction path)
/// with the arithmetic and conversion bounds used by the storage handlers.
pub trait Scalar:
    ComplexField
    + Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + MulAssign
    + Sum
{
    /// Whether values of this type carry an imaginary part.
    const IS_COMPLEX: bool;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embed a real number.
    fn from_real(r: f64) -> Self;

    /// Complex conjugate (identity for real types).
    fn conjugate(self) -> Self;

    /// Squared magnitude `|x|^2`.
    fn abs_sqr(self) -> f64;

    fn real_part(self) -> f64;

    fn imag_part(self) -> f64;

    /// Widen to a complex value.
    fn to_c64(self) -> c64 {
        c64::new(self.real_part(), self.imag_part())
    }
}

impl Scalar for f64 {
    const IS_COMPLEX: bool = false;

    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    #[inline]
    fn abs_sqr(self) -> f64 {
        self * self
    }

    #[inline]
    fn real_part(self) -> f64 {
        self
    }

    #[inline]
    fn imag_part(self) -> f64 {
        0.0
    }
}

impl Scalar for c64 {
    const IS_COMPLEX: bool = true;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        c64::new(r, 0.0)
    }

    #[inline]
    fn conjugate(self) -> Self {
        c64::new(self.re, -self.im)
    }

    #[inline]
    fn abs_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn real_part(self) -> f64 {
        self.re
    }

    #[inline]
    fn imag_part(self) -> f64 {
        self.im
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_flags() {
        assert!(!<f64 as Scalar>::IS_COMPLEX);
        assert!(<c64 as Scalar>::IS_COMPLEX);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(<f64 as Scalar>::zero(), 0.0);
        assert_eq!(<f64 as Scalar>::one(), 1.0);
        assert_eq!(<c64 as Scalar>::zero(), c64::new(0.0, 0.0));
        assert_eq!(<c64 as Scalar>::one(), c64::new(1.0, 0.0));
    }

    #[test]
    fn test_conjugate_and_parts() {
        let z = c64::new(1.0, -2.0);
        assert_eq!(z.conjugate(), c64::new(1.0, 2.0));
        assert_eq!(z.real_part(), 1.0);
        assert_eq!(z.imag_part(), -2.0);
        assert_eq!(z.abs_sqr(), 5.0);

        assert_eq!(3.0_f64.conjugate(), 3.0);
        assert_eq!((-3.0_f64).abs_sqr(), 9.0);
        assert_eq!(3.0_f64.imag_part(), 0.0);
    }

    #[test]
    fn test_to_c64() {
        assert_eq!(2.5_f64.to_c64(), c64::new(2.5, 0.0));
        assert_eq!(c64::new(1.0, 4.0).to_c64(), c64::new(1.0, 4.0));
    }
}
