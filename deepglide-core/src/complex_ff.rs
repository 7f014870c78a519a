use std::ops::{Add, Mul, Neg, Sub};

use crate::complex::Complex;
use crate::float_float::FloatFloat;

/// [`Complex`] with float-pair components: ~48 bits per axis.
///
/// The deep-zoom evaluators iterate on this once the view span drops below
/// the extended-precision threshold and plain `f32` coordinates start
/// collapsing neighboring pixels onto each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexFf {
    pub re: FloatFloat,
    pub im: FloatFloat,
}

impl ComplexFf {
    pub const ZERO: Self = Self {
        re: FloatFloat::ZERO,
        im: FloatFloat::ZERO,
    };

    #[inline]
    pub fn new(re: FloatFloat, im: FloatFloat) -> Self {
        Self { re, im }
    }

    /// Split a pair of `f64` coordinates into emulated-precision components.
    #[inline]
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self {
            re: FloatFloat::from_f64(re),
            im: FloatFloat::from_f64(im),
        }
    }

    /// Squared magnitude for the escape test, in pair precision.
    #[inline]
    pub fn norm_sq(self) -> FloatFloat {
        self.re.sqr() + self.im.sqr()
    }

    /// The square `z²` with per-axis [`FloatFloat::sqr`] on the real part.
    ///
    /// Mirrors [`Complex::sqr`] so both precision paths spell the
    /// quadratic-map step identically.
    #[inline]
    pub fn sqr(self) -> Self {
        Self {
            re: self.re.sqr() - self.im.sqr(),
            im: (self.re * self.im) * 2.0,
        }
    }

    /// Downcast to the native complex type (drops the `lo` parts).
    #[inline]
    pub fn to_complex(self) -> Complex {
        Complex::new(self.re.to_f32(), self.im.to_f32())
    }
}

impl From<Complex> for ComplexFf {
    #[inline]
    fn from(c: Complex) -> Self {
        Self {
            re: FloatFloat::from(c.re),
            im: FloatFloat::from(c.im),
        }
    }
}

// -- Arithmetic operators --

impl Add for ComplexFf {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for ComplexFf {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for ComplexFf {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Neg for ComplexFf {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl Mul<FloatFloat> for ComplexFf {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: FloatFloat) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::fmt::Display for ComplexFf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}·i", self.re, self.im)
    }
}
