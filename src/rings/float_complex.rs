use std::f64::EPSILON;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::rings::float_real::Real;

///
/// An approximate implementation of the complex numbers `C`, using 64 bit floating
/// point numbers.
///
/// # Warning
///
/// As for [`Real`], equality and zero-tests are exact floating point comparisons. This
/// field is mainly useful for inputs whose arithmetic stays exact, e.g. small Gaussian
/// integers, or for roots of unity where the result is checked approximately.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    re: f64,
    im: f64
}

impl Complex {

    pub const ZERO: Complex = Complex { re: 0., im: 0. };
    pub const ONE: Complex = Complex { re: 1., im: 0. };
    pub const I: Complex = Complex { re: 0., im: 1. };

    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn conjugate(&self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    pub fn is_absolute_approx_eq(&self, rhs: &Complex, absolute_threshold: f64) -> bool {
        self.sub_ref(rhs).abs() < absolute_threshold
    }

    pub fn is_approx_eq(&self, rhs: &Complex, precision: u64) -> bool {
        let scaled_precision = precision as f64 * EPSILON;
        if self.is_absolute_approx_eq(&Self::ZERO, scaled_precision) {
            rhs.is_absolute_approx_eq(&Self::ZERO, scaled_precision)
        } else {
            self.is_absolute_approx_eq(rhs, self.abs() * scaled_precision)
        }
    }
}

impl From<Real> for Complex {

    fn from(value: Real) -> Self {
        Complex::new(value.value(), 0.)
    }
}

impl Display for Complex {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im == 0. {
            write!(f, "{}", self.re)
        } else if self.re == 0. {
            write!(f, "{}i", self.im)
        } else if self.im < 0. {
            write!(f, "({} - {}i)", self.re, -self.im)
        } else {
            write!(f, "({} + {}i)", self.re, self.im)
        }
    }
}

impl Field for Complex {

    fn add_ref(&self, rhs: &Self) -> Self {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }

    fn negate(&self) -> Self {
        Complex::new(-self.re, -self.im)
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        Complex::new(self.re * rhs.re - self.im * rhs.im, self.re * rhs.im + self.im * rhs.re)
    }

    fn checked_inverse(&self) -> Option<Self> {
        Self::ONE.checked_div(self)
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        // scale the divisor to avoid overflow in the squared norm
        let scale = rhs.re.abs().max(rhs.im.abs());
        let (c, d) = (rhs.re / scale, rhs.im / scale);
        let norm = c * c + d * d;
        let (a, b) = (self.re / scale, self.im / scale);
        return Some(Complex::new((a * c + b * d) / norm, (b * c - a * d) / norm));
    }

    fn zero(&self) -> Self {
        Self::ZERO
    }

    fn one(&self) -> Self {
        Self::ONE
    }

    fn is_zero(&self) -> bool {
        self.re == 0. && self.im == 0.
    }

    fn is_one(&self) -> bool {
        self.re == 1. && self.im == 0.
    }

    fn from_int(&self, value: i64) -> Self {
        Complex::new(value as f64, 0.)
    }
}

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = Complex> {
    [(0., 0.), (1., 0.), (0., 1.), (-1., 0.), (2., 0.), (1., 1.), (0., -2.)].into_iter().map(|(re, im)| Complex::new(re, im))
}

#[test]
fn test_field_axioms() {
    crate::field::generic_tests::test_field_axioms(edge_case_elements());
}

#[test]
fn test_mul_div() {
    assert_eq!(Complex::new(-1., 0.), Complex::I.mul_ref(&Complex::I));
    assert_eq!(Complex::new(0., -1.), Complex::I.inverse());
    assert!(Complex::new(1., 2.).div(&Complex::new(3., -1.)).mul_ref(&Complex::new(3., -1.)).is_approx_eq(&Complex::new(1., 2.), 10));
    assert!(Complex::ONE.try_div(&Complex::ZERO).is_err());
}

#[test]
fn test_display() {
    assert_eq!("2", format!("{}", Complex::new(2., 0.)));
    assert_eq!("3i", format!("{}", Complex::new(0., 3.)));
    assert_eq!("(1 - 2i)", format!("{}", Complex::new(1., -2.)));
}
