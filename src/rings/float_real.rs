use std::f64::EPSILON;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::field::Field;

///
/// An approximate implementation of the real numbers `R`, using 64-bit floating point
/// numbers.
///
/// # Warning
///
/// Equality is the exact equality of `f64`, and it is also what [`Field::is_zero()`] uses.
/// Since Groebner basis algorithms decide on cancellation by comparing with zero, results
/// computed over this field may contain terms with tiny coefficients that would cancel in exact
/// arithmetic. Prefer [`crate::rings::rational::Rational`] whenever the input is rational.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Real(pub f64);

impl Real {

    pub const ZERO: Real = Real(0.);
    pub const ONE: Real = Real(1.);

    pub fn new(value: f64) -> Self {
        Real(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_absolute_approx_eq(&self, rhs: &Real, absolute_threshold: f64) -> bool {
        (self.0 - rhs.0).abs() < absolute_threshold
    }

    pub fn is_relative_approx_eq(&self, rhs: &Real, relative_threshold: f64) -> bool {
        self.is_absolute_approx_eq(rhs, self.0.abs() * relative_threshold)
    }

    pub fn is_approx_eq(&self, rhs: &Real, precision: u64) -> bool {
        let scaled_precision = precision as f64 * EPSILON;
        if self.is_absolute_approx_eq(&Self::ZERO, scaled_precision) {
            rhs.is_absolute_approx_eq(&Self::ZERO, scaled_precision)
        } else {
            self.is_relative_approx_eq(rhs, scaled_precision)
        }
    }
}

impl Display for Real {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Field for Real {

    fn add_ref(&self, rhs: &Self) -> Self {
        Real(self.0 + rhs.0)
    }

    fn negate(&self) -> Self {
        Real(-self.0)
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        Real(self.0 - rhs.0)
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        Real(self.0 * rhs.0)
    }

    fn checked_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Real(1. / self.0))
        }
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            None
        } else {
            Some(Real(self.0 / rhs.0))
        }
    }

    fn zero(&self) -> Self {
        Self::ZERO
    }

    fn one(&self) -> Self {
        Self::ONE
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.
    }

    fn is_one(&self) -> bool {
        self.0 == 1.
    }

    fn from_int(&self, value: i64) -> Self {
        Real(value as f64)
    }
}

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = Real> {
    [-4., -1., 0., 1., 2., 8.].into_iter().map(Real)
}

#[test]
fn test_field_axioms() {
    crate::field::generic_tests::test_field_axioms(edge_case_elements());
}

#[test]
fn test_division_by_zero() {
    assert!(Real(1.).try_div(&Real::ZERO).is_err());
    assert_eq!(Real(0.25), Real(1.).div(&Real(4.)));
}

#[test]
fn test_approx_eq() {
    assert!(Real(0.1 + 0.2).is_approx_eq(&Real(0.3), 10));
    assert!(!Real(0.1).is_approx_eq(&Real(0.3), 10));
}
