use std::fmt::{Debug, Display};

use crate::error::AlgebraError;

///
/// The arithmetic contract shared by all coefficient fields.
///
/// Elements carry everything required to do arithmetic with them, so there is
/// no separate ring object; in particular, [`Field::zero()`] and [`Field::one()`]
/// return the neutral elements of the field that `self` belongs to (this matters
/// e.g. for prime fields, where the modulus is part of the element).
///
/// Combining elements of different fields (e.g. two prime field elements with different
/// moduli) is a precondition violation, and panics. Use [`Field::check_compatible()`] or
/// the `try_` functions to get an [`AlgebraError`] instead.
///
pub trait Field: Clone + PartialEq + Debug + Display {

    ///
    /// Returns an error if `self` and `rhs` do not belong to the same field.
    ///
    fn check_compatible(&self, _rhs: &Self) -> Result<(), AlgebraError> {
        Ok(())
    }

    fn add_ref(&self, rhs: &Self) -> Self;

    fn negate(&self) -> Self;

    fn sub_ref(&self, rhs: &Self) -> Self {
        self.add_ref(&rhs.negate())
    }

    fn mul_ref(&self, rhs: &Self) -> Self;

    ///
    /// Returns the multiplicative inverse, or `None` if `self` is zero.
    ///
    fn checked_inverse(&self) -> Option<Self>;

    fn zero(&self) -> Self;

    fn one(&self) -> Self;

    fn is_zero(&self) -> bool;

    fn is_one(&self) -> bool {
        *self == self.one()
    }

    ///
    /// Maps an integer into the field that `self` belongs to.
    ///
    fn from_int(&self, value: i64) -> Self;

    fn try_inverse(&self) -> Result<Self, AlgebraError> {
        self.checked_inverse().ok_or_else(|| AlgebraError::field("inverse of zero"))
    }

    fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(result) => result,
            Err(e) => panic!("{}", e)
        }
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        rhs.checked_inverse().map(|inv| self.mul_ref(&inv))
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        self.checked_div(rhs).ok_or_else(|| AlgebraError::field("division by zero"))
    }

    fn div(&self, rhs: &Self) -> Self {
        assert!(!rhs.is_zero(), "{}", AlgebraError::field("division by zero"));
        match self.try_div(rhs) {
            Ok(result) => result,
            Err(e) => panic!("{}", e)
        }
    }
}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {
    use super::*;

    ///
    /// Checks the field axioms on all pairs and triples of the given elements.
    ///
    /// Equality is checked exactly, so for floating-point fields, only pass elements for
    /// which all operations are exact (e.g. small integers).
    ///
    pub fn test_field_axioms<F: Field, I: Iterator<Item = F>>(edge_case_elements: I) {
        let elements = edge_case_elements.collect::<Vec<_>>();
        for a in &elements {
            let zero = a.zero();
            let one = a.one();
            assert!(zero.is_zero());
            assert!(one.is_one());
            assert_eq!(*a, a.add_ref(&zero), "{} + 0 != {}", a, a);
            assert_eq!(*a, a.mul_ref(&one), "{} * 1 != {}", a, a);
            assert!(a.add_ref(&a.negate()).is_zero(), "{} - {} != 0", a, a);
            assert_eq!(*a, a.negate().negate());
            if !a.is_zero() {
                assert!(a.mul_ref(&a.inverse()).is_one(), "{} * {}^-1 != 1", a, a);
                assert!(a.div(a).is_one());
            } else {
                assert!(a.checked_inverse().is_none());
                assert!(a.try_inverse().is_err());
            }
        }
        for a in &elements {
            for b in &elements {
                assert_eq!(a.add_ref(b), b.add_ref(a), "addition of {} and {} is not commutative", a, b);
                assert_eq!(a.mul_ref(b), b.mul_ref(a), "multiplication of {} and {} is not commutative", a, b);
                assert_eq!(a.sub_ref(b), a.add_ref(&b.negate()));
                if !b.is_zero() {
                    assert_eq!(*a, a.div(b).mul_ref(b), "({} / {}) * {} != {}", a, b, b, a);
                } else {
                    assert!(a.checked_div(b).is_none());
                }
            }
        }
        for a in &elements {
            for b in &elements {
                for c in &elements {
                    assert_eq!(a.add_ref(b).add_ref(c), a.add_ref(&b.add_ref(c)));
                    assert_eq!(a.mul_ref(b).mul_ref(c), a.mul_ref(&b.mul_ref(c)));
                    assert_eq!(a.mul_ref(&b.add_ref(c)), a.mul_ref(b).add_ref(&a.mul_ref(c)), "{} * ({} + {}) is not distributive", a, b, c);
                }
            }
        }
    }
}
