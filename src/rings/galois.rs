use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::algorithms::miller_rabin::{is_prime, pow_mod};
use crate::error::AlgebraError;
use crate::field::Field;

///
/// An element of the prime field `Fp = Z/pZ`.
///
/// The modulus is stored with every element, and it is checked for primality on
/// construction. The residue is always kept in `[0, p)`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SerializedGaloisFieldElement")]
pub struct GaloisFieldElement {
    value: u64,
    modulus: u64
}

///
/// The unchecked serialized form of a [`GaloisFieldElement`].
///
#[derive(Deserialize)]
#[serde(rename = "GaloisFieldElement")]
struct SerializedGaloisFieldElement {
    value: u64,
    modulus: u64
}

impl TryFrom<SerializedGaloisFieldElement> for GaloisFieldElement {
    type Error = AlgebraError;

    fn try_from(serialized: SerializedGaloisFieldElement) -> Result<Self, AlgebraError> {
        GaloisFieldElement::from_residue(serialized.value, serialized.modulus)
    }
}

impl GaloisFieldElement {

    ///
    /// Creates the residue class of `value` modulo `modulus`, or returns an error
    /// if `modulus` is not prime.
    ///
    pub fn new(value: i64, modulus: u64) -> Result<Self, AlgebraError> {
        if !is_prime(modulus, 10) {
            return Err(AlgebraError::field(format!("modulus {} is not prime", modulus)));
        }
        Ok(Self::new_unchecked(value, modulus))
    }

    ///
    /// Same as [`GaloisFieldElement::new()`], but takes an unsigned residue.
    ///
    pub fn from_residue(value: u64, modulus: u64) -> Result<Self, AlgebraError> {
        if !is_prime(modulus, 10) {
            return Err(AlgebraError::field(format!("modulus {} is not prime", modulus)));
        }
        Ok(GaloisFieldElement { value: value % modulus, modulus })
    }

    fn new_unchecked(value: i64, modulus: u64) -> Self {
        let value = (value as i128).rem_euclid(modulus as i128) as u64;
        GaloisFieldElement { value, modulus }
    }

    ///
    /// Returns a uniformly random element of `Fp`, where `p` is the modulus of `self`.
    ///
    pub fn random(&self, rng: &mut oorandom::Rand64) -> Self {
        GaloisFieldElement { value: rng.rand_range(0..self.modulus), modulus: self.modulus }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    ///
    /// Returns the representative of `self` in `(-p/2, p/2]`.
    ///
    pub fn smallest_lift(&self) -> i64 {
        if self.value > self.modulus / 2 {
            -((self.modulus - self.value) as i64)
        } else {
            self.value as i64
        }
    }

    fn assert_compatible(&self, rhs: &Self) {
        if let Err(e) = self.check_compatible(rhs) {
            panic!("{}", e);
        }
    }
}

impl Display for GaloisFieldElement {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Field for GaloisFieldElement {

    fn check_compatible(&self, rhs: &Self) -> Result<(), AlgebraError> {
        if self.modulus != rhs.modulus {
            return Err(AlgebraError::field(format!("cannot combine elements of F{} and F{}", self.modulus, rhs.modulus)));
        }
        Ok(())
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        self.assert_compatible(rhs);
        let sum = (self.value as u128 + rhs.value as u128) % self.modulus as u128;
        GaloisFieldElement { value: sum as u64, modulus: self.modulus }
    }

    fn negate(&self) -> Self {
        if self.value == 0 {
            *self
        } else {
            GaloisFieldElement { value: self.modulus - self.value, modulus: self.modulus }
        }
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        self.assert_compatible(rhs);
        let product = (self.value as u128 * rhs.value as u128) % self.modulus as u128;
        GaloisFieldElement { value: product as u64, modulus: self.modulus }
    }

    fn checked_inverse(&self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }
        // extended euclidean algorithm on (value, modulus)
        let (mut a, mut b) = (self.value as i128, self.modulus as i128);
        let (mut sa, mut sb) = (1i128, 0i128);
        while b != 0 {
            let q = a / b;
            (a, b) = (b, a - q * b);
            (sa, sb) = (sb, sa - q * sb);
        }
        debug_assert_eq!(1, a);
        Some(GaloisFieldElement { value: sa.rem_euclid(self.modulus as i128) as u64, modulus: self.modulus })
    }

    fn zero(&self) -> Self {
        GaloisFieldElement { value: 0, modulus: self.modulus }
    }

    fn one(&self) -> Self {
        GaloisFieldElement { value: 1 % self.modulus, modulus: self.modulus }
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }

    fn is_one(&self) -> bool {
        self.value == 1
    }

    fn from_int(&self, value: i64) -> Self {
        Self::new_unchecked(value, self.modulus)
    }
}

impl GaloisFieldElement {

    pub fn pow(&self, exponent: u64) -> Self {
        GaloisFieldElement { value: pow_mod(self.value, exponent, self.modulus), modulus: self.modulus }
    }
}

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = GaloisFieldElement> {
    (0..7).map(|x| GaloisFieldElement::new(x, 7).unwrap())
}

#[test]
fn test_field_axioms() {
    crate::field::generic_tests::test_field_axioms(edge_case_elements());
}

#[test]
fn test_random_field_axioms() {
    let mut rng = oorandom::Rand64::new(1);
    let base = GaloisFieldElement::new(0, 1000003).unwrap();
    crate::field::generic_tests::test_field_axioms((0..8).map(|_| base.random(&mut rng)));
}

#[test]
fn test_normalization() {
    assert_eq!(3, GaloisFieldElement::new(-2, 5).unwrap().value());
    assert_eq!(0, GaloisFieldElement::new(10, 5).unwrap().value());
    assert_eq!(4, GaloisFieldElement::new(4, 5).unwrap().value());
    assert_eq!(1, GaloisFieldElement::new(i64::MIN, 3).unwrap().value());
    for x in -20..20 {
        let a = GaloisFieldElement::new(x, 11).unwrap();
        assert!(a.value() < 11);
        assert_eq!(x.rem_euclid(11) as u64, a.value());
    }
    assert_eq!(-1, GaloisFieldElement::new(4, 5).unwrap().smallest_lift());
}

#[test]
fn test_reject_composite_modulus() {
    for p in [0, 1, 4, 6, 9, 15, 561] {
        assert!(matches!(GaloisFieldElement::new(1, p), Err(AlgebraError::FieldConstruction(_))), "accepted modulus {}", p);
    }
}

#[test]
fn test_inverse() {
    let a = GaloisFieldElement::new(3, 5).unwrap();
    assert_eq!(GaloisFieldElement::new(2, 5).unwrap(), a.inverse());
    assert!(a.zero().checked_inverse().is_none());
    assert_eq!(a.inverse(), a.pow(3));
}

#[test]
#[should_panic]
fn test_mixed_moduli() {
    let a = GaloisFieldElement::new(1, 5).unwrap();
    let b = GaloisFieldElement::new(1, 7).unwrap();
    _ = a.add_ref(&b);
}

#[test]
fn test_try_div_mixed_moduli() {
    let a = GaloisFieldElement::new(1, 5).unwrap();
    let b = GaloisFieldElement::new(1, 7).unwrap();
    assert!(a.try_div(&b).is_err());
}
