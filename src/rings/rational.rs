use std::cmp::Ordering;
use std::fmt::Display;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::field::Field;

///
/// An element of the field of rational numbers `Q`, stored as a fraction of arbitrary-precision
/// integers.
///
/// The fraction is always reduced, and the denominator is always positive. In particular,
/// the derived equality is the equality of rational numbers.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SerializedRational")]
pub struct Rational {
    num: BigInt,
    den: BigInt
}

///
/// The serialized form of a [`Rational`], which is not necessarily reduced.
///
#[derive(Deserialize)]
#[serde(rename = "Rational")]
struct SerializedRational {
    num: BigInt,
    den: BigInt
}

impl TryFrom<SerializedRational> for Rational {
    type Error = AlgebraError;

    fn try_from(serialized: SerializedRational) -> Result<Self, AlgebraError> {
        Rational::new(serialized.num, serialized.den)
    }
}

impl Rational {

    ///
    /// Creates the reduced fraction `num / den`, or returns an error if `den` is zero.
    ///
    pub fn new<N: Into<BigInt>, D: Into<BigInt>>(num: N, den: D) -> Result<Self, AlgebraError> {
        let num = num.into();
        let den = den.into();
        if den.is_zero() {
            return Err(AlgebraError::field("zero denominator"));
        }
        return Ok(Self::from_fraction_unchecked(num, den));
    }

    ///
    /// Same as [`Rational::new()`], but panics if the denominator is zero.
    ///
    pub fn from_fraction<N: Into<BigInt>, D: Into<BigInt>>(num: N, den: D) -> Self {
        match Self::new(num, den) {
            Ok(result) => result,
            Err(e) => panic!("{}", e)
        }
    }

    pub fn from_integer<N: Into<BigInt>>(value: N) -> Self {
        Rational { num: value.into(), den: BigInt::one() }
    }

    fn from_fraction_unchecked(num: BigInt, den: BigInt) -> Self {
        debug_assert!(!den.is_zero());
        let gcd = num.gcd(&den);
        let (mut num, mut den) = (num / &gcd, den / &gcd);
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        return Rational { num, den };
    }

    pub fn zero_el() -> Self {
        Self::from_integer(0)
    }

    pub fn one_el() -> Self {
        Self::from_integer(1)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.num
    }

    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    pub fn is_integral(&self) -> bool {
        self.den.is_one()
    }
}

impl PartialOrd for Rational {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {

    fn cmp(&self, other: &Self) -> Ordering {
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl Display for Rational {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl Field for Rational {

    fn add_ref(&self, rhs: &Self) -> Self {
        if self.num.is_zero() {
            return rhs.clone();
        } else if rhs.num.is_zero() {
            return self.clone();
        }
        let den_gcd = self.den.gcd(&rhs.den);
        let lhs_factor = &rhs.den / &den_gcd;
        let rhs_factor = &self.den / &den_gcd;
        Self::from_fraction_unchecked(&self.num * &lhs_factor + &rhs.num * &rhs_factor, &self.den * lhs_factor)
    }

    fn negate(&self) -> Self {
        Rational { num: -&self.num, den: self.den.clone() }
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        if self.num.is_zero() || rhs.num.is_zero() {
            return Self::zero_el();
        }
        // cross-reduce first to keep the intermediate values small
        let g1 = self.num.gcd(&rhs.den);
        let g2 = rhs.num.gcd(&self.den);
        let num = (&self.num / &g1) * (&rhs.num / &g2);
        let den = (&self.den / &g2) * (&rhs.den / &g1);
        Rational { num, den }
    }

    fn checked_inverse(&self) -> Option<Self> {
        if self.num.is_zero() {
            None
        } else {
            Some(Self::from_fraction_unchecked(self.den.clone(), self.num.clone()))
        }
    }

    fn zero(&self) -> Self {
        Self::zero_el()
    }

    fn one(&self) -> Self {
        Self::one_el()
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    fn from_int(&self, value: i64) -> Self {
        Self::from_integer(value)
    }
}

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = Rational> {
    (-3..4).flat_map(|x| [1, 2, -3].into_iter().map(move |y| Rational::from_fraction(x, y)))
}

#[test]
fn test_field_axioms() {
    crate::field::generic_tests::test_field_axioms(edge_case_elements());
}

#[test]
fn test_normal_form() {
    let a = Rational::from_fraction(4, -6);
    assert_eq!(&BigInt::from(-2), a.numerator());
    assert_eq!(&BigInt::from(3), a.denominator());
    assert_eq!(Rational::from_fraction(-2, 3), a);
    assert_eq!(Rational::zero_el(), Rational::from_fraction(0, -5));
    assert_eq!("-2/3", format!("{}", a));
    assert_eq!("7", format!("{}", Rational::from_integer(7)));
}

#[test]
fn test_zero_denominator() {
    assert!(matches!(Rational::new(1, 0), Err(AlgebraError::FieldConstruction(_))));
    assert!(Rational::one_el().try_div(&Rational::zero_el()).is_err());
}

#[test]
fn test_add_mul() {
    let half = Rational::from_fraction(1, 2);
    let third = Rational::from_fraction(1, 3);
    assert_eq!(Rational::from_fraction(5, 6), half.add_ref(&third));
    assert_eq!(Rational::from_fraction(1, 6), half.mul_ref(&third));
    assert_eq!(Rational::from_fraction(3, 2), half.div(&third));
    assert!(half.add_ref(&half).is_one());
    assert!(third < half);
}
