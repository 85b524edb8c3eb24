use std::fmt::Display;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::field::Field;
use crate::rings::float_complex::Complex;
use crate::rings::float_real::Real;
use crate::rings::galois::GaloisFieldElement;
use crate::rings::rational::Rational;

///
/// The closed set of coefficient fields supported by this crate.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Real,
    Rational,
    Complex,
    /// The prime field with the given modulus
    Galois(u64)
}

impl Display for FieldKind {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Real => write!(f, "R"),
            FieldKind::Rational => write!(f, "Q"),
            FieldKind::Complex => write!(f, "C"),
            FieldKind::Galois(p) => write!(f, "GF[{}]", p)
        }
    }
}

///
/// A field element whose field is only known at runtime.
///
/// This is used at untyped boundaries, e.g. when coefficients come from parsed text
/// and the field is chosen by configuration. Arithmetic between different variants
/// is a precondition violation, see [`Field::check_compatible()`]. Use
/// [`Numeric::try_assign()`] to move a value into another field first.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Numeric {
    Real(Real),
    Rational(Rational),
    Complex(Complex),
    Galois(GaloisFieldElement)
}

fn integral_f64(value: f64, target: FieldKind) -> Result<BigInt, AlgebraError> {
    if value.fract() != 0. || !value.is_finite() {
        return Err(AlgebraError::conversion(format!("{} has a fractional part and cannot be represented in {}", value, target)));
    }
    BigInt::from_f64(value).ok_or_else(|| AlgebraError::conversion(format!("{} is not representable in {}", value, target)))
}

fn galois_from_bigint(value: &BigInt, modulus: u64) -> Result<GaloisFieldElement, AlgebraError> {
    let residue = value.mod_floor(&BigInt::from(modulus)).to_u64()
        .ok_or_else(|| AlgebraError::conversion(format!("{} cannot be reduced modulo {}", value, modulus)))?;
    GaloisFieldElement::from_residue(residue, modulus)
}

impl Numeric {

    pub fn kind(&self) -> FieldKind {
        match self {
            Numeric::Real(_) => FieldKind::Real,
            Numeric::Rational(_) => FieldKind::Rational,
            Numeric::Complex(_) => FieldKind::Complex,
            Numeric::Galois(x) => FieldKind::Galois(x.modulus())
        }
    }

    ///
    /// Returns the integer `value` as an element of the given field.
    ///
    pub fn from_int_in(value: i64, kind: FieldKind) -> Result<Numeric, AlgebraError> {
        Ok(match kind {
            FieldKind::Real => Numeric::Real(Real::new(value as f64)),
            FieldKind::Rational => Numeric::Rational(Rational::from_integer(value)),
            FieldKind::Complex => Numeric::Complex(Complex::new(value as f64, 0.)),
            FieldKind::Galois(p) => Numeric::Galois(GaloisFieldElement::new(value, p)?)
        })
    }

    ///
    /// Converts `self` into an element of the field `target`.
    ///
    /// Fails with [`AlgebraError::Conversion`] if the value cannot be represented without loss,
    /// e.g. a real number with fractional part cannot be assigned to a prime field, and a complex
    /// number with nonzero imaginary part cannot be assigned to the reals.
    ///
    pub fn try_assign(&self, target: FieldKind) -> Result<Numeric, AlgebraError> {
        match (self, target) {
            (Numeric::Real(x), FieldKind::Real) => Ok(Numeric::Real(*x)),
            (Numeric::Real(x), FieldKind::Complex) => Ok(Numeric::Complex(Complex::from(*x))),
            (Numeric::Real(x), FieldKind::Rational) => Ok(Numeric::Rational(Rational::from_integer(integral_f64(x.value(), target)?))),
            (Numeric::Real(x), FieldKind::Galois(p)) => Ok(Numeric::Galois(galois_from_bigint(&integral_f64(x.value(), target)?, p)?)),

            (Numeric::Rational(x), FieldKind::Rational) => Ok(Numeric::Rational(x.clone())),
            (Numeric::Rational(x), FieldKind::Real) => Ok(Numeric::Real(Real::new(rational_to_f64(x)))),
            (Numeric::Rational(x), FieldKind::Complex) => Ok(Numeric::Complex(Complex::new(rational_to_f64(x), 0.))),
            (Numeric::Rational(x), FieldKind::Galois(p)) => {
                if !x.is_integral() {
                    return Err(AlgebraError::conversion(format!("{} has a denominator and cannot be represented in {}", x, target)));
                }
                Ok(Numeric::Galois(galois_from_bigint(x.numerator(), p)?))
            },

            (Numeric::Complex(x), FieldKind::Complex) => Ok(Numeric::Complex(*x)),
            (Numeric::Complex(x), _) if x.im() != 0. => Err(AlgebraError::conversion(format!("{} has nonzero imaginary part and cannot be represented in {}", x, target))),
            (Numeric::Complex(x), _) => Numeric::Real(Real::new(x.re())).try_assign(target),

            (Numeric::Galois(x), FieldKind::Galois(p)) if x.modulus() == p => Ok(Numeric::Galois(*x)),
            (Numeric::Galois(x), FieldKind::Galois(_)) => Err(AlgebraError::conversion(format!("{} is an element of F{} and cannot be represented in {}", x, x.modulus(), target))),
            (Numeric::Galois(x), _) => Numeric::Rational(Rational::from_integer(x.value())).try_assign(target)
        }
    }

    fn assert_compatible(&self, rhs: &Self) {
        if let Err(e) = self.check_compatible(rhs) {
            panic!("{}", e);
        }
    }
}

fn rational_to_f64(x: &Rational) -> f64 {
    match (x.numerator().to_f64(), x.denominator().to_f64()) {
        (Some(num), Some(den)) => num / den,
        _ => f64::NAN
    }
}

impl Display for Numeric {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Real(x) => write!(f, "{}", x),
            Numeric::Rational(x) => write!(f, "{}", x),
            Numeric::Complex(x) => write!(f, "{}", x),
            Numeric::Galois(x) => write!(f, "{}", x)
        }
    }
}

macro_rules! dispatch_binary {
    ($lhs:expr, $rhs:expr, $fn:ident) => {
        match ($lhs, $rhs) {
            (Numeric::Real(a), Numeric::Real(b)) => Numeric::Real(a.$fn(b)),
            (Numeric::Rational(a), Numeric::Rational(b)) => Numeric::Rational(a.$fn(b)),
            (Numeric::Complex(a), Numeric::Complex(b)) => Numeric::Complex(a.$fn(b)),
            (Numeric::Galois(a), Numeric::Galois(b)) => Numeric::Galois(a.$fn(b)),
            (a, b) => {
                a.assert_compatible(b);
                unreachable!()
            }
        }
    };
}

macro_rules! dispatch_unary {
    ($value:expr, $x:ident => $body:expr) => {
        match $value {
            Numeric::Real($x) => Numeric::Real($body),
            Numeric::Rational($x) => Numeric::Rational($body),
            Numeric::Complex($x) => Numeric::Complex($body),
            Numeric::Galois($x) => Numeric::Galois($body)
        }
    };
}

impl Field for Numeric {

    fn check_compatible(&self, rhs: &Self) -> Result<(), AlgebraError> {
        match (self, rhs) {
            (Numeric::Galois(a), Numeric::Galois(b)) => a.check_compatible(b),
            (a, b) if a.kind() == b.kind() => Ok(()),
            (a, b) => Err(AlgebraError::field(format!("cannot combine elements of {} and {}", a.kind(), b.kind())))
        }
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        dispatch_binary!(self, rhs, add_ref)
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        dispatch_binary!(self, rhs, sub_ref)
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        dispatch_binary!(self, rhs, mul_ref)
    }

    fn negate(&self) -> Self {
        dispatch_unary!(self, x => x.negate())
    }

    fn checked_inverse(&self) -> Option<Self> {
        match self {
            Numeric::Real(x) => x.checked_inverse().map(Numeric::Real),
            Numeric::Rational(x) => x.checked_inverse().map(Numeric::Rational),
            Numeric::Complex(x) => x.checked_inverse().map(Numeric::Complex),
            Numeric::Galois(x) => x.checked_inverse().map(Numeric::Galois)
        }
    }

    fn zero(&self) -> Self {
        dispatch_unary!(self, x => x.zero())
    }

    fn one(&self) -> Self {
        dispatch_unary!(self, x => x.one())
    }

    fn is_zero(&self) -> bool {
        match self {
            Numeric::Real(x) => x.is_zero(),
            Numeric::Rational(x) => x.is_zero(),
            Numeric::Complex(x) => x.is_zero(),
            Numeric::Galois(x) => x.is_zero()
        }
    }

    fn from_int(&self, value: i64) -> Self {
        dispatch_unary!(self, x => x.from_int(value))
    }
}

#[test]
fn test_field_axioms() {
    let elements = (-2..3).map(|x| Numeric::Rational(Rational::from_fraction(x, 2)));
    crate::field::generic_tests::test_field_axioms(elements);
    let elements = (0..5).map(|x| Numeric::from_int_in(x, FieldKind::Galois(5)).unwrap());
    crate::field::generic_tests::test_field_axioms(elements);
}

#[test]
fn test_try_assign() {
    let half = Numeric::Real(Real::new(0.5));
    assert!(matches!(half.try_assign(FieldKind::Galois(5)), Err(AlgebraError::Conversion(_))));
    assert!(matches!(half.try_assign(FieldKind::Rational), Err(AlgebraError::Conversion(_))));
    assert_eq!(Numeric::Complex(Complex::new(0.5, 0.)), half.try_assign(FieldKind::Complex).unwrap());

    let seven = Numeric::Real(Real::new(7.));
    assert_eq!(Numeric::Galois(GaloisFieldElement::new(2, 5).unwrap()), seven.try_assign(FieldKind::Galois(5)).unwrap());
    assert_eq!(Numeric::Rational(Rational::from_integer(7)), seven.try_assign(FieldKind::Rational).unwrap());

    let minus_three = Numeric::Rational(Rational::from_integer(-3));
    assert_eq!(Numeric::Galois(GaloisFieldElement::new(2, 5).unwrap()), minus_three.try_assign(FieldKind::Galois(5)).unwrap());
    let third = Numeric::Rational(Rational::from_fraction(1, 3));
    assert!(third.try_assign(FieldKind::Galois(5)).is_err());

    let i = Numeric::Complex(Complex::I);
    assert!(matches!(i.try_assign(FieldKind::Real), Err(AlgebraError::Conversion(_))));
    assert_eq!(Numeric::Real(Real::new(2.)), Numeric::Complex(Complex::new(2., 0.)).try_assign(FieldKind::Real).unwrap());

    let g = Numeric::Galois(GaloisFieldElement::new(4, 5).unwrap());
    assert_eq!(Numeric::Rational(Rational::from_integer(4)), g.try_assign(FieldKind::Rational).unwrap());
    assert_eq!(Numeric::Real(Real::new(4.)), g.try_assign(FieldKind::Real).unwrap());
    assert_eq!(Numeric::Complex(Complex::new(4., 0.)), g.try_assign(FieldKind::Complex).unwrap());
    assert_eq!(g, g.try_assign(FieldKind::Galois(5)).unwrap());
    assert!(g.try_assign(FieldKind::Galois(7)).is_err());
    assert!(seven.try_assign(FieldKind::Galois(6)).is_err());
}

#[test]
#[should_panic]
fn test_mixed_variants() {
    _ = Numeric::Real(Real::new(1.)).add_ref(&Numeric::Rational(Rational::one_el()));
}
