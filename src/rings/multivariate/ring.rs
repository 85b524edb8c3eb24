use std::fmt::{Formatter, Result as FmtResult};

use crate::error::AlgebraError;
use crate::field::Field;
use crate::rings::numeric::{FieldKind, Numeric};

use super::ordered::MonomialOrdering;
use super::polynomial::Polynomial;
use super::{Exponent, Monomial, MonomialKind};

///
/// The polynomial ring `k[x0, ..., x(n-1)]`, i.e. the configuration shared by all polynomials
/// that can be combined with each other: named indeterminates, the coefficient field,
/// the monomial ordering and the representation of monomials.
///
/// The field is given by its one, since elements of some fields (e.g. prime fields) carry
/// the field parameters.
///
/// # Example
/// ```
/// # use groebner::field::*;
/// # use groebner::rings::rational::*;
/// # use groebner::rings::multivariate::*;
/// # use groebner::rings::multivariate::ordered::*;
/// # use groebner::rings::multivariate::ring::*;
/// let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::DegRevLex, MonomialKind::Dense);
/// let f = ring.from_terms([
///     (Rational::from_integer(1), &[("x", 2), ("y", 1)][..]),
///     (Rational::from_integer(-3), &[("y", 1)][..]),
///     (Rational::from_integer(1), &[][..])
/// ]).unwrap();
/// assert_eq!("x^2*y - 3*y + 1", ring.format(&f));
/// ```
///
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialRing<F: Field> {
    variables: Vec<String>,
    one: F,
    ordering: MonomialOrdering,
    kind: MonomialKind
}

impl<F: Field> PolynomialRing<F> {

    pub fn new<I, S>(variables: I, one: F, ordering: MonomialOrdering, kind: MonomialKind) -> Self
        where I: IntoIterator<Item = S>,
            S: Into<String>
    {
        let variables = variables.into_iter().map(|s| s.into()).collect::<Vec<String>>();
        for (i, x) in variables.iter().enumerate() {
            assert!(!variables[..i].contains(x), "variable {} occurs twice", x);
        }
        assert!(one.is_one());
        PolynomialRing { variables, one, ordering, kind }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    ///
    /// The number of indeterminates.
    ///
    pub fn field_size(&self) -> usize {
        self.variables.len()
    }

    pub fn ordering(&self) -> &MonomialOrdering {
        &self.ordering
    }

    pub fn kind(&self) -> MonomialKind {
        self.kind
    }

    pub fn base_one(&self) -> &F {
        &self.one
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|x| x == name)
    }

    pub fn zero(&self) -> Polynomial<F> {
        Polynomial::zero(self.field_size(), self.ordering.clone())
    }

    pub fn one(&self) -> Polynomial<F> {
        self.constant(self.one.clone())
    }

    pub fn constant(&self, c: F) -> Polynomial<F> {
        Polynomial::from_monomial(Monomial::constant(self.kind, self.field_size(), c), self.ordering.clone())
    }

    pub fn from_int(&self, value: i64) -> Polynomial<F> {
        self.constant(self.one.from_int(value))
    }

    ///
    /// Returns the `i`-th indeterminate as a polynomial.
    ///
    pub fn indeterminate(&self, i: usize) -> Polynomial<F> {
        assert!(i < self.field_size());
        let mut exponents = vec![0; self.field_size()];
        exponents[i] = 1;
        Polynomial::from_monomial(Monomial::new(self.kind, &exponents, self.one.clone()), self.ordering.clone())
    }

    ///
    /// Returns the indeterminate of the given name as a polynomial.
    ///
    pub fn variable(&self, name: &str) -> Option<Polynomial<F>> {
        self.index_of(name).map(|i| self.indeterminate(i))
    }

    ///
    /// Builds the term `coefficient * prod x^e` from a list of `(variable, exponent)` pairs.
    /// Variables may occur more than once, their exponents are added.
    ///
    pub fn monomial(&self, coefficient: F, powers: &[(&str, Exponent)]) -> Result<Monomial<F>, AlgebraError> {
        self.one.check_compatible(&coefficient)?;
        let mut exponents = vec![0; self.field_size()];
        for (name, e) in powers {
            let i = self.index_of(name).ok_or_else(|| AlgebraError::conversion(format!("unknown variable {}", name)))?;
            exponents[i] += e;
        }
        return Ok(Monomial::new(self.kind, &exponents, coefficient));
    }

    ///
    /// Returns the sum of the given terms as element of this ring.
    ///
    pub fn polynomial(&self, terms: Vec<Monomial<F>>) -> Result<Polynomial<F>, AlgebraError> {
        let terms = terms.into_iter().map(|m| m.to_kind(self.kind)).collect();
        Polynomial::try_new(self.field_size(), self.ordering.clone(), terms)
    }

    pub fn from_terms<'a, I>(&self, terms: I) -> Result<Polynomial<F>, AlgebraError>
        where I: IntoIterator<Item = (F, &'a [(&'a str, Exponent)])>
    {
        let terms = terms.into_iter().map(|(c, powers)| self.monomial(c, powers)).collect::<Result<Vec<_>, _>>()?;
        return self.polynomial(terms);
    }

    ///
    /// Checks that `poly` can be combined with the polynomials of this ring.
    ///
    pub fn check_element(&self, poly: &Polynomial<F>) -> Result<(), AlgebraError> {
        self.zero().check_compatible(poly)?;
        if let Some(kind) = poly.kind() {
            if kind != self.kind {
                return Err(AlgebraError::RepresentationMismatch);
            }
        }
        if let Some(lc) = poly.leading_coefficient() {
            self.one.check_compatible(lc)?;
        }
        return Ok(());
    }

    ///
    /// Returns the same ring, but with polynomials sorted w.r.t. `ordering`.
    /// Use [`PolynomialRing::map_in()`] to move polynomials into the new ring.
    ///
    pub fn with_ordering(&self, ordering: MonomialOrdering) -> Self {
        PolynomialRing { ordering, ..self.clone() }
    }

    ///
    /// Returns the same ring, but with monomials stored in the given representation.
    ///
    pub fn with_kind(&self, kind: MonomialKind) -> Self {
        PolynomialRing { kind, ..self.clone() }
    }

    ///
    /// Converts a polynomial with the same indeterminates and field to the ordering and
    /// representation of this ring.
    ///
    pub fn map_in(&self, poly: &Polynomial<F>) -> Result<Polynomial<F>, AlgebraError> {
        if poly.field_size() != self.field_size() {
            return Err(AlgebraError::RingMismatch { expected: self.field_size(), found: poly.field_size() });
        }
        return Ok(poly.with_ordering(self.ordering.clone()).to_kind(self.kind));
    }

    ///
    /// Computes `poly^exponent`, where `poly^0` is the one of this ring, even if `poly` is zero.
    ///
    pub fn pow(&self, poly: &Polynomial<F>, exponent: u32) -> Result<Polynomial<F>, AlgebraError> {
        self.check_element(poly)?;
        if exponent == 0 {
            return Ok(self.one());
        }
        return poly.try_pow(exponent);
    }

    pub fn format(&self, poly: &Polynomial<F>) -> String {
        struct Formatted<'a, F: Field>(&'a Polynomial<F>, &'a [String]);
        impl<'a, F: Field> std::fmt::Display for Formatted<'a, F> {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                format_polynomial(self.0, self.1, f)
            }
        }
        format!("{}", Formatted(poly, &self.variables))
    }
}

impl PolynomialRing<Numeric> {

    ///
    /// Creates the ring over the field described by `field`, as used at untyped boundaries
    /// where the field is only known at runtime.
    ///
    pub fn from_config<I, S>(variables: I, field: FieldKind, ordering: MonomialOrdering, kind: MonomialKind) -> Result<Self, AlgebraError>
        where I: IntoIterator<Item = S>,
            S: Into<String>
    {
        Ok(Self::new(variables, Numeric::from_int_in(1, field)?, ordering, kind))
    }

    pub fn field(&self) -> FieldKind {
        self.one.kind()
    }

    ///
    /// Returns the ring with the same indeterminates, ordering and representation over
    /// another field.
    ///
    pub fn with_field(&self, field: FieldKind) -> Result<Self, AlgebraError> {
        Ok(PolynomialRing { one: Numeric::from_int_in(1, field)?, ..self.clone() })
    }

    ///
    /// Moves a polynomial into this ring, converting all coefficients with
    /// [`Numeric::try_assign()`].
    ///
    pub fn coerce(&self, poly: &Polynomial<Numeric>) -> Result<Polynomial<Numeric>, AlgebraError> {
        let target = self.field();
        self.map_in(&poly.try_map_coefficients(|c| c.try_assign(target))?)
    }
}

fn render_term<F: Field>(m: &Monomial<F>, names: &[String]) -> String {
    let powers = m.nonzero_exponents().map(|(i, e)| if e == 1 {
        names[i].clone()
    } else {
        format!("{}^{}", names[i], e)
    }).collect::<Vec<_>>().join("*");
    let coefficient = format!("{}", m.coefficient());
    if powers.is_empty() {
        return coefficient;
    } else if m.coefficient().is_one() {
        return powers;
    } else if m.coefficient().negate().is_one() {
        return format!("-{}", powers);
    } else {
        return format!("{}*{}", coefficient, powers);
    }
}

pub(super) fn format_monomial<F: Field>(m: &Monomial<F>, names: &[String], f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}", render_term(m, names))
}

pub(super) fn format_polynomial<F: Field>(poly: &Polynomial<F>, names: &[String], f: &mut Formatter<'_>) -> FmtResult {
    if poly.is_zero() {
        return write!(f, "0");
    }
    for (i, m) in poly.terms().enumerate() {
        let term = render_term(m, names);
        if i == 0 {
            write!(f, "{}", term)?;
        } else if let Some(negative) = term.strip_prefix('-') {
            write!(f, " - {}", negative)?;
        } else {
            write!(f, " + {}", term)?;
        }
    }
    return Ok(());
}

#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;

#[cfg(test)]
fn test_ring() -> PolynomialRing<Rational> {
    PolynomialRing::new(["x", "y", "z"], Rational::one_el(), MonomialOrdering::DegRevLex, MonomialKind::Dense)
}

#[test]
fn test_format() {
    let ring = test_ring();
    let f = ring.from_terms([
        (Rational::from_integer(1), &[("x", 2), ("y", 1)][..]),
        (Rational::from_integer(-3), &[("z", 1)][..]),
        (Rational::from_integer(1), &[][..])
    ]).unwrap();
    assert_eq!("x^2*y - 3*z + 1", ring.format(&f));
    assert_eq!("x0^2*x1 - 3*x2 + 1", format!("{}", f));
    assert_eq!("0", ring.format(&ring.zero()));
    assert_eq!("-y + 1/2", ring.format(&ring.from_terms([
        (Rational::from_integer(-1), &[("y", 1)][..]),
        (Rational::from_fraction(1, 2), &[][..])
    ]).unwrap()));
}

#[test]
fn test_monomial_description() {
    let ring = test_ring();
    let m = ring.monomial(Rational::from_integer(2), &[("x", 1), ("z", 2), ("x", 1)]).unwrap();
    assert_eq!(&[2, 0, 2], &*m.exponents());
    assert!(matches!(ring.monomial(Rational::one_el(), &[("w", 1)]), Err(AlgebraError::Conversion(_))));
    assert_eq!(ring.indeterminate(1), ring.variable("y").unwrap());
    assert!(ring.variable("w").is_none());
    assert!(ring.one().is_one());
    assert!(ring.from_int(0).is_zero());
}

#[test]
fn test_pow() {
    let ring = test_ring();
    let x = ring.indeterminate(0);
    assert_eq!(ring.one(), ring.pow(&ring.zero(), 0).unwrap());
    assert!(ring.pow(&ring.zero(), 3).unwrap().is_zero());
    assert_eq!(x.mul(&x).mul(&x), ring.pow(&x, 3).unwrap());
    assert!(ring.pow(&ring.with_ordering(MonomialOrdering::Lex).one(), 2).is_err());
    assert!(matches!(ring.zero().try_pow(0), Err(AlgebraError::FieldConstruction(_))));
}

#[test]
fn test_change_ring() {
    let ring = test_ring();
    let f = ring.from_terms([
        (Rational::from_integer(1), &[("x", 1)][..]),
        (Rational::from_integer(1), &[("z", 3)][..])
    ]).unwrap();
    assert_eq!(Some(vec![0, 0, 3]), f.multidegree());

    let lex_ring = ring.with_ordering(MonomialOrdering::Lex).with_kind(MonomialKind::Sparse);
    let g = lex_ring.map_in(&f).unwrap();
    assert_eq!(Some(vec![1, 0, 0]), g.multidegree());
    assert_eq!(Some(MonomialKind::Sparse), g.kind());
    assert!(lex_ring.check_element(&g).is_ok());
    assert!(ring.check_element(&g).is_err());
    assert_eq!(f, ring.map_in(&g).unwrap());
}

#[test]
fn test_change_field() {
    let ring = PolynomialRing::from_config(["x", "y"], FieldKind::Rational, MonomialOrdering::DegRevLex, MonomialKind::Dense).unwrap();
    let f = ring.from_terms([
        (Numeric::Rational(Rational::from_integer(7)), &[("x", 1)][..]),
        (Numeric::Rational(Rational::from_integer(-1)), &[("y", 1)][..])
    ]).unwrap();
    let gf_ring = ring.with_field(FieldKind::Galois(7)).unwrap();
    let g = gf_ring.coerce(&f).unwrap();
    assert_eq!(1, g.len());
    assert_eq!(Some(&Numeric::Galois(GaloisFieldElement::new(6, 7).unwrap())), g.coefficient_of(&[0, 1]));
    assert!(ring.with_field(FieldKind::Galois(8)).is_err());

    let h = ring.from_terms([(Numeric::Rational(Rational::from_fraction(1, 2)), &[("x", 1)][..])]).unwrap();
    assert!(matches!(gf_ring.coerce(&h), Err(AlgebraError::Conversion(_))));
}
