use std::cmp::{max, Ordering};
use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::field::Field;

use super::ordered::{MonomialOrder, MonomialOrdering};
use super::{Exponent, Monomial, MonomialKind};

///
/// A multivariate polynomial, stored as a list of its nonzero terms, sorted by a monomial
/// ordering.
///
/// The following is always satisfied:
///  - no two terms have the same exponents
///  - no term has zero coefficient
///  - all terms have the same field size as the polynomial
///  - the terms are strictly sorted w.r.t. the ordering
///
/// Polynomials are values, all arithmetic returns a new polynomial. Combining polynomials
/// with different field size or different ordering (as given by [`MonomialOrder::order_id()`])
/// is a precondition violation, use the `try_` functions to get an [`AlgebraError`] instead.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial<F: Field> {
    field_size: usize,
    ordering: MonomialOrdering,
    /// ascending w.r.t. `ordering`, so the leading term is the last one
    terms: Vec<Monomial<F>>
}

fn unwrap_or_panic<T>(value: Result<T, AlgebraError>) -> T {
    match value {
        Ok(result) => result,
        Err(e) => panic!("{}", e)
    }
}

impl<F: Field> Polynomial<F> {

    ///
    /// Creates the polynomial that is the sum of the given terms. Terms with equal exponents
    /// are merged, and zero terms are dropped.
    ///
    pub fn try_new(field_size: usize, ordering: MonomialOrdering, mut terms: Vec<Monomial<F>>) -> Result<Self, AlgebraError> {
        if let Some(wrong) = terms.iter().find(|m| m.field_size() != field_size) {
            return Err(AlgebraError::RingMismatch { expected: field_size, found: wrong.field_size() });
        }
        if let Some(first) = terms.first() {
            if terms.iter().any(|m| m.kind() != first.kind()) {
                return Err(AlgebraError::RepresentationMismatch);
            }
            for m in &terms {
                first.coefficient().check_compatible(m.coefficient())?;
            }
        }
        terms.sort_by(|l, r| ordering.compare(l, r));
        let mut merged: Vec<Monomial<F>> = Vec::with_capacity(terms.len());
        for m in terms {
            match merged.last_mut() {
                Some(last) if last.exponents_equal(&m) => {
                    *last = last.with_coefficient(last.coefficient().add_ref(m.coefficient()));
                },
                _ => merged.push(m)
            }
        }
        merged.retain(|m| !m.is_zero());
        return Ok(Polynomial { field_size, ordering, terms: merged });
    }

    pub fn new(field_size: usize, ordering: MonomialOrdering, terms: Vec<Monomial<F>>) -> Self {
        unwrap_or_panic(Self::try_new(field_size, ordering, terms))
    }

    pub fn zero(field_size: usize, ordering: MonomialOrdering) -> Self {
        Polynomial { field_size, ordering, terms: Vec::new() }
    }

    pub fn from_monomial(monomial: Monomial<F>, ordering: MonomialOrdering) -> Self {
        let field_size = monomial.field_size();
        if monomial.is_zero() {
            return Self::zero(field_size, ordering);
        }
        Polynomial { field_size, ordering, terms: vec![monomial] }
    }

    ///
    /// Creates a polynomial from terms that are already strictly ascending w.r.t. `ordering`
    /// and nonzero.
    ///
    fn from_sorted(field_size: usize, ordering: MonomialOrdering, terms: Vec<Monomial<F>>) -> Self {
        debug_assert!(terms.iter().all(|m| !m.is_zero()));
        debug_assert!(terms.windows(2).all(|w| ordering.compare(&w[0], &w[1]) == Ordering::Less));
        Polynomial { field_size, ordering, terms }
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    pub fn ordering(&self) -> &MonomialOrdering {
        &self.ordering
    }

    ///
    /// The representation of the terms, or `None` for the zero polynomial.
    ///
    pub fn kind(&self) -> Option<MonomialKind> {
        self.terms.first().map(|m| m.kind())
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].is_one()
    }

    ///
    /// Number of nonzero terms.
    ///
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    ///
    /// Iterates over the terms in descending order, i.e. starting with the leading term.
    ///
    pub fn terms<'a>(&'a self) -> impl 'a + ExactSizeIterator<Item = &'a Monomial<F>> + DoubleEndedIterator {
        self.terms.iter().rev()
    }

    pub fn leading_term(&self) -> Option<&Monomial<F>> {
        self.terms.last()
    }

    ///
    /// Returns the leading term with coefficient one.
    ///
    pub fn leading_monomial(&self) -> Option<Monomial<F>> {
        self.leading_term().map(|m| m.with_coefficient(m.coefficient().one()))
    }

    pub fn leading_coefficient(&self) -> Option<&F> {
        self.leading_term().map(|m| m.coefficient())
    }

    ///
    /// The exponents of the leading term.
    ///
    pub fn multidegree(&self) -> Option<Vec<Exponent>> {
        self.leading_term().map(|m| m.exponents().into_owned())
    }

    ///
    /// The maximal total degree of any term, or `0` for the zero polynomial.
    ///
    /// Note that for orderings that are not graded (e.g. lex), this can be larger than the
    /// degree of the leading term.
    ///
    pub fn degree(&self) -> u64 {
        self.terms.iter().map(|m| m.degree()).max().unwrap_or(0)
    }

    ///
    /// Returns the polynomial without its leading term.
    ///
    pub fn tail(&self) -> Self {
        let mut result = self.clone();
        result.terms.pop();
        return result;
    }

    ///
    /// Returns the coefficient of the term with the given exponents, or `None` if there
    /// is no such term.
    ///
    pub fn coefficient_of(&self, exponents: &[Exponent]) -> Option<&F> {
        assert_eq!(self.field_size, exponents.len());
        self.terms.iter().find(|m| &*m.exponents() == exponents).map(|m| m.coefficient())
    }

    ///
    /// Checks that `self` and `rhs` are elements of the same ring.
    ///
    pub fn check_compatible(&self, rhs: &Self) -> Result<(), AlgebraError> {
        if self.field_size != rhs.field_size {
            return Err(AlgebraError::RingMismatch { expected: self.field_size, found: rhs.field_size });
        }
        if self.ordering.order_id() != rhs.ordering.order_id() {
            return Err(AlgebraError::OrderingMismatch { expected: self.ordering.order_id(), found: rhs.ordering.order_id() });
        }
        if let (Some(l), Some(r)) = (self.terms.first(), rhs.terms.first()) {
            if l.kind() != r.kind() {
                return Err(AlgebraError::RepresentationMismatch);
            }
            l.coefficient().check_compatible(r.coefficient())?;
        }
        return Ok(());
    }

    fn merge(&self, rhs: &Self, negate_rhs: bool) -> Self {
        let mut result = Vec::with_capacity(self.terms.len() + rhs.terms.len());
        let map_rhs = |m: &Monomial<F>| if negate_rhs { m.with_coefficient(m.coefficient().negate()) } else { m.clone() };
        let (mut i, mut j) = (0, 0);
        while i < self.terms.len() && j < rhs.terms.len() {
            let (l, r) = (&self.terms[i], &rhs.terms[j]);
            match self.ordering.compare(l, r) {
                Ordering::Less => {
                    result.push(l.clone());
                    i += 1;
                },
                Ordering::Greater => {
                    result.push(map_rhs(r));
                    j += 1;
                },
                Ordering::Equal => {
                    let coefficient = if negate_rhs {
                        l.coefficient().sub_ref(r.coefficient())
                    } else {
                        l.coefficient().add_ref(r.coefficient())
                    };
                    if !coefficient.is_zero() {
                        result.push(l.with_coefficient(coefficient));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        result.extend(self.terms[i..].iter().cloned());
        result.extend(rhs.terms[j..].iter().map(map_rhs));
        return Self::from_sorted(self.field_size, self.ordering.clone(), result);
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        Ok(self.merge(rhs, false))
    }

    pub fn add(&self, rhs: &Self) -> Self {
        unwrap_or_panic(self.try_add(rhs))
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        Ok(self.merge(rhs, true))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        unwrap_or_panic(self.try_sub(rhs))
    }

    pub fn negate(&self) -> Self {
        let terms = self.terms.iter().map(|m| m.with_coefficient(m.coefficient().negate())).collect();
        Self::from_sorted(self.field_size, self.ordering.clone(), terms)
    }

    ///
    /// Multiplies every coefficient by `factor`.
    ///
    pub fn scale(&self, factor: &F) -> Self {
        if factor.is_zero() {
            return Self::zero(self.field_size, self.ordering.clone());
        }
        let terms = self.terms.iter().map(|m| m.scale(factor)).collect();
        Self::from_sorted(self.field_size, self.ordering.clone(), terms)
    }

    ///
    /// Multiplies every term by `monomial`. Since monomial orders are compatible with
    /// multiplication, no resorting is necessary.
    ///
    pub fn try_mul_monomial(&self, monomial: &Monomial<F>) -> Result<Self, AlgebraError> {
        if monomial.field_size() != self.field_size {
            return Err(AlgebraError::RingMismatch { expected: self.field_size, found: monomial.field_size() });
        }
        if monomial.is_zero() {
            return Ok(Self::zero(self.field_size, self.ordering.clone()));
        }
        let terms = self.terms.iter().map(|m| m.try_mul(monomial)).collect::<Result<Vec<_>, _>>()?;
        return Ok(Self::from_sorted(self.field_size, self.ordering.clone(), terms));
    }

    pub fn mul_monomial(&self, monomial: &Monomial<F>) -> Self {
        unwrap_or_panic(self.try_mul_monomial(monomial))
    }

    ///
    /// Divides every coefficient by `divisor`, or fails if `divisor` is zero.
    ///
    pub fn try_div_scalar(&self, divisor: &F) -> Result<Self, AlgebraError> {
        let inverse = divisor.try_inverse()?;
        if let Some(first) = self.terms.first() {
            first.coefficient().check_compatible(divisor)?;
        }
        return Ok(self.scale(&inverse));
    }

    pub fn div_scalar(&self, divisor: &F) -> Self {
        unwrap_or_panic(self.try_div_scalar(divisor))
    }

    ///
    /// Returns `self` scaled such that the leading coefficient is one. The zero polynomial
    /// is returned unchanged.
    ///
    pub fn normalize(&self) -> Self {
        match self.leading_coefficient() {
            Some(lc) if !lc.is_one() => self.div_scalar(lc),
            _ => self.clone()
        }
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        let mut result = Self::zero(self.field_size, self.ordering.clone());
        for m in &rhs.terms {
            result = result.merge(&self.try_mul_monomial(m)?, false);
        }
        return Ok(result);
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        unwrap_or_panic(self.try_mul(rhs))
    }

    ///
    /// Computes `self^exponent`. Since the zero polynomial does not know its field, `0^0`
    /// cannot be computed, and an error is returned. Use [`super::ring::PolynomialRing::pow()`]
    /// in this case.
    ///
    pub fn try_pow(&self, exponent: u32) -> Result<Self, AlgebraError> {
        if exponent == 0 {
            let one = match self.terms.first() {
                Some(m) => Monomial::constant(m.kind(), self.field_size, m.coefficient().one()),
                None => return Err(AlgebraError::field("cannot compute 0^0 of a polynomial without knowing its field"))
            };
            return Ok(Self::from_monomial(one, self.ordering.clone()));
        }
        let mut result = self.clone();
        for _ in 1..exponent {
            result = result.mul(self);
        }
        return Ok(result);
    }

    ///
    /// Computes `self^exponent`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero and `exponent` is zero, see [`Polynomial::try_pow()`].
    ///
    pub fn pow(&self, exponent: u32) -> Self {
        unwrap_or_panic(self.try_pow(exponent))
    }

    ///
    /// Computes a normal form of `self` modulo the given polynomials.
    ///
    /// This repeatedly takes the leading term of the current polynomial, and looks for the
    /// first element of `basis` whose leading term divides it. If there is one, the
    /// corresponding multiple of it is subtracted, otherwise the leading term is moved to the
    /// remainder. The result is the remainder, once the current polynomial is zero.
    ///
    /// The result depends on the order of `basis`, unless `basis` is a Groebner basis.
    ///
    /// # Example
    /// ```
    /// # use groebner::field::*;
    /// # use groebner::rings::rational::*;
    /// # use groebner::rings::multivariate::*;
    /// # use groebner::rings::multivariate::ordered::*;
    /// # use groebner::rings::multivariate::polynomial::*;
    /// let one = Rational::one_el();
    /// let order = MonomialOrdering::DegRevLex;
    /// // x^2 + y
    /// let f = Polynomial::new(2, order.clone(), vec![Monomial::dense(&[2, 0], one.clone()), Monomial::dense(&[0, 1], one.clone())]);
    /// // x
    /// let g = Polynomial::new(2, order.clone(), vec![Monomial::dense(&[1, 0], one.clone())]);
    /// let remainder = f.reduce(&[g]);
    /// assert_eq!(1, remainder.len());
    /// assert_eq!(Some(vec![0, 1]), remainder.multidegree());
    /// ```
    ///
    pub fn reduce(&self, basis: &[Polynomial<F>]) -> Self {
        unwrap_or_panic(self.try_reduce(basis))
    }

    pub fn try_reduce(&self, basis: &[Polynomial<F>]) -> Result<Self, AlgebraError> {
        for b in basis {
            self.check_compatible(b)?;
        }
        let mut current = self.clone();
        let mut remainder = Vec::new();
        while let Some(lt) = current.terms.last() {
            let mut reducer = None;
            for b in basis {
                if let Some(b_lt) = b.leading_term() {
                    let quotient = lt.try_div(b_lt)?;
                    if !quotient.is_zero() {
                        reducer = Some((b, quotient));
                        break;
                    }
                }
            }
            match reducer {
                Some((b, quotient)) => {
                    // the leading terms cancel by construction, so drop them explicitly
                    current.terms.pop();
                    current = current.merge(&b.tail().try_mul_monomial(&quotient)?, true);
                },
                None => remainder.extend(current.terms.pop())
            }
        }
        remainder.reverse();
        return Ok(Self::from_sorted(self.field_size, self.ordering.clone(), remainder));
    }

    ///
    /// Returns the same polynomial, sorted w.r.t. another ordering.
    ///
    pub fn with_ordering(&self, ordering: MonomialOrdering) -> Self {
        let mut terms = self.terms.clone();
        terms.sort_by(|l, r| ordering.compare(l, r));
        return Self::from_sorted(self.field_size, ordering, terms);
    }

    ///
    /// Returns the same polynomial, with all terms stored in the given representation.
    ///
    pub fn to_kind(&self, kind: MonomialKind) -> Self {
        let terms = self.terms.iter().map(|m| m.to_kind(kind)).collect();
        Self::from_sorted(self.field_size, self.ordering.clone(), terms)
    }

    ///
    /// Applies `f` to every coefficient, and drops terms that become zero.
    ///
    pub fn try_map_coefficients<G, H>(&self, mut f: H) -> Result<Polynomial<G>, AlgebraError>
        where G: Field,
            H: FnMut(&F) -> Result<G, AlgebraError>
    {
        let mut terms = Vec::with_capacity(self.terms.len());
        for m in &self.terms {
            let c = f(m.coefficient())?;
            if !c.is_zero() {
                terms.push(Monomial::new(m.kind(), &m.exponents(), c));
            }
        }
        return Ok(Polynomial::from_sorted(self.field_size, self.ordering.clone(), terms));
    }

    ///
    /// The maximal exponent of each indeterminate.
    ///
    pub fn max_exponents(&self) -> Vec<Exponent> {
        let mut result = vec![0; self.field_size];
        for m in &self.terms {
            for (i, e) in m.nonzero_exponents() {
                result[i] = max(result[i], e);
            }
        }
        return result;
    }
}

impl<'a, F: Field> Add<&'a Polynomial<F>> for &'a Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: &'a Polynomial<F>) -> Polynomial<F> {
        Polynomial::add(self, rhs)
    }
}

impl<'a, F: Field> Sub<&'a Polynomial<F>> for &'a Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: &'a Polynomial<F>) -> Polynomial<F> {
        Polynomial::sub(self, rhs)
    }
}

impl<'a, F: Field> Mul<&'a Polynomial<F>> for &'a Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: &'a Polynomial<F>) -> Polynomial<F> {
        Polynomial::mul(self, rhs)
    }
}

impl<'a, F: Field> Neg for &'a Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        self.negate()
    }
}

impl<F: Field> Display for Polynomial<F> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = (0..self.field_size).map(|i| format!("x{}", i)).collect::<Vec<_>>();
        super::ring::format_polynomial(self, &names, f)
    }
}

#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::rational::Rational;

#[cfg(test)]
fn gf(x: i64) -> GaloisFieldElement {
    GaloisFieldElement::new(x, 5).unwrap()
}

#[cfg(test)]
fn poly(ordering: MonomialOrdering, terms: &[(i64, [Exponent; 2])]) -> Polynomial<GaloisFieldElement> {
    Polynomial::new(2, ordering, terms.iter().map(|(c, e)| Monomial::dense(e, gf(*c))).collect())
}

#[cfg(test)]
fn assert_canonical<F: Field>(p: &Polynomial<F>) {
    assert!(p.terms.iter().all(|m| !m.is_zero() && m.field_size() == p.field_size()));
    assert!(p.terms.windows(2).all(|w| p.ordering().compare(&w[0], &w[1]) == Ordering::Less));
}

#[test]
fn test_canonical_form() {
    // 2x + y + 3x + x^2 - y, over F5
    let p = poly(MonomialOrdering::DegRevLex, &[(2, [1, 0]), (1, [0, 1]), (3, [1, 0]), (1, [2, 0]), (-1, [0, 1])]);
    assert_canonical(&p);
    assert_eq!(1, p.len());
    assert_eq!(Some(vec![2, 0]), p.multidegree());
    assert!(p.coefficient_of(&[1, 0]).is_none());

    let p = poly(MonomialOrdering::Lex, &[(1, [0, 3]), (4, [1, 0]), (2, [0, 0]), (1, [0, 3])]);
    assert_canonical(&p);
    assert_eq!(vec![vec![1, 0], vec![0, 3], vec![0, 0]], p.terms().map(|m| m.exponents().into_owned()).collect::<Vec<_>>());
    assert_eq!(Some(&gf(2)), p.coefficient_of(&[0, 3]));
}

#[test]
fn test_degree_is_maximum_over_terms() {
    let p = poly(MonomialOrdering::Lex, &[(1, [1, 0]), (1, [0, 3])]);
    assert_eq!(Some(vec![1, 0]), p.multidegree());
    assert_eq!(3, p.degree());
    assert_eq!(0, Polynomial::<GaloisFieldElement>::zero(2, MonomialOrdering::Lex).degree());
}

#[test]
fn test_add_sub() {
    let order = MonomialOrdering::DegLex;
    let f = poly(order.clone(), &[(1, [2, 0]), (2, [1, 1]), (3, [0, 0])]);
    let g = poly(order.clone(), &[(4, [2, 0]), (1, [0, 1]), (2, [0, 0])]);
    let sum = f.add(&g);
    assert_canonical(&sum);
    assert_eq!(poly(order.clone(), &[(2, [1, 1]), (1, [0, 1])]), sum);
    let difference = &f - &g;
    assert_eq!(poly(order.clone(), &[(2, [2, 0]), (2, [1, 1]), (-1, [0, 1]), (1, [0, 0])]), difference);
    assert!(f.sub(&f).is_zero());
    assert_eq!(f, &(&f + &g) - &g);
    assert_eq!(f.negate(), -&f);
}

#[test]
fn test_mismatch() {
    let f = poly(MonomialOrdering::Lex, &[(1, [1, 0])]);
    let g = poly(MonomialOrdering::DegRevLex, &[(1, [1, 0])]);
    assert_eq!(Err(AlgebraError::OrderingMismatch { expected: 1, found: 3 }), f.try_add(&g));
    let h = Polynomial::new(3, MonomialOrdering::Lex, vec![Monomial::dense(&[1, 0, 0], gf(1))]);
    assert_eq!(Err(AlgebraError::RingMismatch { expected: 2, found: 3 }), f.try_sub(&h));
    let s = f.to_kind(MonomialKind::Sparse);
    assert_eq!(Err(AlgebraError::RepresentationMismatch), f.try_add(&s));
    assert!(f.try_div_scalar(&gf(0)).is_err());
}

#[test]
#[should_panic(expected = "ordering mismatch")]
fn test_add_ordering_mismatch_panics() {
    let f = poly(MonomialOrdering::Lex, &[(1, [1, 0])]);
    let g = poly(MonomialOrdering::DegLex, &[(1, [1, 0])]);
    _ = f.add(&g);
}

#[test]
fn test_scale_and_mul() {
    let order = MonomialOrdering::DegRevLex;
    let f = poly(order.clone(), &[(1, [1, 0]), (1, [0, 1])]);
    let g = poly(order.clone(), &[(1, [1, 0]), (-1, [0, 1])]);
    assert_eq!(poly(order.clone(), &[(1, [2, 0]), (-1, [0, 2])]), f.mul(&g));
    assert_eq!(poly(order.clone(), &[(1, [2, 0]), (2, [1, 1]), (1, [0, 2])]), f.pow(2));
    assert!(f.scale(&gf(0)).is_zero());
    assert!(f.mul_monomial(&Monomial::dense(&[3, 3], gf(0))).is_zero());
    assert_eq!(poly(order.clone(), &[(3, [1, 0]), (3, [0, 1])]), f.div_scalar(&gf(2)));
    let shifted = f.mul_monomial(&Monomial::dense(&[0, 2], gf(2)));
    assert_canonical(&shifted);
    assert_eq!(poly(order.clone(), &[(2, [1, 2]), (2, [0, 3])]), shifted);
    assert!(f.pow(0).is_one());
}

#[test]
fn test_tail_and_leading() {
    let f = poly(MonomialOrdering::DegRevLex, &[(3, [1, 1]), (1, [0, 1])]);
    assert_eq!(Some(&gf(3)), f.leading_coefficient());
    assert!(f.leading_monomial().unwrap().coefficient().is_one());
    assert_eq!(poly(MonomialOrdering::DegRevLex, &[(1, [0, 1])]), f.tail());
    assert!(f.tail().tail().is_zero());
    assert!(f.tail().tail().tail().is_zero());
    assert_eq!(Some(&gf(1)), f.normalize().leading_coefficient());
}

#[test]
fn test_reduce() {
    let order = MonomialOrdering::Lex;
    // x^2 y + x y^2 + y^2 reduced by [xy - 1, y^2 - 1] over Q, the textbook example
    let q = |terms: &[(i64, [Exponent; 2])]| Polynomial::new(2, order.clone(), terms.iter().map(|(c, e)| Monomial::dense(e, Rational::from_integer(*c))).collect());
    let f = q(&[(1, [2, 1]), (1, [1, 2]), (1, [0, 2])]);
    let g1 = q(&[(1, [1, 1]), (-1, [0, 0])]);
    let g2 = q(&[(1, [0, 2]), (-1, [0, 0])]);
    assert_eq!(q(&[(1, [1, 0]), (1, [0, 1]), (1, [0, 0])]), f.reduce(&[g1.clone(), g2.clone()]));
    assert_eq!(q(&[(2, [1, 0]), (1, [0, 0])]), f.reduce(&[g2.clone(), g1.clone()]));
    assert_canonical(&f.reduce(&[g1.clone(), g2.clone()]));
    assert_eq!(f, f.reduce(&[]));
    assert!(g1.reduce(&[g1.clone()]).is_zero());
}

#[test]
fn test_reduce_idempotent() {
    let order = MonomialOrdering::DegRevLex;
    let basis = [
        poly(order.clone(), &[(1, [2, 0]), (3, [0, 1])]),
        poly(order.clone(), &[(2, [1, 1]), (1, [0, 0])])
    ];
    for f in [
        poly(order.clone(), &[(1, [3, 2]), (4, [1, 1]), (2, [0, 0])]),
        poly(order.clone(), &[(1, [0, 4]), (1, [4, 0])]),
        poly(order.clone(), &[(3, [1, 0])])
    ] {
        let once = f.reduce(&basis);
        assert_eq!(once, once.reduce(&basis));
        assert!(once.terms().all(|m| basis.iter().all(|b| !b.leading_term().unwrap().divides(m))));
    }
}

#[test]
fn test_with_ordering() {
    let f = poly(MonomialOrdering::Lex, &[(1, [1, 0]), (1, [0, 3])]);
    let g = f.with_ordering(MonomialOrdering::DegLex);
    assert_canonical(&g);
    assert_eq!(Some(vec![0, 3]), g.multidegree());
    assert_eq!(f, g.with_ordering(MonomialOrdering::Lex));
}

#[test]
fn test_serialization() {
    let f = poly(MonomialOrdering::DegRevLex, &[(3, [1, 1]), (1, [0, 1])]).to_kind(MonomialKind::Sparse);
    let json = serde_json::to_string(&f).unwrap();
    let g: Polynomial<GaloisFieldElement> = serde_json::from_str(&json).unwrap();
    assert_eq!(f, g);
}
