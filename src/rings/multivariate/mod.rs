use std::borrow::Cow;
use std::cmp::max;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::field::Field;

///
/// Contains [`divisors::Divisors`], the iterator over all monomials dividing a fixed one.
///
pub mod divisors;
///
/// Contains the trait [`ordered::MonomialOrder`] and the term orders implementing it.
///
pub mod ordered;
///
/// Contains [`polynomial::Polynomial`], the sorted sum of monomials, and the reduction
/// (normal form) algorithm.
///
pub mod polynomial;
///
/// Contains [`ring::PolynomialRing`], which fixes variables, field and ordering.
///
pub mod ring;

use divisors::Divisors;

///
/// Type used to store the exponent of a single indeterminate.
///
pub type Exponent = u32;

///
/// The two available representations of a monomial.
///
/// Monomials of different kinds cannot be combined, see [`AlgebraError::RepresentationMismatch`].
/// The only exception is [`monomial_lcm()`].
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonomialKind {
    /// One exponent per indeterminate
    Dense,
    /// A bitset of the indeterminates with nonzero exponent, and their exponents
    Sparse
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct Support {
    words: Vec<u64>
}

impl Support {

    fn with_len(len: usize) -> Self {
        Support { words: vec![0; (len + 63) / 64] }
    }

    fn insert(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (i % 64);
    }

    fn contains(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    ///
    /// Number of elements in the set that are smaller than `i`.
    ///
    fn rank(&self, i: usize) -> usize {
        let full_words = self.words[..(i / 64)].iter().map(|w| w.count_ones() as usize).sum::<usize>();
        let mask = (1u64 << (i % 64)) - 1;
        return full_words + (self.words[i / 64] & mask).count_ones() as usize;
    }

    fn intersects(&self, other: &Support) -> bool {
        self.words.iter().zip(other.words.iter()).any(|(a, b)| a & b != 0)
    }

    fn iter<'a>(&'a self) -> impl 'a + Iterator<Item = usize> {
        self.words.iter().enumerate().flat_map(|(k, word)| {
            let mut word = *word;
            std::iter::from_fn(move || {
                if word == 0 {
                    return None;
                }
                let bit = word.trailing_zeros() as usize;
                word &= word - 1;
                return Some(k * 64 + bit);
            })
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum ExponentVector {
    Dense(Vec<Exponent>),
    Sparse {
        len: usize,
        support: Support,
        values: Vec<Exponent>
    }
}

impl ExponentVector {

    fn new(kind: MonomialKind, exponents: &[Exponent]) -> Self {
        match kind {
            MonomialKind::Dense => ExponentVector::Dense(exponents.to_vec()),
            MonomialKind::Sparse => {
                let mut support = Support::with_len(exponents.len());
                let mut values = Vec::new();
                for (i, e) in exponents.iter().enumerate() {
                    if *e != 0 {
                        support.insert(i);
                        values.push(*e);
                    }
                }
                ExponentVector::Sparse { len: exponents.len(), support, values }
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            ExponentVector::Dense(e) => e.len(),
            ExponentVector::Sparse { len, .. } => *len
        }
    }

    fn kind(&self) -> MonomialKind {
        match self {
            ExponentVector::Dense(_) => MonomialKind::Dense,
            ExponentVector::Sparse { .. } => MonomialKind::Sparse
        }
    }

    fn at(&self, i: usize) -> Exponent {
        match self {
            ExponentVector::Dense(e) => e[i],
            ExponentVector::Sparse { support, values, .. } => if support.contains(i) {
                values[support.rank(i)]
            } else {
                0
            }
        }
    }

    fn to_dense(&self) -> Cow<[Exponent]> {
        match self {
            ExponentVector::Dense(e) => Cow::Borrowed(&e[..]),
            ExponentVector::Sparse { len, support, values } => {
                let mut result = vec![0; *len];
                for (i, e) in support.iter().zip(values.iter()) {
                    result[i] = *e;
                }
                Cow::Owned(result)
            }
        }
    }

    fn nonzero<'a>(&'a self) -> Box<dyn 'a + Iterator<Item = (usize, Exponent)>> {
        match self {
            ExponentVector::Dense(e) => Box::new(e.iter().copied().enumerate().filter(|(_, e)| *e != 0)),
            ExponentVector::Sparse { support, values, .. } => Box::new(support.iter().zip(values.iter().copied()))
        }
    }
}

///
/// A monomial `c * x0^e0 * ... * x(n-1)^e(n-1)`, i.e. a product of a field coefficient
/// and powers of the `n` indeterminates of a polynomial ring. `n` is called the field size
/// of the monomial.
///
/// The exponents are either stored densely or sparsely, see [`MonomialKind`]. The total
/// degree is cached on construction.
///
/// Division between monomials doubles as a divisibility test: if `rhs` does not divide
/// `self`, then `self.div(rhs)` is the zero monomial, i.e. a monomial with zero coefficient.
///
/// # Example
/// ```
/// # use groebner::field::*;
/// # use groebner::rings::rational::*;
/// # use groebner::rings::multivariate::*;
/// let x2y = Monomial::new(MonomialKind::Dense, &[2, 1], Rational::from_integer(3));
/// let xy = Monomial::new(MonomialKind::Dense, &[1, 1], Rational::one_el());
/// assert_eq!(&[1, 0], &*x2y.div(&xy).exponents());
/// assert!(xy.div(&x2y).is_zero());
/// ```
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Monomial<F: Field> {
    exponents: ExponentVector,
    coefficient: F,
    degree: u64
}

impl<F: Field> Monomial<F> {

    pub fn new(kind: MonomialKind, exponents: &[Exponent], coefficient: F) -> Self {
        Monomial {
            degree: exponents.iter().map(|e| *e as u64).sum(),
            exponents: ExponentVector::new(kind, exponents),
            coefficient
        }
    }

    pub fn dense(exponents: &[Exponent], coefficient: F) -> Self {
        Self::new(MonomialKind::Dense, exponents, coefficient)
    }

    pub fn sparse(exponents: &[Exponent], coefficient: F) -> Self {
        Self::new(MonomialKind::Sparse, exponents, coefficient)
    }

    ///
    /// Returns the constant monomial `coefficient` in a ring with `field_size` indeterminates.
    ///
    pub fn constant(kind: MonomialKind, field_size: usize, coefficient: F) -> Self {
        Self::new(kind, &vec![0; field_size], coefficient)
    }

    pub fn kind(&self) -> MonomialKind {
        self.exponents.kind()
    }

    ///
    /// The number of indeterminates of the ring this monomial belongs to.
    ///
    pub fn field_size(&self) -> usize {
        self.exponents.len()
    }

    ///
    /// The total degree, i.e. the sum of all exponents.
    ///
    pub fn degree(&self) -> u64 {
        self.degree
    }

    pub fn coefficient(&self) -> &F {
        &self.coefficient
    }

    pub fn exponent(&self, i: usize) -> Exponent {
        assert!(i < self.field_size());
        self.exponents.at(i)
    }

    ///
    /// Returns the exponents of all indeterminates. This only allocates for sparse monomials.
    ///
    pub fn exponents(&self) -> Cow<[Exponent]> {
        self.exponents.to_dense()
    }

    ///
    /// Iterates over the pairs `(i, ei)` with `ei != 0`, in ascending order of `i`.
    ///
    pub fn nonzero_exponents<'a>(&'a self) -> impl 'a + Iterator<Item = (usize, Exponent)> {
        self.exponents.nonzero()
    }

    fn check_compatible(&self, rhs: &Self) -> Result<(), AlgebraError> {
        if self.field_size() != rhs.field_size() {
            return Err(AlgebraError::RingMismatch { expected: self.field_size(), found: rhs.field_size() });
        }
        if self.kind() != rhs.kind() {
            return Err(AlgebraError::RepresentationMismatch);
        }
        return self.coefficient.check_compatible(&rhs.coefficient);
    }

    fn combine_exponents<G>(&self, rhs: &Self, mut f: G) -> Option<Vec<Exponent>>
        where G: FnMut(Exponent, Exponent) -> Option<Exponent>
    {
        let lhs = self.exponents();
        let rhs = rhs.exponents();
        lhs.iter().zip(rhs.iter()).map(|(a, b)| f(*a, *b)).collect()
    }

    ///
    /// Computes the product of two monomials, or fails if they have different field size
    /// or representation.
    ///
    pub fn try_mul(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        let exponents = self.exponents().iter().zip(rhs.exponents().iter()).map(|(a, b)| a + b).collect::<Vec<_>>();
        return Ok(Self::new(self.kind(), &exponents, self.coefficient.mul_ref(&rhs.coefficient)));
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        match self.try_mul(rhs) {
            Ok(result) => result,
            Err(e) => panic!("{}", e)
        }
    }

    ///
    /// Multiplies the coefficient by `factor`, without changing the exponents.
    ///
    pub fn scale(&self, factor: &F) -> Self {
        self.with_coefficient(self.coefficient.mul_ref(factor))
    }

    ///
    /// Computes the quotient `self / rhs`. If `rhs` does not divide `self`, i.e. some exponent
    /// would become negative, the zero monomial is returned instead.
    ///
    /// Fails if the monomials have different field size or representation, or if `rhs` has
    /// zero coefficient but divides `self`.
    ///
    pub fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_compatible(rhs)?;
        return match self.combine_exponents(rhs, |a, b| a.checked_sub(b)) {
            Some(exponents) => Ok(Self::new(self.kind(), &exponents, self.coefficient.try_div(&rhs.coefficient)?)),
            None => Ok(Self::constant(self.kind(), self.field_size(), self.coefficient.zero()))
        };
    }

    pub fn div(&self, rhs: &Self) -> Self {
        match self.try_div(rhs) {
            Ok(result) => result,
            Err(e) => panic!("{}", e)
        }
    }

    ///
    /// Returns whether every exponent of `self` is at most the corresponding exponent of `rhs`.
    /// Ignores the coefficients.
    ///
    pub fn divides(&self, rhs: &Self) -> bool {
        assert_eq!(self.field_size(), rhs.field_size());
        self.nonzero_exponents().all(|(i, e)| e <= rhs.exponents.at(i))
    }

    pub fn with_coefficient(&self, coefficient: F) -> Self {
        Monomial {
            exponents: self.exponents.clone(),
            coefficient,
            degree: self.degree
        }
    }

    ///
    /// Returns the same monomial, stored in the given representation.
    ///
    pub fn to_kind(&self, kind: MonomialKind) -> Self {
        if kind == self.kind() {
            return self.clone();
        }
        Self::new(kind, &self.exponents(), self.coefficient.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.degree == 0 && self.coefficient.is_one()
    }

    ///
    /// Returns whether no indeterminate occurs in both monomials. A constant monomial is never
    /// disjoint with anything.
    ///
    pub fn disjoint_with(&self, other: &Self) -> bool {
        assert_eq!(self.field_size(), other.field_size());
        let shares_variable = match (&self.exponents, &other.exponents) {
            (ExponentVector::Sparse { support: lhs, .. }, ExponentVector::Sparse { support: rhs, .. }) => lhs.intersects(rhs),
            _ => self.nonzero_exponents().any(|(i, _)| other.exponents.at(i) != 0)
        };
        return !shares_variable && self.degree != 0;
    }

    ///
    /// Compares only the exponents of two monomials, ignoring coefficients and representation.
    ///
    pub fn exponents_equal(&self, other: &Self) -> bool {
        if self.field_size() != other.field_size() || self.degree != other.degree {
            return false;
        }
        match (&self.exponents, &other.exponents) {
            (ExponentVector::Dense(lhs), ExponentVector::Dense(rhs)) => lhs == rhs,
            (ExponentVector::Sparse { support: ls, values: lv, .. }, ExponentVector::Sparse { support: rs, values: rv, .. }) => ls == rs && lv == rv,
            _ => self.exponents() == other.exponents()
        }
    }

    ///
    /// Returns whether `self` is a power of `other` (ignoring coefficients), i.e. whether there is
    /// an integer `k >= 0` such that every exponent of `self` is `k` times the corresponding
    /// exponent of `other`.
    ///
    pub fn is_power_of(&self, other: &Self) -> bool {
        assert_eq!(self.field_size(), other.field_size());
        let (pivot, pivot_exponent) = match other.nonzero_exponents().next() {
            Some(pivot) => pivot,
            None => return self.degree == 0
        };
        let lhs = self.exponents();
        let rhs = other.exponents();
        if lhs[pivot] % pivot_exponent != 0 {
            return false;
        }
        let k = (lhs[pivot] / pivot_exponent) as u64;
        return lhs.iter().zip(rhs.iter()).all(|(a, b)| *a as u64 == k * *b as u64);
    }

    ///
    /// Returns an iterator over all monomials that divide `self`, except `self` and `1`.
    /// Each divisor is yielded with coefficient one. See [`Divisors`] for the order.
    ///
    pub fn divisors(&self) -> Divisors<F> {
        Divisors::new(self)
    }
}

///
/// Computes the least common multiple of two monomials, with coefficient one.
///
/// Unlike the other operations, this accepts monomials of different representation.
/// The result is sparse if both inputs are sparse, and dense otherwise.
///
pub fn monomial_lcm<F: Field>(lhs: &Monomial<F>, rhs: &Monomial<F>) -> Monomial<F> {
    assert_eq!(lhs.field_size(), rhs.field_size());
    let kind = if lhs.kind() == MonomialKind::Sparse && rhs.kind() == MonomialKind::Sparse {
        MonomialKind::Sparse
    } else {
        MonomialKind::Dense
    };
    let mut exponents = vec![0; lhs.field_size()];
    for (i, e) in lhs.nonzero_exponents().chain(rhs.nonzero_exponents()) {
        exponents[i] = max(exponents[i], e);
    }
    return Monomial::new(kind, &exponents, lhs.coefficient.one());
}

impl<F: Field> Display for Monomial<F> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = (0..self.field_size()).map(|i| format!("x{}", i)).collect::<Vec<_>>();
        ring::format_monomial(self, &names, f)
    }
}

#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;

#[cfg(test)]
fn gf7(x: i64) -> GaloisFieldElement {
    GaloisFieldElement::new(x, 7).unwrap()
}

#[test]
fn test_sparse_storage() {
    let mut exponents = vec![0; 130];
    exponents[1] = 2;
    exponents[64] = 1;
    exponents[129] = 5;
    let m = Monomial::sparse(&exponents, gf7(1));
    assert_eq!(130, m.field_size());
    assert_eq!(8, m.degree());
    assert_eq!(2, m.exponent(1));
    assert_eq!(1, m.exponent(64));
    assert_eq!(5, m.exponent(129));
    assert_eq!(0, m.exponent(128));
    assert_eq!(vec![(1, 2), (64, 1), (129, 5)], m.nonzero_exponents().collect::<Vec<_>>());
    assert_eq!(&exponents[..], &*m.exponents());
    assert!(m.exponents_equal(&m.to_kind(MonomialKind::Dense)));
}

#[test]
fn test_mul_div() {
    for kind in [MonomialKind::Dense, MonomialKind::Sparse] {
        let a = Monomial::new(kind, &[2, 0, 1], gf7(3));
        let b = Monomial::new(kind, &[1, 0, 1], gf7(2));
        let product = a.mul(&b);
        assert_eq!(&[3, 0, 2], &*product.exponents());
        assert_eq!(gf7(6), *product.coefficient());
        assert_eq!(5, product.degree());

        let quotient = a.div(&b);
        assert_eq!(&[1, 0, 0], &*quotient.exponents());
        assert_eq!(gf7(5), *quotient.coefficient());

        assert!(b.div(&a).is_zero());
        assert!(b.div(&a).exponents().iter().all(|e| *e == 0));
        assert!(b.divides(&a));
        assert!(!a.divides(&b));
    }
}

#[test]
fn test_divisibility_sentinel() {
    let all = [[0, 0], [1, 0], [0, 1], [2, 1], [1, 2], [3, 3]];
    for m in all {
        for d in all {
            let m = Monomial::dense(&m, gf7(1));
            let d = Monomial::dense(&d, gf7(1));
            let exceeds = (0..2).any(|i| d.exponent(i) > m.exponent(i));
            assert_eq!(exceeds, m.div(&d).is_zero());
        }
    }
}

#[test]
fn test_mismatch_errors() {
    let dense = Monomial::dense(&[1, 0], gf7(1));
    let sparse = Monomial::sparse(&[1, 0], gf7(1));
    let bigger = Monomial::dense(&[1, 0, 0], gf7(1));
    assert_eq!(Err(AlgebraError::RepresentationMismatch), dense.try_mul(&sparse));
    assert_eq!(Err(AlgebraError::RingMismatch { expected: 2, found: 3 }), dense.try_div(&bigger));
    assert!(dense.try_div(&dense.with_coefficient(gf7(0))).is_err());
}

#[test]
fn test_disjoint_with() {
    for kind in [MonomialKind::Dense, MonomialKind::Sparse] {
        let x = Monomial::new(kind, &[1, 0, 0], gf7(1));
        let yz = Monomial::new(kind, &[0, 1, 1], gf7(1));
        let xz = Monomial::new(kind, &[1, 0, 1], gf7(1));
        let one = Monomial::new(kind, &[0, 0, 0], gf7(1));
        assert!(x.disjoint_with(&yz));
        assert!(!x.disjoint_with(&xz));
        assert!(!one.disjoint_with(&yz));
        assert!(x.disjoint_with(&one));
    }
}

#[test]
fn test_is_power_of() {
    let x = Monomial::dense(&[1, 0], gf7(1));
    let x2y = Monomial::dense(&[2, 1], gf7(1));
    let x4y2 = Monomial::dense(&[4, 2], gf7(3));
    let one = Monomial::dense(&[0, 0], gf7(1));
    assert!(Monomial::dense(&[5, 0], gf7(1)).is_power_of(&x));
    assert!(x4y2.is_power_of(&x2y));
    assert!(!x2y.is_power_of(&x4y2));
    assert!(!Monomial::dense(&[4, 1], gf7(1)).is_power_of(&x2y));
    assert!(one.is_power_of(&x));
    assert!(one.is_power_of(&one));
    assert!(!x.is_power_of(&one));
}

#[test]
fn test_monomial_lcm() {
    let a = Monomial::sparse(&[2, 0, 1], gf7(3));
    let b = Monomial::sparse(&[1, 3, 0], gf7(2));
    let lcm = monomial_lcm(&a, &b);
    assert_eq!(MonomialKind::Sparse, lcm.kind());
    assert_eq!(&[2, 3, 1], &*lcm.exponents());
    assert!(lcm.coefficient().is_one());

    let mixed = monomial_lcm(&a, &b.to_kind(MonomialKind::Dense));
    assert_eq!(MonomialKind::Dense, mixed.kind());
    assert!(mixed.exponents_equal(&lcm));
}

#[test]
fn test_display() {
    assert_eq!("3*x0^2*x2", format!("{}", Monomial::dense(&[2, 0, 1], gf7(3))));
    assert_eq!("x1", format!("{}", Monomial::sparse(&[0, 1, 0], gf7(1))));
    assert_eq!("5", format!("{}", Monomial::dense(&[0, 0], gf7(5))));
}
