use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::Field;

use super::{Exponent, Monomial};

///
/// Trait for term orders, that is an ordering on all monomials with
/// a fixed number of variables subject to the constraints
///  - `mp < np` whenever `m < n`
///  - `m <= mp`
///
/// for all monomials `m, n, p`. Coefficients are ignored.
///
/// The leading term of a polynomial is its largest term w.r.t. the order.
///
pub trait MonomialOrder: Clone + Debug + Send + Sync + 'static {

    ///
    /// Compares two exponent vectors of the same length.
    ///
    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering;

    ///
    /// A small integer identifying the family of the order. Two polynomials can only be
    /// combined if their orders have the same id.
    ///
    /// Note that orders of the same family with different parameters (e.g. two weighted
    /// orders with different weights) currently share their id.
    ///
    fn order_id(&self) -> u32;

    ///
    /// Whether monomials of larger total degree are always larger.
    ///
    fn is_graded(&self) -> bool;

    fn compare<F: Field>(&self, lhs: &Monomial<F>, rhs: &Monomial<F>) -> Ordering {
        assert_eq!(lhs.field_size(), rhs.field_size(), "cannot compare monomials of different rings");
        self.compare_exponents(&lhs.exponents(), &rhs.exponents())
    }
}

fn total_degree(exponents: &[Exponent]) -> u64 {
    exponents.iter().map(|e| *e as u64).sum()
}

///
/// Standard lexicographic order of monomials.
///
/// To compare two monomials lexicographically, just compare the exponents
/// of one indeterminate after the other, and return the first comparison result
/// that is not "equal".
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lex;

impl MonomialOrder for Lex {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        assert_eq!(lhs.len(), rhs.len());
        for i in 0..lhs.len() {
            if lhs[i] < rhs[i] {
                return Ordering::Less;
            } else if lhs[i] > rhs[i] {
                return Ordering::Greater;
            }
        }
        return Ordering::Equal;
    }

    fn order_id(&self) -> u32 {
        1
    }

    fn is_graded(&self) -> bool {
        false
    }
}

///
/// Graded lexicographic order, i.e. monomials are first compared by total degree,
/// and ties are broken by [`Lex`].
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegLex;

impl MonomialOrder for DegLex {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        total_degree(lhs).cmp(&total_degree(rhs)).then_with(|| Lex.compare_exponents(lhs, rhs))
    }

    fn order_id(&self) -> u32 {
        2
    }

    fn is_graded(&self) -> bool {
        true
    }
}

///
/// Graded reverse lexicographic order.
///
/// Monomials are first compared by total degree. On a tie, the exponents are compared
/// starting from the last indeterminate, and the monomial with the larger exponent at the
/// first difference is the smaller one.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegRevLex;

impl MonomialOrder for DegRevLex {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        assert_eq!(lhs.len(), rhs.len());
        let lhs_deg = total_degree(lhs);
        let rhs_deg = total_degree(rhs);
        if lhs_deg < rhs_deg {
            return Ordering::Less;
        } else if lhs_deg > rhs_deg {
            return Ordering::Greater;
        } else {
            for i in (0..lhs.len()).rev() {
                if lhs[i] > rhs[i] {
                    return Ordering::Less
                } else if lhs[i] < rhs[i] {
                    return Ordering::Greater;
                }
            }
            return Ordering::Equal;
        }
    }

    fn order_id(&self) -> u32 {
        3
    }

    fn is_graded(&self) -> bool {
        true
    }
}

///
/// Order that compares monomials by their weighted degree `sum_i wi ei`, and breaks
/// ties using another order (by default [`Lex`]).
///
/// The number of weights must match the number of indeterminates of the compared monomials.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedOrder {
    weights: Vec<i64>,
    tiebreaker: Box<MonomialOrdering>
}

impl WeightedOrder {

    pub fn new(weights: Vec<i64>) -> Self {
        Self::with_tiebreaker(weights, MonomialOrdering::Lex)
    }

    pub fn with_tiebreaker(weights: Vec<i64>, tiebreaker: MonomialOrdering) -> Self {
        WeightedOrder { weights, tiebreaker: Box::new(tiebreaker) }
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    fn weighted_degree(&self, exponents: &[Exponent]) -> i64 {
        exponents.iter().zip(self.weights.iter()).map(|(e, w)| *e as i64 * w).sum()
    }
}

impl MonomialOrder for WeightedOrder {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        assert_eq!(lhs.len(), rhs.len());
        assert_eq!(self.weights.len(), lhs.len(), "weight vector does not fit the ring");
        self.weighted_degree(lhs).cmp(&self.weighted_degree(rhs))
            .then_with(|| self.tiebreaker.compare_exponents(lhs, rhs))
    }

    fn order_id(&self) -> u32 {
        4
    }

    fn is_graded(&self) -> bool {
        !self.weights.is_empty() && self.weights.iter().all(|w| *w == self.weights[0]) && self.weights[0] > 0
    }
}

///
/// Block order that splits the indeterminates into an "elimination" block and a "retained"
/// block. Monomials are first compared by their restriction to the elimination block, and
/// only in case of a tie by their restriction to the retained block. Both comparisons use
/// the same inner order.
///
/// Its main use is the fact that every Groebner basis w.r.t. this order contains a Groebner
/// basis of the elimination ideal, i.e. of the intersection with the polynomial ring in the
/// retained indeterminates.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliminationOrder {
    eliminated: Vec<bool>,
    inner: Box<MonomialOrdering>
}

impl EliminationOrder {

    ///
    /// Creates a new [`EliminationOrder`]. Every index `0..n` must occur in exactly one
    /// of `elimination` and `retained`, where `n` is the total number of given indices.
    ///
    pub fn new(elimination: &[usize], retained: &[usize], inner: MonomialOrdering) -> Self {
        let n = elimination.len() + retained.len();
        let mut eliminated = vec![None; n];
        for (indices, value) in [(elimination, true), (retained, false)] {
            for i in indices {
                assert!(*i < n, "index {} out of range, the blocks must partition 0..{}", i, n);
                assert!(eliminated[*i].is_none(), "index {} occurs in more than one block", i);
                eliminated[*i] = Some(value);
            }
        }
        EliminationOrder {
            eliminated: eliminated.into_iter().map(|x| x == Some(true)).collect(),
            inner: Box::new(inner)
        }
    }

    fn restrict(&self, exponents: &[Exponent], eliminated: bool) -> Vec<Exponent> {
        exponents.iter().zip(self.eliminated.iter()).map(|(e, block)| if *block == eliminated { *e } else { 0 }).collect()
    }
}

impl MonomialOrder for EliminationOrder {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        assert_eq!(lhs.len(), rhs.len());
        assert_eq!(self.eliminated.len(), lhs.len(), "elimination blocks do not fit the ring");
        match self.inner.compare_exponents(&self.restrict(lhs, true), &self.restrict(rhs, true)) {
            Ordering::Equal => self.inner.compare_exponents(&self.restrict(lhs, false), &self.restrict(rhs, false)),
            ordering => ordering
        }
    }

    fn order_id(&self) -> u32 {
        5
    }

    fn is_graded(&self) -> bool {
        false
    }
}

///
/// The closed set of term orders a [`super::polynomial::Polynomial`] can be sorted by.
///
/// Cloning is cheap, the parameterized orders are shared.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MonomialOrdering {
    Lex,
    /// Graded lexicographic order, see [`DegLex`]
    DegLex,
    /// Graded reverse lexicographic order, see [`DegRevLex`]
    DegRevLex,
    Weighted(Arc<WeightedOrder>),
    Elimination(Arc<EliminationOrder>)
}

impl From<WeightedOrder> for MonomialOrdering {

    fn from(value: WeightedOrder) -> Self {
        MonomialOrdering::Weighted(Arc::new(value))
    }
}

impl From<EliminationOrder> for MonomialOrdering {

    fn from(value: EliminationOrder) -> Self {
        MonomialOrdering::Elimination(Arc::new(value))
    }
}

impl MonomialOrder for MonomialOrdering {

    fn compare_exponents(&self, lhs: &[Exponent], rhs: &[Exponent]) -> Ordering {
        match self {
            MonomialOrdering::Lex => Lex.compare_exponents(lhs, rhs),
            MonomialOrdering::DegLex => DegLex.compare_exponents(lhs, rhs),
            MonomialOrdering::DegRevLex => DegRevLex.compare_exponents(lhs, rhs),
            MonomialOrdering::Weighted(order) => order.compare_exponents(lhs, rhs),
            MonomialOrdering::Elimination(order) => order.compare_exponents(lhs, rhs)
        }
    }

    fn order_id(&self) -> u32 {
        match self {
            MonomialOrdering::Lex => Lex.order_id(),
            MonomialOrdering::DegLex => DegLex.order_id(),
            MonomialOrdering::DegRevLex => DegRevLex.order_id(),
            MonomialOrdering::Weighted(order) => order.order_id(),
            MonomialOrdering::Elimination(order) => order.order_id()
        }
    }

    fn is_graded(&self) -> bool {
        match self {
            MonomialOrdering::Lex => false,
            MonomialOrdering::DegLex | MonomialOrdering::DegRevLex => true,
            MonomialOrdering::Weighted(order) => order.is_graded(),
            MonomialOrdering::Elimination(order) => order.is_graded()
        }
    }
}

impl Display for MonomialOrdering {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonomialOrdering::Lex => write!(f, "lex"),
            MonomialOrdering::DegLex => write!(f, "grlex"),
            MonomialOrdering::DegRevLex => write!(f, "grevlex"),
            MonomialOrdering::Weighted(order) => write!(f, "weighted{:?}", order.weights()),
            MonomialOrdering::Elimination(_) => write!(f, "elimination")
        }
    }
}

#[cfg(test)]
fn all_monomials_deg_le_2() -> Vec<[Exponent; 3]> {
    vec![
        [0, 0, 0],
        [0, 0, 1],
        [0, 0, 2],
        [0, 1, 0],
        [0, 1, 1],
        [0, 2, 0],
        [1, 0, 0],
        [1, 0, 1],
        [1, 1, 0],
        [2, 0, 0]
    ]
}

#[cfg(test)]
fn sorted_descending<O: MonomialOrder>(order: O) -> Vec<[Exponent; 3]> {
    let mut monomials = all_monomials_deg_le_2();
    monomials.sort_by(|l, r| order.compare_exponents(l, r).reverse());
    return monomials;
}

#[test]
fn test_lex() {
    assert_eq!(vec![
        [2, 0, 0],
        [1, 1, 0],
        [1, 0, 1],
        [1, 0, 0],
        [0, 2, 0],
        [0, 1, 1],
        [0, 1, 0],
        [0, 0, 2],
        [0, 0, 1],
        [0, 0, 0]
    ], sorted_descending(Lex));
}

#[test]
fn test_deglex() {
    assert_eq!(vec![
        [2, 0, 0],
        [1, 1, 0],
        [1, 0, 1],
        [0, 2, 0],
        [0, 1, 1],
        [0, 0, 2],
        [1, 0, 0],
        [0, 1, 0],
        [0, 0, 1],
        [0, 0, 0]
    ], sorted_descending(DegLex));
}

#[test]
fn test_degrevlex() {
    assert_eq!(vec![
        [2, 0, 0],
        [1, 1, 0],
        [0, 2, 0],
        [1, 0, 1],
        [0, 1, 1],
        [0, 0, 2],
        [1, 0, 0],
        [0, 1, 0],
        [0, 0, 1],
        [0, 0, 0]
    ], sorted_descending(DegRevLex));
    assert_eq!(Ordering::Greater, DegRevLex.compare_exponents(&[2, 3], &[1, 4]));
    assert_eq!(Ordering::Less, DegRevLex.compare_exponents(&[1, 0, 1], &[0, 2, 0]));
    assert_eq!(Ordering::Greater, DegLex.compare_exponents(&[1, 0, 1], &[0, 2, 0]));
}

#[test]
fn test_weighted() {
    let order = WeightedOrder::new(vec![1, 2, 3]);
    assert_eq!(Ordering::Greater, order.compare_exponents(&[0, 0, 1], &[2, 0, 0]));
    assert_eq!(Ordering::Less, order.compare_exponents(&[0, 1, 0], &[0, 0, 1]));
    // weighted degree 3 on both sides, lex decides
    assert_eq!(Ordering::Greater, order.compare_exponents(&[1, 1, 0], &[0, 0, 1]));

    let with_grevlex = WeightedOrder::with_tiebreaker(vec![1, 1], MonomialOrdering::DegRevLex);
    assert!(with_grevlex.is_graded());
    assert_eq!(Ordering::Greater, with_grevlex.compare_exponents(&[2, 3], &[1, 4]));
}

#[test]
#[should_panic]
fn test_weighted_wrong_length() {
    WeightedOrder::new(vec![1, 2]).compare_exponents(&[1, 0, 0], &[0, 1, 0]);
}

#[test]
fn test_elimination() {
    let order = EliminationOrder::new(&[0], &[1, 2], MonomialOrdering::DegRevLex);
    assert_eq!(Ordering::Greater, order.compare_exponents(&[1, 0, 0], &[0, 5, 5]));
    assert_eq!(Ordering::Less, order.compare_exponents(&[1, 0, 0], &[1, 0, 1]));
    assert_eq!(Ordering::Equal, order.compare_exponents(&[2, 1, 1], &[2, 1, 1]));

    let order = EliminationOrder::new(&[2], &[0, 1], MonomialOrdering::Lex);
    assert_eq!(Ordering::Greater, order.compare_exponents(&[0, 0, 1], &[5, 0, 0]));
}

#[test]
#[should_panic]
fn test_elimination_overlapping_blocks() {
    EliminationOrder::new(&[0, 1], &[1], MonomialOrdering::Lex);
}

#[test]
fn test_order_ids() {
    let ids = [
        MonomialOrdering::Lex,
        MonomialOrdering::DegLex,
        MonomialOrdering::DegRevLex,
        WeightedOrder::new(vec![1]).into(),
        EliminationOrder::new(&[0], &[], MonomialOrdering::Lex).into()
    ].iter().map(|o: &MonomialOrdering| o.order_id()).collect::<Vec<_>>();
    assert_eq!(vec![1, 2, 3, 4, 5], ids);
    let a: MonomialOrdering = WeightedOrder::new(vec![1, 2]).into();
    let b: MonomialOrdering = WeightedOrder::new(vec![2, 1]).into();
    assert_eq!(a.order_id(), b.order_id());
}

#[test]
fn test_compare_monomials() {
    use crate::rings::rational::Rational;
    let a = Monomial::sparse(&[1, 0, 1], Rational::from_integer(7));
    let b = Monomial::dense(&[0, 2, 0], Rational::from_integer(-1));
    assert_eq!(Ordering::Less, MonomialOrdering::DegRevLex.compare(&a, &b));
    assert_eq!(Ordering::Greater, MonomialOrdering::Lex.compare(&a, &b));
}
