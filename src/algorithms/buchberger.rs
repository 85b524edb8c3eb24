use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::computation::ComputationController;
use crate::error::AlgebraError;
use crate::field::Field;
use crate::rings::multivariate::monomial_lcm;
use crate::rings::multivariate::ordered::{MonomialOrder, MonomialOrdering};
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::Monomial;

///
/// Computes the S-polynomial of `f` and `g`, i.e. the combination
/// ```text
///   f * lcm / LT(f) - g * lcm / LT(g)
/// ```
/// where `lcm` is the least common multiple of the leading monomials. The leading
/// terms of both summands cancel.
///
/// Both polynomials must be nonzero and belong to the same ring.
///
pub fn try_s_polynomial<F: Field>(f: &Polynomial<F>, g: &Polynomial<F>) -> Result<Polynomial<F>, AlgebraError> {
    f.check_compatible(g)?;
    let (lt_f, lt_g) = match (f.leading_term(), g.leading_term()) {
        (Some(lt_f), Some(lt_g)) => (lt_f, lt_g),
        _ => panic!("the S-polynomial is only defined for nonzero polynomials")
    };
    let lcm = monomial_lcm(lt_f, lt_g);
    let lhs = f.try_mul_monomial(&lcm.try_div(lt_f)?)?;
    let rhs = g.try_mul_monomial(&lcm.try_div(lt_g)?)?;
    return lhs.try_sub(&rhs);
}

///
/// Computes the S-polynomial of `f` and `g`, see [`try_s_polynomial()`].
/// Panics if `f` and `g` belong to different rings.
///
pub fn s_polynomial<F: Field>(f: &Polynomial<F>, g: &Polynomial<F>) -> Polynomial<F> {
    match try_s_polynomial(f, g) {
        Ok(result) => result,
        Err(e) => panic!("{}", e)
    }
}

///
/// The order in which [`buchberger()`] processes the critical pairs.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairSelectionStrategy {
    /// the pairs are processed in the order they were created
    First,
    /// the pair whose leading monomials have the lcm of smallest total degree comes first
    Degree,
    /// the pair whose leading monomials have the smallest lcm w.r.t. the monomial ordering comes first
    #[default]
    Normal,
    /// the pair of smallest "sugar" comes first, i.e. the degree the S-polynomial would have if
    /// the input was homogenized
    Sugar
}

struct CriticalPair<F: Field> {
    i: usize,
    j: usize,
    lcm: Monomial<F>,
    sugar: u64
}

impl<F: Field> CriticalPair<F> {

    fn new(basis: &[Polynomial<F>], i: usize, j: usize) -> Self {
        let f = &basis[i];
        let g = &basis[j];
        let (lm_f, lm_g) = match (f.leading_term(), g.leading_term()) {
            (Some(lm_f), Some(lm_g)) => (lm_f, lm_g),
            _ => unreachable!("basis contains only nonzero polynomials")
        };
        let lcm = monomial_lcm(lm_f, lm_g);
        let sugar = std::cmp::max(f.degree() - lm_f.degree(), g.degree() - lm_g.degree()) + lcm.degree();
        CriticalPair { i, j, lcm, sugar }
    }
}

///
/// Removes the next pair w.r.t. the given strategy from `open`. Among equally good
/// pairs, the oldest one is chosen.
///
fn select_pair<F: Field>(open: &mut Vec<CriticalPair<F>>, strategy: PairSelectionStrategy, ordering: &MonomialOrdering) -> Option<CriticalPair<F>> {
    if open.is_empty() {
        return None;
    }
    let mut best = 0;
    if strategy != PairSelectionStrategy::First {
        for k in 1..open.len() {
            let better = match strategy {
                PairSelectionStrategy::Degree => open[k].lcm.degree() < open[best].lcm.degree(),
                PairSelectionStrategy::Normal => ordering.compare(&open[k].lcm, &open[best].lcm).is_lt(),
                PairSelectionStrategy::Sugar => open[k].sugar < open[best].sugar,
                PairSelectionStrategy::First => unreachable!()
            };
            if better {
                best = k;
            }
        }
    }
    return Some(open.remove(best));
}

///
/// Computes a Groebner basis of the ideal generated by `input` using Buchberger's algorithm.
///
/// The algorithm keeps a list of critical pairs of basis elements. In every step, one
/// pair is selected according to `strategy`, and its S-polynomial is reduced modulo the
/// current basis. If the remainder is nonzero, it is added to the basis, and it forms new
/// critical pairs with all previous basis elements. Once no pairs are left, the basis is
/// a Groebner basis.
///
/// The result contains the nonzero input polynomials, followed by all the found remainders.
/// In particular, it is neither minimal nor reduced, use
/// [`crate::algorithms::basis::reduce_groebner_basis()`] for that.
///
/// Progress is reported to `controller` as follows:
///  - `s` means that an S-polynomial did not reduce to zero
///  - `-` means that an S-polynomial reduced to zero
///  - `(b=...)(S=...)` reports the current size of the basis and the number of open pairs
///
/// # Example
/// ```
/// # use groebner::field::*;
/// # use groebner::computation::*;
/// # use groebner::rings::galois::*;
/// # use groebner::rings::multivariate::*;
/// # use groebner::rings::multivariate::ordered::*;
/// # use groebner::rings::multivariate::ring::*;
/// # use groebner::algorithms::buchberger::*;
/// # use groebner::algorithms::basis::*;
/// let one = GaloisFieldElement::new(1, 7).unwrap();
/// let ring = PolynomialRing::new(["x", "y"], one.clone(), MonomialOrdering::DegRevLex, MonomialKind::Dense);
/// let f = ring.from_terms([(one.clone(), &[("x", 2)][..]), (one.negate(), &[("y", 1)][..])]).unwrap();
/// let g = ring.from_terms([(one.clone(), &[("x", 1), ("y", 1)][..]), (one.negate(), &[][..])]).unwrap();
/// let gb = buchberger(vec![f, g], PairSelectionStrategy::Normal, DontObserve);
/// assert!(is_groebner_basis(&gb));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn buchberger<F, Controller>(input: Vec<Polynomial<F>>, strategy: PairSelectionStrategy, controller: Controller) -> Vec<Polynomial<F>>
    where F: Field,
        Controller: ComputationController
{
    let vars = input.first().map(|f| f.field_size()).unwrap_or(0);
    controller.run_computation(format_args!("buchberger(len={}, vars={}, strategy={:?})", input.len(), vars, strategy), |controller| {
        let mut basis = input.into_iter().filter(|f| !f.is_zero()).collect::<Vec<_>>();
        let ordering = match basis.first() {
            Some(f) => f.ordering().clone(),
            None => return Vec::new()
        };
        for f in &basis[1..] {
            if let Err(e) = basis[0].check_compatible(f) {
                panic!("{}", e);
            }
        }

        let mut open = Vec::new();
        for j in 0..basis.len() {
            for i in 0..j {
                open.push(CriticalPair::new(&basis, i, j));
            }
        }

        let mut processed: usize = 0;
        while let Some(pair) = select_pair(&mut open, strategy, &ordering) {
            let remainder = s_polynomial(&basis[pair.i], &basis[pair.j]).reduce(&basis);
            if remainder.is_zero() {
                log_progress!(controller, "-");
            } else {
                log_progress!(controller, "s");
                basis.push(remainder);
                let new_index = basis.len() - 1;
                for i in 0..new_index {
                    open.push(CriticalPair::new(&basis, i, new_index));
                }
            }
            processed += 1;
            if processed % 64 == 0 {
                log_progress!(controller, "(b={})(S={})", basis.len(), open.len());
                event!(Level::TRACE, basis_len = basis.len(), open_pairs = open.len(), "buchberger_step");
            }
        }
        return basis;
    })
}

#[cfg(test)]
use crate::algorithms::basis::{is_groebner_basis, minimize_groebner_basis, reduce_groebner_basis};
#[cfg(test)]
use crate::computation::TEST_LOG_PROGRESS;
#[cfg(test)]
use crate::providers::{katsura, reimer};
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::multivariate::ring::PolynomialRing;
#[cfg(test)]
use crate::rings::multivariate::MonomialKind;
#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn test_ring(order: MonomialOrdering) -> PolynomialRing<Rational> {
    PolynomialRing::new(["x", "y", "z"], Rational::one_el(), order, MonomialKind::Dense)
}

#[test]
fn test_s_polynomial() {
    let ring = test_ring(MonomialOrdering::DegLex);
    let q = |x: i64| Rational::from_integer(x);
    // f = x^3 y^2 - x^2 y^3 + x, g = 3 x^4 y + y^2
    let f = ring.from_terms([(q(1), &[("x", 3), ("y", 2)][..]), (q(-1), &[("x", 2), ("y", 3)][..]), (q(1), &[("x", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(3), &[("x", 4), ("y", 1)][..]), (q(1), &[("y", 2)][..])]).unwrap();
    // S(f, g) = -x^3 y^3 + x^2 - 1/3 y^3
    let expected = ring.from_terms([(q(-1), &[("x", 3), ("y", 3)][..]), (q(1), &[("x", 2)][..]), (Rational::from_fraction(-1, 3), &[("y", 3)][..])]).unwrap();
    assert_eq!(expected, s_polynomial(&f, &g));
}

#[test]
fn test_s_polynomial_antisymmetric() {
    let ring = test_ring(MonomialOrdering::DegRevLex);
    let q = |x: i64| Rational::from_integer(x);
    let f = ring.from_terms([(q(2), &[("x", 2), ("z", 1)][..]), (q(1), &[("y", 1)][..]), (q(-5), &[][..])]).unwrap();
    let g = ring.from_terms([(q(1), &[("x", 1), ("y", 2)][..]), (q(3), &[("z", 2)][..])]).unwrap();
    assert_eq!(s_polynomial(&f, &g), s_polynomial(&g, &f).negate());
    assert!(s_polynomial(&f, &f).is_zero());
}

#[test]
fn test_s_polynomial_mismatch() {
    let f = test_ring(MonomialOrdering::Lex).indeterminate(0);
    let g = test_ring(MonomialOrdering::DegLex).indeterminate(1);
    assert!(matches!(try_s_polynomial(&f, &g), Err(AlgebraError::OrderingMismatch { .. })));
}

#[test]
fn test_buchberger_small() {
    LogAlgorithmSubscriber::init_test();
    let ring = test_ring(MonomialOrdering::Lex);
    let q = |x: i64| Rational::from_integer(x);
    // the twisted cubic: x^2 - y, x^3 - z
    let f = ring.from_terms([(q(1), &[("x", 2)][..]), (q(-1), &[("y", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(1), &[("x", 3)][..]), (q(-1), &[("z", 1)][..])]).unwrap();
    for strategy in [PairSelectionStrategy::First, PairSelectionStrategy::Degree, PairSelectionStrategy::Normal, PairSelectionStrategy::Sugar] {
        let gb = buchberger(vec![f.clone(), g.clone()], strategy, TEST_LOG_PROGRESS);
        assert!(is_groebner_basis(&gb));
        let reduced = reduce_groebner_basis(&gb);
        // the reduced lex basis is { x^2 - y, xy - z, xz - y^2, y^3 - z^2 }
        let expected = [
            ring.from_terms([(q(1), &[("x", 2)][..]), (q(-1), &[("y", 1)][..])]).unwrap(),
            ring.from_terms([(q(1), &[("x", 1), ("y", 1)][..]), (q(-1), &[("z", 1)][..])]).unwrap(),
            ring.from_terms([(q(1), &[("x", 1), ("z", 1)][..]), (q(-1), &[("y", 2)][..])]).unwrap(),
            ring.from_terms([(q(1), &[("y", 3)][..]), (q(-1), &[("z", 2)][..])]).unwrap()
        ];
        assert_eq!(expected.len(), reduced.len());
        for e in &expected {
            assert!(reduced.contains(e), "missing {} in reduced basis", ring.format(e));
        }
    }
}

#[test]
fn test_buchberger_ignores_zero() {
    let ring = test_ring(MonomialOrdering::DegRevLex);
    let gb = buchberger(vec![ring.zero(), ring.indeterminate(0), ring.zero()], PairSelectionStrategy::default(), TEST_LOG_PROGRESS);
    assert_eq!(vec![ring.indeterminate(0)], gb);
    assert!(buchberger(Vec::<Polynomial<Rational>>::new(), PairSelectionStrategy::First, TEST_LOG_PROGRESS).is_empty());
}

#[test]
fn test_buchberger_katsura3() {
    LogAlgorithmSubscriber::init_test();
    let input = katsura(3, MonomialOrdering::DegLex, MonomialKind::Dense);
    let gb = buchberger(input.clone(), PairSelectionStrategy::Normal, TEST_LOG_PROGRESS);
    let reduced = reduce_groebner_basis(&gb);
    assert!(is_groebner_basis(&reduced));
    for f in &input {
        assert!(f.reduce(&reduced).is_zero());
    }
}

#[test]
fn test_buchberger_reimer3() {
    LogAlgorithmSubscriber::init_test();
    let input = reimer(3, MonomialOrdering::DegLex, MonomialKind::Dense);
    let gb = buchberger(input.clone(), PairSelectionStrategy::Normal, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
    let minimized = minimize_groebner_basis(&gb);
    assert!(minimized.iter().all(|f| f.leading_coefficient().unwrap().is_one()));
    for f in &input {
        assert!(f.reduce(&minimized).is_zero());
    }
}

#[test]
fn test_buchberger_strategies_agree() {
    let input = katsura(2, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let expected = reduce_groebner_basis(&buchberger(input.clone(), PairSelectionStrategy::First, TEST_LOG_PROGRESS));
    for strategy in [PairSelectionStrategy::Degree, PairSelectionStrategy::Normal, PairSelectionStrategy::Sugar] {
        let mut actual = reduce_groebner_basis(&buchberger(input.clone(), strategy, TEST_LOG_PROGRESS));
        assert_eq!(expected.len(), actual.len());
        actual.retain(|f| !expected.contains(f));
        assert!(actual.is_empty());
    }
}

#[test]
#[ignore]
fn test_buchberger_reimer5() {
    LogAlgorithmSubscriber::init_test();
    let input = reimer(5, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let gb = buchberger(input, PairSelectionStrategy::Sugar, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
}

#[cfg(test)]
fn gf5(x: i64) -> GaloisFieldElement {
    GaloisFieldElement::new(x, 5).unwrap()
}

#[test]
fn test_buchberger_unit_ideal() {
    let ring = PolynomialRing::new(["x", "y"], gf5(1), MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    // x y - 1 and x together generate the unit ideal
    let f = ring.from_terms([(gf5(1), &[("x", 1), ("y", 1)][..]), (gf5(-1), &[][..])]).unwrap();
    let g = ring.indeterminate(0);
    let reduced = reduce_groebner_basis(&buchberger(vec![f, g], PairSelectionStrategy::Sugar, TEST_LOG_PROGRESS));
    assert_eq!(vec![ring.one()], reduced);
}
