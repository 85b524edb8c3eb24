use std::collections::HashSet;

use append_only_vec::AppendOnlyVec;
use tracing::{event, instrument, Level};

use crate::computation::ComputationController;
use crate::field::Field;
use crate::matrix::macaulay::MacaulayMatrix;
use crate::rings::multivariate::ordered::{MonomialOrder, MonomialOrdering};
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{monomial_lcm, Exponent, Monomial};

fn leading_term<F: Field>(f: &Polynomial<F>) -> &Monomial<F> {
    match f.leading_term() {
        Some(lt) => lt,
        None => unreachable!("rows and basis elements are nonzero")
    }
}

///
/// Removes all pairs whose leading monomials have an lcm of minimal total degree from
/// `pairs`, and returns them together with that degree.
///
fn select_pairs<F: Field>(pairs: &mut Vec<(usize, usize)>, basis: &AppendOnlyVec<Polynomial<F>>) -> (u64, Vec<(usize, usize)>) {
    let degrees = pairs.iter().map(|(i, j)| monomial_lcm(leading_term(&basis[*i]), leading_term(&basis[*j])).degree()).collect::<Vec<_>>();
    let min_degree = degrees.iter().copied().min().unwrap_or(0);
    let mut selected = Vec::new();
    let mut remaining = Vec::new();
    for (pair, degree) in pairs.drain(..).zip(degrees.into_iter()) {
        if degree == min_degree {
            selected.push(pair);
        } else {
            remaining.push(pair);
        }
    }
    *pairs = remaining;
    return (min_degree, selected);
}

///
/// Returns both "halves" of the S-polynomials of the given pairs, i.e. for a pair `(f, g)`
/// the polynomials `f * lcm / LT(f)` and `g * lcm / LT(g)`.
///
fn s_polynomial_halves<F: Field>(pairs: &[(usize, usize)], basis: &AppendOnlyVec<Polynomial<F>>) -> Vec<Polynomial<F>> {
    let mut result = Vec::with_capacity(pairs.len() * 2);
    for (i, j) in pairs {
        let (f, g) = (&basis[*i], &basis[*j]);
        let lcm = monomial_lcm(leading_term(f), leading_term(g));
        result.push(f.mul_monomial(&lcm.div(leading_term(f))));
        result.push(g.mul_monomial(&lcm.div(leading_term(g))));
    }
    return result;
}

///
/// Adds to `rows` multiples of basis elements until every monomial occurring in a row,
/// that is divisible by a leading monomial of the basis, is the leading monomial of some
/// row.
///
/// Monomials are processed from largest to smallest w.r.t. the ordering, which makes
/// the result equal to what a full reduction of all rows would touch.
///
fn symbolic_preprocessing<F: Field>(rows: &mut Vec<Polynomial<F>>, basis: &AppendOnlyVec<Polynomial<F>>, ordering: &MonomialOrdering) {
    let mut seen = rows.iter().map(|f| leading_term(f).exponents().into_owned()).collect::<HashSet<Vec<Exponent>>>();
    let mut todo = Vec::new();
    for f in rows.iter() {
        for m in f.terms().skip(1) {
            if seen.insert(m.exponents().into_owned()) {
                todo.push(m.with_coefficient(m.coefficient().one()));
            }
        }
    }
    while !todo.is_empty() {
        let mut largest = 0;
        for k in 1..todo.len() {
            if ordering.compare(&todo[k], &todo[largest]).is_gt() {
                largest = k;
            }
        }
        let m = todo.swap_remove(largest);
        if let Some(reducer) = basis.iter().find(|b| leading_term(b).divides(&m)) {
            let row = reducer.mul_monomial(&m.div(leading_term(reducer)));
            for t in row.terms().skip(1) {
                if seen.insert(t.exponents().into_owned()) {
                    todo.push(t.with_coefficient(t.coefficient().one()));
                }
            }
            rows.push(row);
        }
    }
}

///
/// Computes a Groebner basis of the ideal generated by `input` using Faugere's F4 algorithm.
///
/// Instead of reducing one S-polynomial at a time, F4 selects all critical pairs whose
/// leading monomials have an lcm of minimal degree, and reduces all of their S-polynomials
/// simultaneously. For this, the two "halves" of each S-polynomial are put into a
/// [`MacaulayMatrix`], together with all multiples of basis elements that would be used
/// while reducing them (found during "symbolic preprocessing"). After gaussian elimination,
/// every row whose leading monomial is not the leading monomial of an input row is a new
/// basis element.
///
/// The result contains the nonzero input polynomials, followed by all the found new
/// elements. Every new element forms critical pairs with all previously known basis
/// elements.
///
/// Progress is reported to `controller` as follows:
///  - `{d}` means that all pairs of lcm degree `d` are reduced
///  - `(rows=...)` reports the number of rows of the current matrix
///  - `s` means that a new basis element was found
///
#[instrument(skip_all, level = "trace")]
pub fn f4<F, Controller>(input: Vec<Polynomial<F>>, controller: Controller) -> Vec<Polynomial<F>>
    where F: Field,
        Controller: ComputationController
{
    let vars = input.first().map(|f| f.field_size()).unwrap_or(0);
    controller.run_computation(format_args!("f4(len={}, vars={})", input.len(), vars), |controller| {
        let basis: AppendOnlyVec<Polynomial<F>> = AppendOnlyVec::new();
        for f in input.into_iter().filter(|f| !f.is_zero()) {
            if basis.len() > 0 {
                if let Err(e) = basis[0].check_compatible(&f) {
                    panic!("{}", e);
                }
            }
            basis.push(f);
        }
        let ordering = match basis.iter().next() {
            Some(f) => f.ordering().clone(),
            None => return Vec::new()
        };

        let mut pairs = Vec::new();
        for j in 0..basis.len() {
            for i in 0..j {
                pairs.push((i, j));
            }
        }

        while !pairs.is_empty() {
            let (degree, selected) = select_pairs(&mut pairs, &basis);
            log_progress!(controller, "{{{}}}", degree);

            let mut rows = s_polynomial_halves(&selected, &basis);
            symbolic_preprocessing(&mut rows, &basis, &ordering);
            let leading_monomials = rows.iter().map(|f| leading_term(f).exponents().into_owned()).collect::<HashSet<_>>();
            log_progress!(controller, "(rows={})", rows.len());
            event!(Level::TRACE, degree = degree, pairs = selected.len(), rows = rows.len(), "f4_round");

            let mut matrix = MacaulayMatrix::new(&rows);
            matrix.row_reduce();
            for f in matrix.polynomials() {
                if !leading_monomials.contains(&*leading_term(&f).exponents()) {
                    log_progress!(controller, "s");
                    let new_index = basis.push(f);
                    for i in 0..new_index {
                        pairs.push((i, new_index));
                    }
                }
            }
        }
        return basis.into_vec();
    })
}

#[cfg(test)]
use crate::algorithms::basis::{is_groebner_basis, minimize_groebner_basis, reduce_groebner_basis};
#[cfg(test)]
use crate::algorithms::buchberger::{buchberger, PairSelectionStrategy};
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
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn sorted_leading_monomials<F: Field>(basis: &[Polynomial<F>]) -> Vec<Vec<Exponent>> {
    let mut result = basis.iter().map(|f| leading_term(f).exponents().into_owned()).collect::<Vec<_>>();
    result.sort();
    return result;
}

#[test]
fn test_f4_small() {
    LogAlgorithmSubscriber::init_test();
    let gf = |x: i64| GaloisFieldElement::new(x, 7).unwrap();
    let ring = PolynomialRing::new(["x", "y"], gf(1), MonomialOrdering::DegRevLex, MonomialKind::Dense);
    // x^2 y - 1, x y^2 - x
    let f = ring.from_terms([(gf(1), &[("x", 2), ("y", 1)][..]), (gf(-1), &[][..])]).unwrap();
    let g = ring.from_terms([(gf(1), &[("x", 1), ("y", 2)][..]), (gf(-1), &[("x", 1)][..])]).unwrap();
    let gb = f4(vec![f.clone(), g.clone()], TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
    assert!(f.reduce(&gb).is_zero());
    assert!(g.reduce(&gb).is_zero());
    let expected = reduce_groebner_basis(&buchberger(vec![f, g], PairSelectionStrategy::Normal, TEST_LOG_PROGRESS));
    assert_eq!(sorted_leading_monomials(&expected), sorted_leading_monomials(&reduce_groebner_basis(&gb)));
}

#[test]
fn test_f4_katsura3() {
    LogAlgorithmSubscriber::init_test();
    let input = katsura(3, MonomialOrdering::DegLex, MonomialKind::Dense);
    let gb = f4(input.clone(), TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
    for f in &input {
        assert!(f.reduce(&gb).is_zero());
    }
    let expected = buchberger(input, PairSelectionStrategy::Normal, TEST_LOG_PROGRESS);
    assert_eq!(sorted_leading_monomials(&minimize_groebner_basis(&expected)), sorted_leading_monomials(&minimize_groebner_basis(&gb)));
}

#[test]
fn test_f4_sparse_reimer3() {
    LogAlgorithmSubscriber::init_test();
    let input = reimer(3, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let gb = f4(input, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
}

#[test]
fn test_f4_trivial() {
    let gf = |x: i64| GaloisFieldElement::new(x, 3).unwrap();
    let ring = PolynomialRing::new(["x"], gf(1), MonomialOrdering::Lex, MonomialKind::Dense);
    assert!(f4(vec![ring.zero()], TEST_LOG_PROGRESS).is_empty());
    assert_eq!(vec![ring.indeterminate(0)], f4(vec![ring.indeterminate(0)], TEST_LOG_PROGRESS));
}

#[test]
#[ignore]
fn test_f4_katsura5() {
    LogAlgorithmSubscriber::init_test();
    let input = katsura(5, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let gb = f4(input, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
}
