use std::collections::HashMap;

use tracing::{event, instrument, Level};

use crate::algorithms::linsolve::gauss::MatrixSolver;
use crate::computation::ComputationController;
use crate::field::Field;
use crate::matrix::OwnedMatrix;
use crate::rings::multivariate::ordered::{MonomialOrder, MonomialOrdering};
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{Exponent, Monomial};

///
/// A monomial that is linearly independent of all smaller ones modulo the ideal, together
/// with its normal form w.r.t. the input basis.
///
struct StandardMonomial<F: Field> {
    monomial: Monomial<F>,
    normal_form: Polynomial<F>
}

///
/// Tries to write `normal_form` as linear combination of the normal forms of the given
/// standard monomials. Since these are linearly independent, the coefficients are unique
/// if they exist.
///
fn express_in_standard_monomials<F: Field>(normal_form: &Polynomial<F>, staircase: &[StandardMonomial<F>], zero: &F) -> Option<Vec<F>> {
    let mut row_of = HashMap::new();
    let mut row_monomials: Vec<Vec<Exponent>> = Vec::new();
    for m in staircase.iter().flat_map(|s| s.normal_form.terms()).chain(normal_form.terms()) {
        let exponents = m.exponents().into_owned();
        if !row_of.contains_key(&exponents) {
            row_of.insert(exponents.clone(), row_monomials.len());
            row_monomials.push(exponents);
        }
    }
    let matrix = OwnedMatrix::from_fn(row_monomials.len(), staircase.len(), |i, j| {
        staircase[j].normal_form.coefficient_of(&row_monomials[i]).cloned().unwrap_or_else(|| zero.clone())
    });
    let values = row_monomials.iter().map(|e| normal_form.coefficient_of(e).cloned().unwrap_or_else(|| zero.clone())).collect();
    return MatrixSolver::new(matrix, values).solve();
}

///
/// Removes the smallest candidate w.r.t. `ordering`.
///
fn next_candidate<F: Field>(candidates: &mut Vec<Monomial<F>>, ordering: &MonomialOrdering) -> Option<Monomial<F>> {
    if candidates.is_empty() {
        return None;
    }
    let mut best = 0;
    for k in 1..candidates.len() {
        if ordering.compare(&candidates[k], &candidates[best]).is_lt() {
            best = k;
        }
    }
    return Some(candidates.swap_remove(best));
}

///
/// Converts a Groebner basis of a zero-dimensional ideal into the reduced Groebner
/// basis of the same ideal w.r.t. the lexicographic ordering, using the FGLM algorithm
/// by Faugere, Gianni, Lazard and Mora.
///
/// The input is usually a basis w.r.t. [`MonomialOrdering::DegRevLex`], which is much
/// cheaper to compute than a lex basis directly. Monomials are enumerated in increasing
/// lex order, starting with `1`. For each one, its normal form modulo the input basis is
/// computed, and checked for linear dependence on the normal forms of the previously
/// found standard monomials. If it is independent, the monomial is a new standard
/// monomial, and its multiples by all indeterminates become new candidates. Otherwise,
/// the linear relation gives a new element of the lex basis, and no multiple of the
/// monomial has to be considered anymore. Once a basis element with leading monomial
/// a power of `x0` is found, all remaining candidates are multiples of it, and we are done.
///
/// If the ideal is not zero-dimensional, this does not terminate.
///
/// # Panics
///
/// Panics if `basis` contains no nonzero polynomial, since the zero ideal is not
/// zero-dimensional.
///
/// Progress is reported to `controller` as follows:
///  - `.` means that a standard monomial was found
///  - `g` means that a new basis element was found
///
#[stability::unstable(feature = "enable")]
#[instrument(skip_all, level = "trace")]
pub fn fglm<F, Controller>(basis: &[Polynomial<F>], controller: Controller) -> Vec<Polynomial<F>>
    where F: Field,
        Controller: ComputationController
{
    let basis = basis.iter().filter(|f| !f.is_zero()).cloned().collect::<Vec<_>>();
    let first = match basis.first() {
        Some(f) => f,
        None => panic!("the zero ideal is not zero-dimensional")
    };
    let lt = match first.leading_term() {
        Some(lt) => lt,
        None => unreachable!()
    };
    let field_size = first.field_size();
    let input_ordering = first.ordering().clone();
    let lex = MonomialOrdering::Lex;
    let kind = lt.kind();
    let one = lt.coefficient().one();
    let zero = lt.coefficient().zero();

    controller.run_computation(format_args!("fglm(len={}, vars={})", basis.len(), field_size), |controller| {
        let mut x0_exponents = vec![0; field_size];
        if field_size > 0 {
            x0_exponents[0] = 1;
        }
        let x0 = Monomial::new(kind, &x0_exponents, one.clone());

        let mut result: Vec<Polynomial<F>> = Vec::new();
        let mut staircase: Vec<StandardMonomial<F>> = Vec::new();
        let mut candidates = vec![Monomial::constant(kind, field_size, one.clone())];

        while let Some(candidate) = next_candidate(&mut candidates, &lex) {
            if result.iter().any(|g| g.leading_term().map(|lt| lt.divides(&candidate)).unwrap_or(false)) {
                continue;
            }
            let normal_form = Polynomial::from_monomial(candidate.clone(), input_ordering.clone()).reduce(&basis);
            match express_in_standard_monomials(&normal_form, &staircase, &zero) {
                Some(coefficients) => {
                    log_progress!(controller, "g");
                    let mut g = Polynomial::from_monomial(candidate.clone(), lex.clone());
                    for (s, c) in staircase.iter().zip(coefficients.iter()) {
                        if !c.is_zero() {
                            g = g.sub(&Polynomial::from_monomial(s.monomial.scale(c), lex.clone()));
                        }
                    }
                    event!(Level::TRACE, basis_len = result.len() + 1, staircase = staircase.len(), "fglm_basis_element");
                    let finished = candidate.is_power_of(&x0);
                    result.push(g);
                    if finished {
                        break;
                    }
                },
                None => {
                    log_progress!(controller, ".");
                    for i in 0..field_size {
                        let mut exponents = vec![0; field_size];
                        exponents[i] = 1;
                        let next = candidate.mul(&Monomial::new(kind, &exponents, one.clone()));
                        if !candidates.iter().any(|c| c.exponents_equal(&next)) {
                            candidates.push(next);
                        }
                    }
                    staircase.push(StandardMonomial { monomial: candidate, normal_form });
                }
            }
        }
        return result;
    })
}

#[cfg(test)]
use crate::algorithms::basis::{is_groebner_basis, reduce_groebner_basis};
#[cfg(test)]
use crate::algorithms::buchberger::{buchberger, PairSelectionStrategy};
#[cfg(test)]
use crate::computation::TEST_LOG_PROGRESS;
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

#[test]
fn test_fglm_round_trip() {
    LogAlgorithmSubscriber::init_test();
    let q = |x: i64| Rational::from_integer(x);
    let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::DegRevLex, MonomialKind::Dense);
    // x^2 + y^2 - 5, x y - 2 has the four solutions (+-1, +-2), (+-2, +-1)
    let f = ring.from_terms([(q(1), &[("x", 2)][..]), (q(1), &[("y", 2)][..]), (q(-5), &[][..])]).unwrap();
    let g = ring.from_terms([(q(1), &[("x", 1), ("y", 1)][..]), (q(-2), &[][..])]).unwrap();
    let grevlex_basis = reduce_groebner_basis(&buchberger(vec![f.clone(), g.clone()], PairSelectionStrategy::Normal, TEST_LOG_PROGRESS));

    let lex_basis = fglm(&grevlex_basis, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&lex_basis));
    assert!(lex_basis.iter().all(|h| h.ordering() == &MonomialOrdering::Lex));
    let last_lt = lex_basis.last().unwrap().leading_term().unwrap();
    assert!(last_lt.is_power_of(&ring.indeterminate(0).leading_monomial().unwrap()));
    for h in [&f, &g] {
        assert!(h.with_ordering(MonomialOrdering::Lex).reduce(&lex_basis).is_zero());
    }

    // the reduced lex basis is { y^4 - 5 y^2 + 4, x + 1/2 y^3 - 5/2 y }
    let lex_ring = ring.with_ordering(MonomialOrdering::Lex);
    let expected = vec![
        lex_ring.from_terms([(q(1), &[("y", 4)][..]), (q(-5), &[("y", 2)][..]), (q(4), &[][..])]).unwrap(),
        lex_ring.from_terms([(q(1), &[("x", 1)][..]), (Rational::from_fraction(1, 2), &[("y", 3)][..]), (Rational::from_fraction(-5, 2), &[("y", 1)][..])]).unwrap()
    ];
    assert_eq!(expected, lex_basis);
}

#[test]
fn test_fglm_three_variables() {
    LogAlgorithmSubscriber::init_test();
    let gf = |x: i64| GaloisFieldElement::new(x, 11).unwrap();
    let ring = PolynomialRing::new(["x", "y", "z"], gf(1), MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let generators = vec![
        ring.from_terms([(gf(1), &[("x", 2)][..]), (gf(1), &[("y", 1)][..]), (gf(-3), &[][..])]).unwrap(),
        ring.from_terms([(gf(1), &[("y", 2)][..]), (gf(-1), &[("z", 1)][..])]).unwrap(),
        ring.from_terms([(gf(1), &[("z", 2)][..]), (gf(1), &[("x", 1)][..]), (gf(-2), &[][..])]).unwrap()
    ];
    let grevlex_basis = buchberger(generators.clone(), PairSelectionStrategy::Sugar, TEST_LOG_PROGRESS);
    let lex_basis = fglm(&reduce_groebner_basis(&grevlex_basis), TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&lex_basis));
    for f in &generators {
        assert!(f.with_ordering(MonomialOrdering::Lex).reduce(&lex_basis).is_zero());
    }
    let expected = reduce_groebner_basis(&buchberger(generators.iter().map(|f| f.with_ordering(MonomialOrdering::Lex)).collect(), PairSelectionStrategy::Normal, TEST_LOG_PROGRESS));
    assert_eq!(expected.len(), lex_basis.len());
    for g in &lex_basis {
        assert!(expected.contains(g));
    }
}

#[test]
fn test_fglm_unit_ideal() {
    let gf = |x: i64| GaloisFieldElement::new(x, 5).unwrap();
    let ring = PolynomialRing::new(["x", "y"], gf(1), MonomialOrdering::DegRevLex, MonomialKind::Dense);
    let lex_basis = fglm(&[ring.from_int(3)], TEST_LOG_PROGRESS);
    assert_eq!(vec![ring.with_ordering(MonomialOrdering::Lex).one()], lex_basis);
}

#[test]
#[should_panic(expected = "the zero ideal is not zero-dimensional")]
fn test_fglm_zero_ideal() {
    let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::DegRevLex, MonomialKind::Dense);
    fglm(&[ring.zero(), ring.zero()], TEST_LOG_PROGRESS);
}

#[test]
#[should_panic(expected = "the zero ideal is not zero-dimensional")]
fn test_fglm_empty_basis() {
    fglm::<Rational, _>(&[], TEST_LOG_PROGRESS);
}
