use tracing::instrument;

use crate::field::Field;
use crate::rings::multivariate::polynomial::Polynomial;

use super::buchberger::s_polynomial;

///
/// Makes every polynomial monic, and then removes all polynomials whose leading monomial
/// is divisible by the leading monomial of another remaining polynomial.
///
/// If `basis` is a Groebner basis, the result is a minimal Groebner basis of the same ideal.
/// Of multiple polynomials with the same leading monomial, only the last one is kept.
/// Zero polynomials are dropped.
///
#[instrument(skip_all, level = "trace")]
pub fn minimize_groebner_basis<F: Field>(basis: &[Polynomial<F>]) -> Vec<Polynomial<F>> {
    let monic = basis.iter().filter(|f| !f.is_zero()).map(|f| f.normalize()).collect::<Vec<_>>();
    let mut keep = vec![true; monic.len()];
    for i in 0..monic.len() {
        let lm_i = match monic[i].leading_term() {
            Some(lm) => lm,
            None => continue
        };
        for j in 0..monic.len() {
            if i != j && keep[j] {
                if let Some(lm_j) = monic[j].leading_term() {
                    if lm_j.divides(lm_i) {
                        keep[i] = false;
                        break;
                    }
                }
            }
        }
    }
    return monic.into_iter().zip(keep.into_iter()).filter(|(_, keep)| *keep).map(|(f, _)| f).collect();
}

///
/// Minimizes the given basis via [`minimize_groebner_basis()`], and then reduces every
/// element modulo all the others.
///
/// If `basis` is a Groebner basis, the result is the reduced Groebner basis of the
/// same ideal, which is unique up to order.
///
#[instrument(skip_all, level = "trace")]
pub fn reduce_groebner_basis<F: Field>(basis: &[Polynomial<F>]) -> Vec<Polynomial<F>> {
    let minimized = minimize_groebner_basis(basis);
    if minimized.len() <= 1 {
        return minimized;
    }
    let mut result = Vec::with_capacity(minimized.len());
    for i in 0..minimized.len() {
        let others = minimized.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, f)| f.clone()).collect::<Vec<_>>();
        result.push(minimized[i].reduce(&others));
    }
    return result;
}

///
/// Checks whether the given polynomials form a Groebner basis of the ideal they
/// generate, using Buchberger's criterion: the S-polynomial of every pair of basis
/// elements must reduce to zero modulo the basis.
///
#[instrument(skip_all, level = "trace")]
pub fn is_groebner_basis<F: Field>(basis: &[Polynomial<F>]) -> bool {
    let basis = basis.iter().filter(|f| !f.is_zero()).cloned().collect::<Vec<_>>();
    for j in 0..basis.len() {
        for i in 0..j {
            if !s_polynomial(&basis[i], &basis[j]).reduce(&basis).is_zero() {
                return false;
            }
        }
    }
    return true;
}

#[cfg(test)]
use crate::rings::multivariate::ordered::MonomialOrdering;
#[cfg(test)]
use crate::rings::multivariate::ring::PolynomialRing;
#[cfg(test)]
use crate::rings::multivariate::MonomialKind;
#[cfg(test)]
use crate::rings::rational::Rational;

#[cfg(test)]
fn q(x: i64) -> Rational {
    Rational::from_integer(x)
}

#[test]
fn test_minimize_groebner_basis() {
    let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::Lex, MonomialKind::Dense);
    let f = ring.from_terms([(q(2), &[("x", 2)][..]), (q(4), &[("y", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(3), &[("x", 1)][..]), (q(1), &[][..])]).unwrap();
    let h = ring.from_terms([(q(-1), &[("y", 2)][..])]).unwrap();
    let minimized = minimize_groebner_basis(&[f, g, h, ring.zero()]);
    assert_eq!(2, minimized.len());
    assert_eq!(ring.from_terms([(q(1), &[("x", 1)][..]), (Rational::from_fraction(1, 3), &[][..])]).unwrap(), minimized[0]);
    assert_eq!(ring.from_terms([(q(1), &[("y", 2)][..])]).unwrap(), minimized[1]);
}

#[test]
fn test_minimize_equal_leading_monomials() {
    let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::DegLex, MonomialKind::Sparse);
    let f = ring.from_terms([(q(1), &[("x", 1)][..]), (q(1), &[("y", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(2), &[("x", 1)][..])]).unwrap();
    let minimized = minimize_groebner_basis(&[f, g]);
    assert_eq!(vec![ring.indeterminate(0)], minimized);
}

#[test]
fn test_reduce_groebner_basis() {
    let ring = PolynomialRing::new(["x", "y", "z"], Rational::one_el(), MonomialOrdering::Lex, MonomialKind::Dense);
    let twisted_cubic = [
        ring.from_terms([(q(1), &[("x", 2)][..]), (q(-1), &[("y", 1)][..])]).unwrap(),
        ring.from_terms([(q(1), &[("x", 1), ("y", 1)][..]), (q(-1), &[("z", 1)][..])]).unwrap(),
        ring.from_terms([(q(1), &[("x", 1), ("z", 1)][..]), (q(-1), &[("y", 2)][..])]).unwrap(),
        ring.from_terms([(q(1), &[("y", 3)][..]), (q(-1), &[("z", 2)][..])]).unwrap()
    ];
    // same leading monomials and same ideal, but neither monic nor reduced
    let basis = [
        twisted_cubic[0].add(&twisted_cubic[1]),
        twisted_cubic[1].clone(),
        twisted_cubic[2].clone(),
        twisted_cubic[3].scale(&q(2))
    ];
    assert!(is_groebner_basis(&basis));
    let reduced = reduce_groebner_basis(&basis);
    assert_eq!(twisted_cubic.to_vec(), reduced);
    assert!(is_groebner_basis(&reduced));
}

#[test]
fn test_is_groebner_basis() {
    let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::DegLex, MonomialKind::Dense);
    let f = ring.from_terms([(q(1), &[("x", 2)][..]), (q(-1), &[("y", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(1), &[("x", 1), ("y", 1)][..]), (q(-1), &[][..])]).unwrap();
    // S(f, g) = -y^2 + x does not reduce to zero
    assert!(!is_groebner_basis(&[f.clone(), g.clone()]));
    assert!(is_groebner_basis(&[f]));
    assert!(is_groebner_basis::<Rational>(&[]));
}
