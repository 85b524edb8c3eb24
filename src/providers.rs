use crate::rings::galois::GaloisFieldElement;
use crate::rings::multivariate::ordered::MonomialOrdering;
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{Exponent, Monomial, MonomialKind};

const BENCHMARK_MODULUS: u64 = 5;

fn gf5(value: i64) -> GaloisFieldElement {
    match GaloisFieldElement::new(value, BENCHMARK_MODULUS) {
        Ok(result) => result,
        Err(_) => unreachable!("5 is prime")
    }
}

fn power_of_variable(field_size: usize, variable: usize, exponent: Exponent) -> Vec<Exponent> {
    let mut result = vec![0; field_size];
    result[variable] = exponent;
    return result;
}

///
/// Returns the Katsura system with `n + 1` variables `x0, ..., xn` over `GF(5)`.
///
/// It consists of the normalization `x0 + 2 (x1 + ... + xn) - 1` and, for every `m < n`,
/// the equation
/// ```text
///   sum_{l = -n}^{n} x_|l| x_|m - l| - x_m
/// ```
/// where all terms with `|m - l| > n` are skipped.
///
/// # Example
/// ```
/// # use groebner::providers::katsura;
/// # use groebner::rings::multivariate::ordered::MonomialOrdering;
/// # use groebner::rings::multivariate::MonomialKind;
/// let system = katsura(2, MonomialOrdering::DegLex, MonomialKind::Dense);
/// assert_eq!(3, system.len());
/// assert!(system.iter().all(|f| f.field_size() == 3));
/// ```
///
pub fn katsura(n: usize, ordering: MonomialOrdering, kind: MonomialKind) -> Vec<Polynomial<GaloisFieldElement>> {
    assert!(n >= 1, "the katsura system requires at least 2 variables");
    let field_size = n + 1;
    let mut result = Vec::with_capacity(n + 1);

    let mut normalization = vec![Monomial::new(kind, &vec![0; field_size], gf5(-1))];
    for i in 0..=n {
        normalization.push(Monomial::new(kind, &power_of_variable(field_size, i, 1), gf5(if i == 0 { 1 } else { 2 })));
    }
    result.push(Polynomial::new(field_size, ordering.clone(), normalization));

    let n = n as i64;
    for m in 0..n {
        let mut terms = vec![Monomial::new(kind, &power_of_variable(field_size, m as usize, 1), gf5(-1))];
        for l in -n..=n {
            if m - l > n {
                continue;
            }
            let mut exponents = power_of_variable(field_size, l.unsigned_abs() as usize, 1);
            exponents[(m - l).unsigned_abs() as usize] += 1;
            terms.push(Monomial::new(kind, &exponents, gf5(1)));
        }
        result.push(Polynomial::new(field_size, ordering.clone(), terms));
    }
    return result;
}

///
/// Returns the Reimer system with `n` variables over `GF(5)`, consisting of the
/// `n` equations
/// ```text
///   2 x0^k - 2 x1^k + 2 x2^k - ... - 1
/// ```
/// for `k = 2, ..., n + 1`.
///
pub fn reimer(n: usize, ordering: MonomialOrdering, kind: MonomialKind) -> Vec<Polynomial<GaloisFieldElement>> {
    assert!(n >= 3, "the reimer system requires at least 3 variables");
    return (2..=(n + 1)).map(|k| {
        let mut terms = (0..n).map(|i| Monomial::new(kind, &power_of_variable(n, i, k as Exponent), gf5(if i % 2 == 0 { 2 } else { -2 }))).collect::<Vec<_>>();
        terms.push(Monomial::new(kind, &vec![0; n], gf5(-1)));
        Polynomial::new(n, ordering.clone(), terms)
    }).collect();
}

#[cfg(test)]
use crate::rings::multivariate::ring::PolynomialRing;

#[test]
fn test_katsura2() {
    let gf = |x: i64| GaloisFieldElement::new(x, 5).unwrap();
    let ring = PolynomialRing::new(["x0", "x1", "x2"], gf(1), MonomialOrdering::DegLex, MonomialKind::Dense);
    let expected = vec![
        ring.from_terms([(gf(1), &[("x0", 1)][..]), (gf(2), &[("x1", 1)][..]), (gf(2), &[("x2", 1)][..]), (gf(-1), &[][..])]).unwrap(),
        // m = 0: x0^2 + 2 x1^2 + 2 x2^2 - x0
        ring.from_terms([(gf(1), &[("x0", 2)][..]), (gf(2), &[("x1", 2)][..]), (gf(2), &[("x2", 2)][..]), (gf(-1), &[("x0", 1)][..])]).unwrap(),
        // m = 1: 2 x0 x1 + 2 x1 x2 - x1
        ring.from_terms([(gf(2), &[("x0", 1), ("x1", 1)][..]), (gf(2), &[("x1", 1), ("x2", 1)][..]), (gf(-1), &[("x1", 1)][..])]).unwrap()
    ];
    assert_eq!(expected, katsura(2, MonomialOrdering::DegLex, MonomialKind::Dense));
}

#[test]
fn test_katsura_sparse_matches_dense() {
    let dense = katsura(4, MonomialOrdering::DegRevLex, MonomialKind::Dense);
    let sparse = katsura(4, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    assert_eq!(5, sparse.len());
    for (d, s) in dense.iter().zip(sparse.iter()) {
        assert_eq!(Some(MonomialKind::Sparse), s.kind());
        assert_eq!(d, &s.to_kind(MonomialKind::Dense));
    }
}

#[test]
fn test_reimer3() {
    let gf = |x: i64| GaloisFieldElement::new(x, 5).unwrap();
    let ring = PolynomialRing::new(["x", "y", "z"], gf(1), MonomialOrdering::Lex, MonomialKind::Sparse);
    let system = reimer(3, MonomialOrdering::Lex, MonomialKind::Sparse);
    assert_eq!(3, system.len());
    let expected = ring.from_terms([(gf(2), &[("x", 4)][..]), (gf(-2), &[("y", 4)][..]), (gf(2), &[("z", 4)][..]), (gf(-1), &[][..])]).unwrap();
    assert_eq!(expected, system[2]);
    assert!(system.iter().enumerate().all(|(i, f)| f.degree() == i as u64 + 2));
}

#[test]
#[should_panic]
fn test_reimer_too_small() {
    reimer(2, MonomialOrdering::Lex, MonomialKind::Dense);
}
