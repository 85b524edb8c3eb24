use crate::field::Field;

use super::{Exponent, Monomial, MonomialKind};

///
/// Iterator over all proper divisors of a monomial `m`, i.e. all monomials `d` with
/// `d | m`, `d != m` and `d != 1`. Returned by [`Monomial::divisors()`].
///
/// The divisors are enumerated by counting down the exponent vector in mixed radix,
/// where the first indeterminate is the most significant digit. For example, the divisors
/// of `x0^2 x1^2` are given in the order
/// ```text
/// x0^2 x1, x0^2, x0 x1^2, x0 x1, x0, x1^2, x1
/// ```
/// Every divisor is yielded with coefficient one, and in the representation of `m`.
///
/// The iterator only depends on `m`, so calling [`Monomial::divisors()`] again (or cloning
/// the iterator) restarts the enumeration.
///
#[derive(Clone, Debug)]
pub struct Divisors<F: Field> {
    bound: Vec<Exponent>,
    current: Vec<Exponent>,
    kind: MonomialKind,
    one: F,
    done: bool
}

impl<F: Field> Divisors<F> {

    pub(super) fn new(monomial: &Monomial<F>) -> Self {
        let bound = monomial.exponents().into_owned();
        Divisors {
            current: bound.clone(),
            bound,
            kind: monomial.kind(),
            one: monomial.coefficient().one(),
            done: false
        }
    }

    ///
    /// Moves `current` to the next smaller exponent vector below `bound`, and returns
    /// false if there is none (or only the zero vector) left.
    ///
    fn step(&mut self) -> bool {
        let i = match (0..self.current.len()).rev().filter(|i| self.current[*i] > 0).next() {
            Some(i) => i,
            None => return false
        };
        self.current[i] -= 1;
        for j in (i + 1)..self.current.len() {
            self.current[j] = self.bound[j];
        }
        return self.current.iter().any(|e| *e != 0);
    }
}

impl<F: Field> Iterator for Divisors<F> {

    type Item = Monomial<F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.step() {
            self.done = true;
            return None;
        }
        return Some(Monomial::new(self.kind, &self.current, self.one.clone()));
    }
}

impl<F: Field> std::iter::FusedIterator for Divisors<F> {}

#[cfg(test)]
use crate::rings::rational::Rational;

#[test]
fn test_divisors_order() {
    let m = Monomial::dense(&[2, 2], Rational::from_integer(5));
    let divisors = m.divisors().collect::<Vec<_>>();
    assert_eq!(
        vec![vec![2, 1], vec![2, 0], vec![1, 2], vec![1, 1], vec![1, 0], vec![0, 2], vec![0, 1]],
        divisors.iter().map(|d| d.exponents().into_owned()).collect::<Vec<_>>()
    );
    assert!(divisors.iter().all(|d| d.coefficient().is_one()));
    assert!(divisors.iter().all(|d| d.kind() == MonomialKind::Dense));
}

#[test]
fn test_divisors_restartable() {
    let m = Monomial::sparse(&[1, 0, 2], Rational::one_el());
    let mut first = m.divisors();
    first.next();
    let restarted = first.clone();
    assert_eq!(first.count(), restarted.count());
    assert_eq!(4, m.divisors().count());
    assert_eq!(m.divisors().collect::<Vec<_>>(), m.divisors().collect::<Vec<_>>());
    assert!(m.divisors().all(|d| d.kind() == MonomialKind::Sparse && d.divides(&m)));
}

#[test]
fn test_divisors_trivial() {
    assert_eq!(0, Monomial::dense(&[0, 0, 0], Rational::one_el()).divisors().count());
    assert_eq!(0, Monomial::dense(&[0, 1, 0], Rational::one_el()).divisors().count());
    assert_eq!(2, Monomial::dense(&[0, 3], Rational::one_el()).divisors().count());
}
