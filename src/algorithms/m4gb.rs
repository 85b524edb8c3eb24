use std::collections::{HashMap, HashSet};

use tracing::{event, instrument, Level};

use crate::computation::ComputationController;
use crate::field::Field;
use crate::rings::multivariate::ordered::{MonomialOrder, MonomialOrdering};
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{monomial_lcm, Exponent, Monomial, MonomialKind};

fn leading_term<F: Field>(f: &Polynomial<F>) -> &Monomial<F> {
    match f.leading_term() {
        Some(lt) => lt,
        None => unreachable!("stored rows are nonzero")
    }
}

///
/// The state of one run of [`m4gb()`].
///
/// The main idea of M4GB is to store, for every monomial that was reducible at some
/// point, a "row" with this leading monomial, whose tail is fully reduced. Reducing a
/// product `t * f` then amounts to replacing every reducible monomial by the tail of the
/// corresponding row, and rows are only computed once.
///
/// Invariants:
///  - every row is monic, and the leading monomial of every row is divisible by a
///    current or former element of `frontier`
///  - no tail monomial of any row is divisible by an element of `frontier`
///  - `row_index` maps the leading monomial of each row to its position in `rows`
///
struct SearchState<F: Field> {
    field_size: usize,
    ordering: MonomialOrdering,
    kind: MonomialKind,
    one: F,
    /// the leading monomials of the current Groebner basis, none divides another one
    frontier: Vec<Monomial<F>>,
    rows: Vec<Polynomial<F>>,
    row_index: HashMap<Vec<Exponent>, usize>,
    /// critical pairs, given by the leading monomials of the two basis elements
    pairs: Vec<(Monomial<F>, Monomial<F>)>
}

impl<F: Field> SearchState<F> {

    fn new(field_size: usize, ordering: MonomialOrdering, kind: MonomialKind, one: F) -> Self {
        SearchState {
            field_size,
            ordering,
            kind,
            one,
            frontier: Vec::new(),
            rows: Vec::new(),
            row_index: HashMap::new(),
            pairs: Vec::new()
        }
    }

    fn identity(&self) -> Monomial<F> {
        Monomial::constant(self.kind, self.field_size, self.one.clone())
    }

    fn is_reducible(&self, m: &Monomial<F>) -> bool {
        self.frontier.iter().any(|d| d.divides(m))
    }

    fn push_row(&mut self, row: Polynomial<F>) -> usize {
        let index = self.rows.len();
        self.row_index.insert(leading_term(&row).exponents().into_owned(), index);
        self.rows.push(row);
        return index;
    }

    ///
    /// Returns the index of the row with leading monomial `m`, creating it if it does not
    /// exist yet. `m` must be reducible.
    ///
    fn reductor(&mut self, m: &Monomial<F>) -> usize {
        if let Some(index) = self.row_index.get(&*m.exponents()) {
            return *index;
        }
        let divisor = match self.rows.iter().position(|r| leading_term(r).divides(m)) {
            Some(divisor) => divisor,
            None => unreachable!("reducible monomials have a divisor among the rows")
        };
        let monic = m.with_coefficient(self.one.clone());
        let factor = monic.div(leading_term(&self.rows[divisor]));
        let tail = self.rows[divisor].tail();
        let reduced_tail = self.multiply_full_reduce(&factor, &tail);
        let row = reduced_tail.add(&Polynomial::from_monomial(monic, self.ordering.clone()));
        return self.push_row(row);
    }

    ///
    /// Computes `term * f`, with every reducible monomial replaced by the tail of its row,
    /// i.e. a fully reduced polynomial equivalent to `term * f`.
    ///
    fn multiply_full_reduce(&mut self, term: &Monomial<F>, f: &Polynomial<F>) -> Polynomial<F> {
        let mut result = Polynomial::zero(self.field_size, self.ordering.clone());
        for t in f.terms() {
            let product = term.mul(t);
            if self.is_reducible(&product) {
                let index = self.reductor(&product);
                let row = &self.rows[index];
                let factor = product.div(leading_term(row));
                result = result.sub(&row.tail().mul_monomial(&factor));
            } else {
                result = result.add(&Polynomial::from_monomial(product, self.ordering.clone()));
            }
        }
        return result;
    }

    ///
    /// Adds the fully reduced, nonzero polynomial `f` to the basis.
    ///
    /// First, rows for all multiples of `LM(f)` that occur in some tail are created. Then
    /// these new rows and all existing rows are reduced w.r.t. each other, starting with the
    /// largest leading monomial, so that afterwards no tail contains a multiple of `LM(f)`.
    /// Finally, the frontier and the critical pairs are updated.
    ///
    fn update_reduce(&mut self, f: Polynomial<F>) {
        let f = f.normalize();
        let lm = leading_term(&f).with_coefficient(self.one.clone());

        let mut new_rows = vec![f.clone()];
        let mut new_leading = HashSet::new();
        new_leading.insert(lm.exponents().into_owned());
        loop {
            let mut selected: Option<Monomial<F>> = None;
            for g in self.rows.iter().chain(new_rows.iter()) {
                for t in g.terms().skip(1) {
                    if lm.divides(t) && !new_leading.contains(&*t.exponents()) {
                        if selected.as_ref().map(|s| self.ordering.compare(t, s).is_gt()).unwrap_or(true) {
                            selected = Some(t.with_coefficient(self.one.clone()));
                        }
                    }
                }
            }
            let selected = match selected {
                Some(m) => m,
                None => break
            };
            let factor = selected.div(&lm);
            let row = self.multiply_full_reduce(&factor, &f.tail()).add(&Polynomial::from_monomial(selected.clone(), self.ordering.clone()));
            new_leading.insert(selected.exponents().into_owned());
            new_rows.push(row);
        }

        while !new_rows.is_empty() {
            let mut largest = 0;
            for k in 1..new_rows.len() {
                if self.ordering.compare(leading_term(&new_rows[k]), leading_term(&new_rows[largest])).is_gt() {
                    largest = k;
                }
            }
            let h = new_rows.swap_remove(largest);
            let h_lm = leading_term(&h).exponents().into_owned();
            for g in new_rows.iter_mut().chain(self.rows.iter_mut()) {
                if let Some(c) = g.coefficient_of(&h_lm) {
                    if g.len() > 1 && !leading_term(g).exponents_equal(leading_term(&h)) {
                        let c = c.clone();
                        *g = g.sub(&h.scale(&c));
                    }
                }
            }
            self.push_row(h);
        }

        self.update_pairs(lm);
    }

    ///
    /// The Gebauer-Moeller criteria, formulated on leading monomials: adds the pairs of `lm`
    /// with the frontier that are not obviously redundant, removes old pairs that become
    /// redundant, and replaces all frontier elements divisible by `lm` by `lm`.
    ///
    fn update_pairs(&mut self, lm: Monomial<F>) {
        let mut candidates = self.frontier.iter().map(|p| (lm.clone(), p.clone())).collect::<Vec<_>>();
        let mut saved: Vec<(Monomial<F>, Monomial<F>)> = Vec::new();
        while let Some(candidate) = candidates.pop() {
            if lm.disjoint_with(&candidate.1) {
                saved.push(candidate);
                continue;
            }
            let lcm = monomial_lcm(&lm, &candidate.1);
            let redundant = candidates.iter().chain(saved.iter()).any(|other| monomial_lcm(&lm, &other.1).divides(&lcm));
            if !redundant {
                saved.push(candidate);
            }
        }
        // pairs with disjoint leading monomials have an S-polynomial reducing to zero
        saved.retain(|(_, p)| !lm.disjoint_with(p));

        self.pairs.retain(|(x, y)| {
            let lcm = monomial_lcm(x, y);
            !lm.divides(&lcm) || monomial_lcm(x, &lm).exponents_equal(&lcm) || monomial_lcm(&lm, y).exponents_equal(&lcm)
        });
        self.pairs.extend(saved.into_iter().rev());

        self.frontier.retain(|p| !lm.divides(p));
        self.frontier.push(lm);
    }

    ///
    /// Removes the pair with the smallest first monomial.
    ///
    fn select_pair(&mut self) -> Option<(Monomial<F>, Monomial<F>)> {
        if self.pairs.is_empty() {
            return None;
        }
        let mut best = 0;
        for k in 1..self.pairs.len() {
            if self.ordering.compare(&self.pairs[k].0, &self.pairs[best].0).is_lt() {
                best = k;
            }
        }
        return Some(self.pairs.remove(best));
    }

    ///
    /// Computes the S-polynomial of the rows with leading monomials `x` and `y`, fully reduced.
    /// The leading terms cancel, so only the tails are multiplied.
    ///
    fn reduced_s_polynomial(&mut self, x: &Monomial<F>, y: &Monomial<F>) -> Polynomial<F> {
        let f = self.rows[self.row_index[&*x.exponents()]].clone();
        let g = self.rows[self.row_index[&*y.exponents()]].clone();
        let lcm = monomial_lcm(x, y).with_coefficient(self.one.clone());
        let lhs = self.multiply_full_reduce(&lcm.div(leading_term(&f)), &f.tail());
        let rhs = self.multiply_full_reduce(&lcm.div(leading_term(&g)), &g.tail());
        return lhs.sub(&rhs);
    }

    ///
    /// The rows whose leading monomial is in the frontier.
    ///
    fn into_basis(self) -> Vec<Polynomial<F>> {
        let frontier = self.frontier.iter().map(|m| m.exponents().into_owned()).collect::<HashSet<_>>();
        self.rows.into_iter().filter(|f| frontier.contains(&*leading_term(f).exponents())).collect()
    }
}

///
/// Computes a Groebner basis of the ideal generated by `input` using the M4GB algorithm
/// by Makarim and Stevens.
///
/// M4GB stores a fully reduced polynomial for every reducible monomial it encounters, and
/// reuses them whenever the monomial occurs again. Thus, reducing a polynomial never
/// requires more than one lookup per term. The critical pairs are handled as pairs of
/// leading monomials, and are filtered using the Gebauer-Moeller criteria.
///
/// The result is a monic Groebner basis, whose elements have pairwise non-divisible leading
/// monomials and fully reduced tails.
///
/// # Performance
///
/// Since every stored row is fully reduced, its length is bounded only by the number of
/// standard monomials smaller than its leading monomial. W.r.t. [`MonomialOrdering::Lex`],
/// this number grows very quickly, and so do the stored rows, which can make M4GB much slower
/// than [`crate::algorithms::buchberger::buchberger()`] on lex inputs. For a lex basis of a
/// zero-dimensional ideal, prefer computing a basis w.r.t. [`MonomialOrdering::DegRevLex`]
/// and converting it with [`crate::algorithms::fglm::fglm()`].
///
/// Progress is reported to `controller` as follows:
///  - `s` means that a critical pair gave a new basis element
///  - `-` means that a critical pair reduced to zero
///  - `(M=...)(P=...)` reports the number of stored rows and open pairs
///
#[stability::unstable(feature = "enable")]
#[instrument(skip_all, level = "trace")]
pub fn m4gb<F, Controller>(input: Vec<Polynomial<F>>, controller: Controller) -> Vec<Polynomial<F>>
    where F: Field,
        Controller: ComputationController
{
    let vars = input.first().map(|f| f.field_size()).unwrap_or(0);
    controller.run_computation(format_args!("m4gb(len={}, vars={})", input.len(), vars), |controller| {
        let input = input.into_iter().filter(|f| !f.is_zero()).collect::<Vec<_>>();
        let first = match input.first() {
            Some(f) => f,
            None => return Vec::new()
        };
        for f in &input[1..] {
            if let Err(e) = first.check_compatible(f) {
                panic!("{}", e);
            }
        }
        let lt = leading_term(first);
        let kind = lt.kind();
        let mut state = SearchState::new(first.field_size(), first.ordering().clone(), kind, lt.coefficient().one());

        for f in &input {
            let identity = state.identity();
            let reduced = state.multiply_full_reduce(&identity, f);
            if !reduced.is_zero() {
                state.update_reduce(reduced);
            }
        }
        log_progress!(controller, "(M={})(P={})", state.rows.len(), state.pairs.len());

        let mut processed: usize = 0;
        while let Some((x, y)) = state.select_pair() {
            let h = state.reduced_s_polynomial(&x, &y);
            if h.is_zero() {
                log_progress!(controller, "-");
            } else {
                log_progress!(controller, "s");
                state.update_reduce(h);
            }
            processed += 1;
            if processed % 16 == 0 {
                log_progress!(controller, "(M={})(P={})", state.rows.len(), state.pairs.len());
                event!(Level::TRACE, rows = state.rows.len(), pairs = state.pairs.len(), "m4gb_step");
            }
        }
        return state.into_basis();
    })
}

#[cfg(test)]
use crate::algorithms::basis::{is_groebner_basis, minimize_groebner_basis, reduce_groebner_basis};
#[cfg(test)]
use crate::algorithms::buchberger::{buchberger, PairSelectionStrategy};
#[cfg(test)]
use crate::algorithms::f4::f4;
#[cfg(test)]
use crate::computation::TEST_LOG_PROGRESS;
#[cfg(test)]
use crate::providers::{katsura, reimer};
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::multivariate::ordered::{EliminationOrder, WeightedOrder};
#[cfg(test)]
use crate::rings::multivariate::ring::PolynomialRing;
#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn sorted_leading_monomials<F: Field>(basis: &[Polynomial<F>]) -> Vec<Vec<Exponent>> {
    let mut result = basis.iter().map(|f| leading_term(f).exponents().into_owned()).collect::<Vec<_>>();
    result.sort();
    return result;
}

#[test]
fn test_m4gb_small() {
    LogAlgorithmSubscriber::init_test();
    let q = |x: i64| Rational::from_integer(x);
    let ring = PolynomialRing::new(["x", "y", "z"], Rational::one_el(), MonomialOrdering::Lex, MonomialKind::Dense);
    let f = ring.from_terms([(q(1), &[("x", 2)][..]), (q(-1), &[("y", 1)][..])]).unwrap();
    let g = ring.from_terms([(q(1), &[("x", 3)][..]), (q(-1), &[("z", 1)][..])]).unwrap();
    let gb = m4gb(vec![f.clone(), g.clone()], TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
    assert!(f.reduce(&gb).is_zero());
    assert!(g.reduce(&gb).is_zero());
    assert!(gb.iter().all(|h| h.leading_coefficient().unwrap().is_one()));

    let mut expected = reduce_groebner_basis(&buchberger(vec![f, g], PairSelectionStrategy::Normal, TEST_LOG_PROGRESS));
    let mut actual = reduce_groebner_basis(&gb);
    expected.sort_by(|l, r| MonomialOrdering::Lex.compare(leading_term(l), leading_term(r)));
    actual.sort_by(|l, r| MonomialOrdering::Lex.compare(leading_term(l), leading_term(r)));
    assert_eq!(expected, actual);
}

#[test]
fn test_m4gb_unit_ideal() {
    let gf = |x: i64| GaloisFieldElement::new(x, 5).unwrap();
    let ring = PolynomialRing::new(["x", "y"], gf(1), MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let f = ring.from_terms([(gf(1), &[("x", 1), ("y", 1)][..]), (gf(-1), &[][..])]).unwrap();
    let g = ring.from_terms([(gf(2), &[("x", 1)][..])]).unwrap();
    let gb = m4gb(vec![f, g, ring.zero()], TEST_LOG_PROGRESS);
    assert_eq!(vec![ring.one()], gb);
    assert!(ring.one().reduce(&gb).is_zero());
}

#[test]
fn test_m4gb_empty() {
    assert!(m4gb(Vec::<Polynomial<Rational>>::new(), TEST_LOG_PROGRESS).is_empty());
}

#[test]
fn test_katsura3_all_algorithms_agree() {
    LogAlgorithmSubscriber::init_test();
    let input = katsura(3, MonomialOrdering::DegLex, MonomialKind::Dense);
    let from_buchberger = minimize_groebner_basis(&buchberger(input.clone(), PairSelectionStrategy::Normal, TEST_LOG_PROGRESS));
    let from_f4 = minimize_groebner_basis(&f4(input.clone(), TEST_LOG_PROGRESS));
    let from_m4gb = minimize_groebner_basis(&m4gb(input.clone(), TEST_LOG_PROGRESS));
    assert!(is_groebner_basis(&from_m4gb));
    assert_eq!(sorted_leading_monomials(&from_buchberger), sorted_leading_monomials(&from_f4));
    assert_eq!(sorted_leading_monomials(&from_buchberger), sorted_leading_monomials(&from_m4gb));
}

#[test]
fn test_m4gb_reimer3_sparse() {
    LogAlgorithmSubscriber::init_test();
    let input = reimer(3, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let gb = m4gb(input.clone(), TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
    for f in &input {
        assert!(f.reduce(&gb).is_zero());
    }
}

#[cfg(test)]
fn random_system(rng: &mut oorandom::Rand64, ordering: &MonomialOrdering, kind: MonomialKind) -> Vec<Polynomial<GaloisFieldElement>> {
    let zero = GaloisFieldElement::new(0, 7).unwrap();
    let mut result = Vec::new();
    for _ in 0..2 {
        let terms = (0..3).map(|_| {
            let x = rng.rand_range(0..3) as Exponent;
            let y = rng.rand_range(0..(3 - x as u64)) as Exponent;
            let z = rng.rand_range(0..(3 - (x + y) as u64)) as Exponent;
            Monomial::new(kind, &[x, y, z], zero.random(rng))
        }).collect();
        result.push(Polynomial::new(3, ordering.clone(), terms));
    }
    return result;
}

#[test]
fn test_random_systems_all_algorithms_agree() {
    LogAlgorithmSubscriber::init_test();
    let orderings: [MonomialOrdering; 5] = [
        MonomialOrdering::Lex,
        MonomialOrdering::DegLex,
        MonomialOrdering::DegRevLex,
        WeightedOrder::new(vec![1, 2, 3]).into(),
        EliminationOrder::new(&[0], &[1, 2], MonomialOrdering::DegRevLex).into()
    ];
    let mut rng = oorandom::Rand64::new(0x5eed);
    for ordering in &orderings {
        for kind in [MonomialKind::Dense, MonomialKind::Sparse] {
            for _ in 0..10 {
                let input = random_system(&mut rng, ordering, kind);
                let from_buchberger = reduce_groebner_basis(&buchberger(input.clone(), PairSelectionStrategy::Sugar, TEST_LOG_PROGRESS));
                let from_f4 = reduce_groebner_basis(&f4(input.clone(), TEST_LOG_PROGRESS));
                let from_m4gb = reduce_groebner_basis(&m4gb(input.clone(), TEST_LOG_PROGRESS));
                assert!(is_groebner_basis(&from_m4gb));
                for other in [&from_f4, &from_m4gb] {
                    assert_eq!(from_buchberger.len(), other.len(), "{:?} {:?} {:?}", ordering, kind, input);
                    for g in other {
                        assert!(from_buchberger.contains(g), "{:?} {:?} {:?}", ordering, kind, input);
                    }
                }
                for f in &input {
                    assert!(f.reduce(&from_m4gb).is_zero());
                }
            }
        }
    }
}

#[test]
#[ignore]
fn test_m4gb_katsura6() {
    LogAlgorithmSubscriber::init_test();
    let input = katsura(6, MonomialOrdering::DegRevLex, MonomialKind::Sparse);
    let gb = m4gb(input, TEST_LOG_PROGRESS);
    assert!(is_groebner_basis(&gb));
}
