//!
//! # groebner
//!
//! Computation of Groebner bases of polynomial ideals over the rational numbers, prime fields
//! and (approximately) the real and complex numbers.
//!
//! Polynomials are [`rings::multivariate::polynomial::Polynomial`]s, whose terms are stored either
//! with dense or sparse exponent vectors, sorted w.r.t. one of the orderings in
//! [`rings::multivariate::ordered`]. A Groebner basis can then be computed using
//!  - [`algorithms::buchberger::buchberger()`], with a choice of [`algorithms::buchberger::PairSelectionStrategy`]
//!  - [`algorithms::f4::f4()`], which uses linear algebra on [`matrix::macaulay::MacaulayMatrix`]
//!  - `algorithms::m4gb::m4gb()`, currently unstable
//!
//! and a zero-dimensional basis can be converted to the lexicographic ordering with
//! `algorithms::fglm::fglm()`. All of them report progress through a
//! [`computation::ComputationController`].
//!
//! ```
//! # use groebner::field::Field;
//! # use groebner::rings::rational::Rational;
//! # use groebner::rings::multivariate::ring::PolynomialRing;
//! # use groebner::rings::multivariate::ordered::MonomialOrdering;
//! # use groebner::rings::multivariate::MonomialKind;
//! # use groebner::algorithms::buchberger::*;
//! # use groebner::algorithms::basis::*;
//! # use groebner::computation::DontObserve;
//! let ring = PolynomialRing::new(["x", "y"], Rational::one_el(), MonomialOrdering::Lex, MonomialKind::Dense);
//! let one = Rational::one_el();
//! // x^2 - y, x y - 1
//! let f = ring.from_terms([(one.clone(), &[("x", 2)][..]), (one.negate(), &[("y", 1)][..])]).unwrap();
//! let g = ring.from_terms([(one.clone(), &[("x", 1), ("y", 1)][..]), (one.negate(), &[][..])]).unwrap();
//! let basis = reduce_groebner_basis(&buchberger(vec![f, g], PairSelectionStrategy::Normal, DontObserve));
//! assert!(is_groebner_basis(&basis));
//! // the lex basis contains y^3 - 1
//! assert!(basis.iter().any(|h| h.degree() == 3 && h.len() == 2));
//! ```
//!

///
/// Contains [`error::AlgebraError`], which is returned when incompatible algebraic objects
/// are combined.
///
pub mod error;
///
/// Contains the trait [`field::Field`] that all coefficient types implement.
///
pub mod field;
///
/// Contains the implementations of the supported coefficient fields, and of monomials and
/// multivariate polynomials over them.
///
pub mod rings;
///
/// Contains the dense matrices used by the linear-algebra based algorithms.
///
pub mod matrix;
///
/// Contains the trait [`computation::ComputationController`], through which long-running
/// algorithms report their progress.
///
#[macro_use]
pub mod computation;
///
/// Contains the algorithms of this crate, most notably the Groebner basis algorithms.
///
pub mod algorithms;
///
/// Contains generators for the standard benchmark systems Katsura and Reimer.
///
pub mod providers;
///
/// Contains [`graph::Graph`], and the decision of k-colorability via Groebner bases.
///
pub mod graph;
///
/// Contains [`tracing::LogAlgorithmSubscriber`], a `tracing` subscriber that prints a
/// compact trace of nested algorithm runs.
///
pub mod tracing;
///
/// Contains helpers for testing the `serde` implementations of this crate.
///
pub mod serialization;
