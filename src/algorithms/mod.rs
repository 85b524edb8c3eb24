///
/// Contains [`linsolve::gauss::MatrixSolver`] and gauss-jordan elimination over fields.
///
pub mod linsolve;
///
/// Contains an implementation of the Miller-Rabin probabilistic primality test.
///
pub mod miller_rabin;
///
/// Contains [`buchberger::buchberger()`], the classical algorithm for computing Groebner bases,
/// with different strategies for selecting critical pairs.
///
pub mod buchberger;
///
/// Contains [`f4::f4()`], which computes Groebner bases by reducing many S-polynomials at once
/// using linear algebra.
///
pub mod f4;
///
/// Contains the M4GB algorithm for computing Groebner bases.
///
pub mod m4gb;
///
/// Contains the FGLM algorithm for converting Groebner bases of zero-dimensional ideals
/// to the lexicographic ordering.
///
pub mod fglm;
///
/// Contains functions to minimize, reduce and check Groebner bases.
///
pub mod basis;
