///
/// An approximate implementation of the field of real numbers `R`, using 64-bit floating point
/// numbers.
///
pub mod float_real;

///
/// This module contains [`rational::Rational`], which provides an implementation of the field of
/// rational numbers `Q` based on arbitrary-precision integers.
///
pub mod rational;

///
/// An approximate implementation of the field of complex numbers `C`, using 64-bit floating point
/// numbers.
///
pub mod float_complex;

///
/// This module contains [`galois::GaloisFieldElement`], an element of a prime field `Fp`.
///
pub mod galois;

///
/// This module contains [`numeric::Numeric`], the closed union of all supported fields, used when
/// the field is only known at runtime.
///
pub mod numeric;

///
/// This module contains monomials, monomial orderings and the multivariate polynomials
/// [`multivariate::polynomial::Polynomial`] built from them.
///
pub mod multivariate;
