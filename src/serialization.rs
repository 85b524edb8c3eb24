#[stability::unstable(feature = "enable")]
#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use std::fmt::Debug;

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    ///
    /// Checks that all given values survive a round trip through `serde`, both in the
    /// human-readable and in the compact representation.
    ///
    pub fn test_serialization<T, I>(edge_case_elements: I)
        where T: Serialize + DeserializeOwned + PartialEq + Debug,
            I: Iterator<Item = T>
    {
        let edge_case_elements = edge_case_elements.collect::<Vec<_>>();

        for human_readable in [true, false] {
            let serializer = serde_assert::Serializer::builder().is_human_readable(human_readable).build();
            for x in &edge_case_elements {
                let tokens = x.serialize(&serializer).unwrap();
                let mut deserializer = serde_assert::Deserializer::builder(tokens).is_human_readable(human_readable).build();
                let result = T::deserialize(&mut deserializer).unwrap();
                assert_eq!(x, &result);
            }
        }
    }
}

#[cfg(test)]
use crate::algorithms::buchberger::PairSelectionStrategy;
#[cfg(test)]
use crate::field::Field;
#[cfg(test)]
use crate::rings::float_complex::Complex;
#[cfg(test)]
use crate::rings::float_real::Real;
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::multivariate::ordered::{EliminationOrder, MonomialOrdering, WeightedOrder};
#[cfg(test)]
use crate::rings::multivariate::ring::PolynomialRing;
#[cfg(test)]
use crate::rings::multivariate::{Monomial, MonomialKind};
#[cfg(test)]
use crate::rings::numeric::Numeric;
#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use serde::Serialize;

#[test]
fn test_serialize_field_elements() {
    generic_tests::test_serialization([Rational::from_integer(0), Rational::from_fraction(-7, 3), Rational::from_fraction(1, 1u64 << 40)].into_iter());
    generic_tests::test_serialization((0..5).map(|x| GaloisFieldElement::new(x, 5).unwrap()));
    generic_tests::test_serialization([Real::new(0.), Real::new(-2.5)].into_iter());
    generic_tests::test_serialization([Complex::new(1., -1.)].into_iter());
    generic_tests::test_serialization([Numeric::Rational(Rational::from_integer(3)), Numeric::Galois(GaloisFieldElement::new(2, 7).unwrap())].into_iter());
}

#[test]
fn test_serialize_polynomials() {
    let one = GaloisFieldElement::new(1, 13).unwrap();
    let orderings = [
        MonomialOrdering::Lex,
        MonomialOrdering::DegLex,
        MonomialOrdering::DegRevLex,
        MonomialOrdering::from(WeightedOrder::new(vec![1, 2, 3])),
        MonomialOrdering::from(EliminationOrder::new(&[0], &[1, 2], MonomialOrdering::DegRevLex))
    ];
    generic_tests::test_serialization(orderings.iter().cloned());
    for kind in [MonomialKind::Dense, MonomialKind::Sparse] {
        for ordering in &orderings {
            let ring = PolynomialRing::new(["x", "y", "z"], one, ordering.clone(), kind);
            let f = ring.from_terms([(one.from_int(3), &[("x", 2), ("z", 1)][..]), (one.from_int(-1), &[("y", 4)][..]), (one, &[][..])]).unwrap();
            generic_tests::test_serialization([ring.zero(), ring.one(), f].into_iter());
        }
        generic_tests::test_serialization([Monomial::new(kind, &[0, 3, 0, 0, 1], one)].into_iter());
    }
}

#[test]
fn test_serialize_json() {
    assert_eq!("\"Sugar\"", serde_json::to_string(&PairSelectionStrategy::Sugar).unwrap());
    let value = GaloisFieldElement::new(-1, 7).unwrap();
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(value, serde_json::from_str::<GaloisFieldElement>(&json).unwrap());
}

#[cfg(test)]
#[derive(Serialize)]
#[serde(rename = "GaloisFieldElement")]
struct UncheckedGaloisFieldElement {
    value: u64,
    modulus: u64
}

#[cfg(test)]
#[derive(Serialize)]
#[serde(rename = "Rational")]
struct UncheckedRational {
    num: num_bigint::BigInt,
    den: num_bigint::BigInt
}

#[cfg(test)]
fn deserialize_from_unchecked<T, U>(unchecked: &U, human_readable: bool) -> Option<T>
    where T: serde::de::DeserializeOwned,
        U: Serialize
{
    let serializer = serde_assert::Serializer::builder().is_human_readable(human_readable).build();
    let tokens = unchecked.serialize(&serializer).unwrap();
    let mut deserializer = serde_assert::Deserializer::builder(tokens).is_human_readable(human_readable).build();
    return T::deserialize(&mut deserializer).ok();
}

#[test]
fn test_deserialize_galois_normalizes() {
    for human_readable in [true, false] {
        let value: GaloisFieldElement = deserialize_from_unchecked(&UncheckedGaloisFieldElement { value: 9, modulus: 7 }, human_readable).unwrap();
        assert_eq!(GaloisFieldElement::new(2, 7).unwrap(), value);
        assert_eq!(2, value.value());
    }
}

#[test]
fn test_deserialize_galois_rejects_composite_modulus() {
    for human_readable in [true, false] {
        assert!(deserialize_from_unchecked::<GaloisFieldElement, _>(&UncheckedGaloisFieldElement { value: 9, modulus: 4 }, human_readable).is_none());
        assert!(deserialize_from_unchecked::<GaloisFieldElement, _>(&UncheckedGaloisFieldElement { value: 0, modulus: 1 }, human_readable).is_none());
    }
    assert!(serde_json::from_str::<GaloisFieldElement>(r#"{"value":9,"modulus":4}"#).is_err());
    assert_eq!(GaloisFieldElement::new(2, 7).unwrap(), serde_json::from_str::<GaloisFieldElement>(r#"{"value":9,"modulus":7}"#).unwrap());
}

#[test]
fn test_deserialize_rational_normalizes() {
    for human_readable in [true, false] {
        let value: Rational = deserialize_from_unchecked(&UncheckedRational { num: 2.into(), den: 4.into() }, human_readable).unwrap();
        assert_eq!(Rational::from_fraction(1, 2), value);
        let value: Rational = deserialize_from_unchecked(&UncheckedRational { num: 3.into(), den: (-6).into() }, human_readable).unwrap();
        assert_eq!(Rational::from_fraction(-1, 2), value);
        assert_eq!(&num_bigint::BigInt::from(2), value.denominator());
    }
}

#[test]
fn test_deserialize_rational_rejects_zero_denominator() {
    for human_readable in [true, false] {
        assert!(deserialize_from_unchecked::<Rational, _>(&UncheckedRational { num: 1.into(), den: 0.into() }, human_readable).is_none());
    }
    assert!(serde_json::from_str::<Rational>(r#"{"num":[1,[1]],"den":[0,[]]}"#).is_err());
    assert_eq!(Rational::from_fraction(1, 2), serde_json::from_str::<Rational>(r#"{"num":[1,[2]],"den":[1,[4]]}"#).unwrap());
}
