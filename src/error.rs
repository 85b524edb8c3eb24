use thiserror::Error;

///
/// Errors raised when algebraic objects are combined that do not belong together,
/// or when a value cannot be represented in the requested field.
///
/// All of these indicate a misuse of the API. The non-`try_` variants of the
/// corresponding operations panic with the [`std::fmt::Display`] text of the error.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    #[error("ring mismatch: expected {expected} indeterminates, found {found}")]
    RingMismatch { expected: usize, found: usize },
    #[error("ordering mismatch: expected order id {expected}, found {found}")]
    OrderingMismatch { expected: u32, found: u32 },
    #[error("cannot combine dense and sparse monomials")]
    RepresentationMismatch,
    #[error("invalid field operation: {0}")]
    FieldConstruction(String),
    #[error("lossy conversion: {0}")]
    Conversion(String)
}

impl AlgebraError {

    pub(crate) fn field(msg: impl Into<String>) -> Self {
        AlgebraError::FieldConstruction(msg.into())
    }

    pub(crate) fn conversion(msg: impl Into<String>) -> Self {
        AlgebraError::Conversion(msg.into())
    }
}

#[test]
fn test_error_messages() {
    assert_eq!("ring mismatch: expected 3 indeterminates, found 2", AlgebraError::RingMismatch { expected: 3, found: 2 }.to_string());
    assert_eq!("invalid field operation: division by zero", AlgebraError::field("division by zero").to_string());
}
