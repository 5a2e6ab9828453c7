//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic validation failures (field types,
/// ranges, invariants). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An untyped input field did not carry the expected type.
    #[error("{field}: expected {expected}, got {got}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        got: String,
    },

    /// A supplier identifier fell outside the open interval (0, 1e10).
    #[error("id is not within range (0, 1e10), got {0}")]
    IdOutOfRange(i64),

    /// Neither email nor address was given at registration.
    #[error("at least one contact method (email or address) is required")]
    MissingContactInfo,

    /// A product without an assigned identifier cannot be catalogued.
    #[error("product {0:?} has no id")]
    MissingProductId(String),
}

impl DomainError {
    pub fn type_mismatch(
        field: &'static str,
        expected: &'static str,
        got: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field,
            expected,
            got: got.into(),
        }
    }

    pub fn id_out_of_range(value: i64) -> Self {
        Self::IdOutOfRange(value)
    }

    pub fn missing_contact_info() -> Self {
        Self::MissingContactInfo
    }

    pub fn missing_product_id(name: impl Into<String>) -> Self {
        Self::MissingProductId(name.into())
    }
}
