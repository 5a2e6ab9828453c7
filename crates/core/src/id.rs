//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Exclusive upper bound for supplier identifiers.
const SUPPLIER_ID_MAX: i64 = 10_000_000_000;

/// Width of the stored decimal form.
const SUPPLIER_ID_WIDTH: usize = 10;

/// Identifier of a supplier, assigned by the persistence layer.
///
/// The stored form is the zero-padded 10-character decimal rendering of an
/// integer in the open interval (0, 1e10); that rendering, not the raw
/// integer, is what reads and serialized output carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

impl SupplierId {
    /// Build an identifier from its integer value.
    ///
    /// Fails with [`DomainError::IdOutOfRange`] outside (0, 1e10).
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 || value >= SUPPLIER_ID_MAX {
            return Err(DomainError::id_out_of_range(value));
        }
        Ok(Self(format!("{value:0width$}", width = SUPPLIER_ID_WIDTH)))
    }

    /// The stored zero-padded decimal form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for SupplierId {}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SupplierId {
    type Err = DomainError;

    /// Parse a padded or bare decimal string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| DomainError::type_mismatch("id", "integer", s.to_string()))?;
        Self::new(value)
    }
}
