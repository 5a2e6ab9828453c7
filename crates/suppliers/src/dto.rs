//! Untyped-input decoding for supplier registration.
//!
//! Rust's types make the field checks static for callers holding real
//! values; requests arriving as JSON still need them at runtime, and this is
//! where they live.

use serde_json::{Map, Value};

use stockroom_core::{DomainError, DomainResult};
use stockroom_products::Product;

/// Registration request for a supplier.
///
/// An `id`, when given, is range-checked at registration but the stored
/// supplier starts without one. `email`, `address`, and `products` default
/// to empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    pub id: Option<i64>,
    pub email: String,
    pub address: String,
    pub products: Vec<Product>,
}

impl NewSupplier {
    /// Request with the given name and everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Decode a registration request from an untrusted JSON string.
    pub fn from_json(input: &str) -> DomainResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| DomainError::type_mismatch("body", "JSON object", e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Decode a registration request from an untrusted JSON value.
    ///
    /// Scalar fields must carry the expected JSON type; `products` must be
    /// an array of product records.
    pub fn from_json_value(value: &Value) -> DomainResult<Self> {
        let Value::Object(fields) = value else {
            return Err(DomainError::type_mismatch("body", "object", json_kind(value)));
        };

        let name = string_field(fields, "name")?
            .ok_or_else(|| DomainError::type_mismatch("name", "string", "nothing"))?;
        let email = string_field(fields, "email")?.unwrap_or_default();
        let address = string_field(fields, "address")?.unwrap_or_default();

        let id = match fields.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(v) => Some(v),
                None => {
                    return Err(DomainError::type_mismatch("id", "integer", n.to_string()));
                }
            },
            Some(other) => {
                return Err(DomainError::type_mismatch("id", "integer", json_kind(other)));
            }
        };

        let products = match fields.get("products") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    serde_json::from_value::<Product>(item.clone()).map_err(|_| {
                        DomainError::type_mismatch("products", "product record", json_kind(item))
                    })
                })
                .collect::<DomainResult<Vec<_>>>()?,
            Some(other) => {
                return Err(DomainError::type_mismatch("products", "array", json_kind(other)));
            }
        };

        Ok(Self {
            name,
            id,
            email,
            address,
            products,
        })
    }
}

/// Read an optional string field, rejecting any other JSON type.
fn string_field(fields: &Map<String, Value>, field: &'static str) -> DomainResult<Option<String>> {
    match fields.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DomainError::type_mismatch(field, "string", json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
