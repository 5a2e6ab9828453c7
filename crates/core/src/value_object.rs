//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// with the same values are the same value. `SupplierId` is the canonical
/// example here: `SupplierId::new(42)` equals any other id built from 42,
/// and "modifying" one means building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
