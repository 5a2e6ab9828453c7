//! Suppliers domain module.
//!
//! Business rules for supplier registration and catalogue upkeep, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod dto;
pub mod supplier;

pub use dto::NewSupplier;
pub use supplier::Supplier;
