//! Common types and traits for book entities

pub mod aggregate_id;
pub mod validation;

// Re-exports
pub use aggregate_id::AggregateId;
pub use validation::FieldErrors;
