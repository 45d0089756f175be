//! Outbound domain events.
//!
//! Every state change the rest of the business cares about is written to
//! the outbox table in the same transaction as the change itself, then
//! published at least once by a separate drain process.

pub mod types;

pub use types::DomainEvent;
