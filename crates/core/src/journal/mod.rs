//! Journal entry domain logic.
//!
//! This module implements the write-side heart of the kernel:
//! - The pure double-entry validator
//! - Journal entry lifecycle (draft, posted, void) and its guards
//! - Reversal construction (append-only correction)
//! - The journal error taxonomy

pub mod error;
pub mod reversal;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use reversal::{build_reversal, reversal_idempotency_key};
pub use service::JournalService;
pub use types::{
    CreateJournalInput, EntryTotals, JournalStatus, LineInput, PostedJournal, PostedLine,
    SourceType, format_entry_number,
};
pub use validation::{AccountState, validate_lines};
