//! Chart of accounts domain logic.
//!
//! This module owns the account hierarchy rules:
//! - Account types and their normal balances
//! - Account code validation
//! - Parent/child type consistency
//! - Lifecycle guards (system-protected accounts, accounts with activity)

pub mod error;
pub mod service;
pub mod types;

pub use error::AccountError;
pub use service::{validate_deactivate, validate_delete, validate_new_account};
pub use types::{Account, AccountType, CreateAccountInput, NormalBalance};
