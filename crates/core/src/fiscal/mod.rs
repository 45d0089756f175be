//! Fiscal period lifecycle and posting permissions.
//!
//! This module implements:
//! - The OPEN → CLOSED → LOCKED state machine (with audited reopen/unlock)
//! - The posting permission matrix consulted on every journal creation
//! - Close sequencing and the closing-entry computation
//! - The point-in-time balance snapshot captured at close

pub mod close;
pub mod error;
pub mod posting;
pub mod types;

#[cfg(test)]
mod posting_props;

pub use close::{
    AccountPeriodBalance, BalanceSnapshot, check_draft_policy, compute_closing_entry,
    snapshot_from_balances, validate_close_sequence, validate_reopen, validate_transition,
};
pub use error::FiscalError;
pub use posting::{PostingDecision, PostingRule, can_post_to_date, validate_posting};
pub use types::{FiscalPeriod, PeriodStatus};
