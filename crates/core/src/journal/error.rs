//! Journal error types for validation and state errors.
//!
//! Validation errors are rejected synchronously before persistence and are
//! never partially applied. State errors name the specific condition so
//! callers can branch on cause. Duplicate idempotency keys are NOT errors:
//! the repository returns the original entry instead.

use chrono::NaiveDate;
use ledgra_shared::types::{AccountId, FiscalPeriodId, JournalEntryId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::fiscal::PeriodStatus;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {total_debit}, Credit: {total_credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        total_debit: Decimal,
        /// Total credit amount.
        total_credit: Decimal,
    },

    /// Line must have exactly one of debit/credit strictly positive.
    #[error(
        "Line {line_number} is invalid: exactly one of debit ({debit}) or credit ({credit}) \
         must be positive"
    )]
    InvalidLine {
        /// 1-based line number.
        line_number: usize,
        /// The line's debit amount.
        debit: Decimal,
        /// The line's credit amount.
        credit: Decimal,
    },

    /// Line references an unknown account.
    #[error("Line {line_number} references unknown account {account_id}")]
    UnknownAccount {
        /// 1-based line number.
        line_number: usize,
        /// The unknown account ID.
        account_id: AccountId,
    },

    /// Line references an inactive account.
    #[error("Line {line_number} references inactive account {account_id}")]
    InactiveAccount {
        /// 1-based line number.
        line_number: usize,
        /// The inactive account ID.
        account_id: AccountId,
    },

    // ========== Period Errors ==========
    /// The target period does not accept this posting.
    #[error("Period {period_id} is {status:?}, posting on {date} not allowed")]
    PeriodNotOpen {
        /// The period ID.
        period_id: FiscalPeriodId,
        /// The period status.
        status: PeriodStatus,
        /// The rejected posting date.
        date: NaiveDate,
    },

    /// The target period is locked; nothing may post or reverse into it.
    #[error("Period {period_id} is locked")]
    PeriodLocked {
        /// The period ID.
        period_id: FiscalPeriodId,
    },

    // ========== State Errors ==========
    /// Posted entries cannot be voided; use reversal instead.
    #[error("Cannot void posted entry {0}; create a reversal instead")]
    CannotVoidPosted(JournalEntryId),

    /// Void entries cannot transition further.
    #[error("Entry {0} is void")]
    AlreadyVoid(JournalEntryId),

    /// Entry was already reversed; one reversal per entry.
    #[error("Entry {original} was already reversed by {reversed_by}")]
    AlreadyReversed {
        /// The original entry.
        original: JournalEntryId,
        /// The existing reversal.
        reversed_by: JournalEntryId,
    },

    /// Only posted entries can be reversed.
    #[error("Entry {id} is {status:?}; only posted entries can be reversed")]
    NotReversible {
        /// The entry ID.
        id: JournalEntryId,
        /// The entry's status.
        status: super::types::JournalStatus,
    },

    /// Only draft entries can be posted.
    #[error("Entry {id} is {status:?}; only draft entries can be posted")]
    NotPostable {
        /// The entry ID.
        id: JournalEntryId,
        /// The entry's status.
        status: super::types::JournalStatus,
    },

    /// A mandatory reason was not supplied.
    #[error("A reason is required for this operation")]
    MissingReason,

    /// Entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    // ========== Storage Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl JournalError {
    /// Returns the error code for API responses and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InvalidLine { .. } => "INVALID_LINE",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::InactiveAccount { .. } => "INACTIVE_ACCOUNT",
            Self::PeriodNotOpen { .. } => "PERIOD_NOT_OPEN",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::CannotVoidPosted(_) => "CANNOT_VOID_POSTED",
            Self::AlreadyVoid(_) => "ALREADY_VOID",
            Self::AlreadyReversed { .. } => "ALREADY_REVERSED",
            Self::NotReversible { .. } => "NOT_REVERSIBLE",
            Self::NotPostable { .. } => "NOT_POSTABLE",
            Self::MissingReason => "MISSING_REASON",
            Self::NotFound(_) => "JOURNAL_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true for validation errors (rejected before any persistence).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InsufficientLines
                | Self::UnbalancedEntry { .. }
                | Self::InvalidLine { .. }
                | Self::UnknownAccount { .. }
                | Self::InactiveAccount { .. }
        )
    }
}
