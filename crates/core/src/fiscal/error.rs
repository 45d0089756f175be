//! Fiscal period error types.

use ledgra_shared::types::FiscalPeriodId;
use thiserror::Error;

use super::types::PeriodStatus;

/// Errors that can occur during fiscal period operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Start date must be before end date.
    #[error("Start date must be before end date")]
    InvalidDateRange,

    /// Period overlaps with an existing period.
    #[error("Period overlaps with existing period: {0}")]
    OverlappingPeriod(String),

    /// Period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(FiscalPeriodId),

    /// Invalid status transition.
    #[error("Invalid period status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: PeriodStatus,
        /// Target status.
        to: PeriodStatus,
    },

    /// Periods close strictly in sequence.
    #[error("Cannot close period: preceding period '{preceding}' is still open")]
    PrecedingPeriodOpen {
        /// Name of the preceding period.
        preceding: String,
    },

    /// Reopen is rejected while a later period is closed or locked.
    #[error("Cannot reopen period: later period '{later}' is already {status}")]
    LaterPeriodClosed {
        /// Name of the later period.
        later: String,
        /// Its status.
        status: PeriodStatus,
    },

    /// Draft journals remain in the period and policy forbids closing.
    #[error("Cannot close period {period_id}: {count} draft journals remain")]
    DraftJournalsExist {
        /// The period being closed.
        period_id: FiscalPeriodId,
        /// Number of remaining drafts.
        count: u64,
    },

    /// A mandatory reason was not supplied (unlock).
    #[error("A reason is required to unlock a period")]
    MissingReason,

    /// No retained earnings account is configured for closing entries.
    #[error("Retained earnings account '{0}' not found")]
    RetainedEarningsNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FiscalError {
    /// Returns the error code for API responses and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::OverlappingPeriod(_) => "OVERLAPPING_PERIOD",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::PrecedingPeriodOpen { .. } => "PRECEDING_PERIOD_OPEN",
            Self::LaterPeriodClosed { .. } => "LATER_PERIOD_CLOSED",
            Self::DraftJournalsExist { .. } => "DRAFT_JOURNALS_EXIST",
            Self::MissingReason => "MISSING_REASON",
            Self::RetainedEarningsNotFound(_) => "RETAINED_EARNINGS_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
