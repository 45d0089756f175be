//! The posting permission matrix.
//!
//! Consulted on every journal creation and reversal. The matrix:
//!
//! | period state | manual | system-generated |
//! |--------------|--------|------------------|
//! | no period    | allow  | allow            |
//! | OPEN         | allow  | allow            |
//! | CLOSED       | deny   | allow            |
//! | LOCKED       | deny   | deny             |

use chrono::NaiveDate;

use super::types::{FiscalPeriod, PeriodStatus};
use crate::journal::error::JournalError;

/// The rule that decided a posting permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingRule {
    /// Tenant has no period covering the date; posting is allowed.
    NoPeriodConfigured,
    /// Period is open; posting is allowed.
    PeriodOpen,
    /// Period is closed but the posting is system-generated; allowed.
    ClosedSystemOverride,
    /// Period is closed and the posting is manual; denied.
    PeriodClosed,
    /// Period is locked; denied for everyone.
    PeriodLocked,
}

impl PostingRule {
    /// Whether this rule permits the posting.
    #[must_use]
    pub const fn allows(self) -> bool {
        matches!(
            self,
            Self::NoPeriodConfigured | Self::PeriodOpen | Self::ClosedSystemOverride
        )
    }

    /// Human-readable reason string.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NoPeriodConfigured => "no fiscal period configured for this date",
            Self::PeriodOpen => "period is open",
            Self::ClosedSystemOverride => "period is closed; system-generated posting allowed",
            Self::PeriodClosed => "period is closed",
            Self::PeriodLocked => "period is locked",
        }
    }
}

/// Result of a posting permission check: a boolean plus the named reason.
#[derive(Debug, Clone, Copy)]
pub struct PostingDecision {
    /// Whether posting is allowed.
    pub allowed: bool,
    /// The rule that decided.
    pub rule: PostingRule,
}

/// Evaluates the posting permission matrix for a date.
///
/// `period` is the period containing the target date, or `None` when the
/// tenant has none configured there (grace mode).
#[must_use]
pub fn can_post_to_date(
    period: Option<&FiscalPeriod>,
    is_system_generated: bool,
) -> PostingDecision {
    let rule = match period.map(|p| p.status) {
        None => PostingRule::NoPeriodConfigured,
        Some(PeriodStatus::Open) => PostingRule::PeriodOpen,
        Some(PeriodStatus::Closed) if is_system_generated => PostingRule::ClosedSystemOverride,
        Some(PeriodStatus::Closed) => PostingRule::PeriodClosed,
        Some(PeriodStatus::Locked) => PostingRule::PeriodLocked,
    };

    PostingDecision {
        allowed: rule.allows(),
        rule,
    }
}

/// Validates a posting against the permission matrix, producing the
/// journal-level error on denial.
///
/// # Errors
///
/// Returns `PeriodLocked` for locked periods and `PeriodNotOpen` for
/// closed periods rejected for manual postings.
pub fn validate_posting(
    period: Option<&FiscalPeriod>,
    date: NaiveDate,
    is_system_generated: bool,
) -> Result<(), JournalError> {
    // Grace mode: no period configured for the date.
    let Some(period) = period else {
        return Ok(());
    };

    match can_post_to_date(Some(period), is_system_generated).rule {
        PostingRule::PeriodLocked => Err(JournalError::PeriodLocked { period_id: period.id }),
        rule if rule.allows() => Ok(()),
        _ => Err(JournalError::PeriodNotOpen {
            period_id: period.id,
            status: period.status,
            date,
        }),
    }
}
