//! Journal service: the pure validation pipeline for journal operations.
//!
//! This service contains no I/O. The repository feeds it account state and
//! the resolved fiscal period; it decides whether the operation is legal and
//! returns the computed totals.

use ledgra_shared::types::AccountId;

use super::error::JournalError;
use super::types::{CreateJournalInput, EntryTotals, JournalStatus, PostedJournal};
use super::validation::{AccountState, validate_lines};
use crate::fiscal::{FiscalPeriod, validate_posting};

/// Stateless journal validation service.
pub struct JournalService;

impl JournalService {
    /// Validates a journal creation request end to end:
    /// line shape and balance, account state, and period eligibility.
    ///
    /// `period` is the fiscal period containing the entry date (`None` when
    /// the tenant has no periods configured: grace mode, always allowed).
    /// `is_system_generated` postings may target CLOSED (not LOCKED) periods.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if any validation fails. Nothing is persisted
    /// on failure.
    pub fn validate_create<F>(
        input: &CreateJournalInput,
        account_lookup: F,
        period: Option<&FiscalPeriod>,
        is_system_generated: bool,
    ) -> Result<EntryTotals, JournalError>
    where
        F: Fn(AccountId) -> Option<AccountState>,
    {
        let totals = validate_lines(&input.lines, account_lookup)?;
        validate_posting(period, input.entry_date, is_system_generated)?;
        Ok(totals)
    }

    /// Validates that an entry may be voided.
    ///
    /// Only drafts are voided destructively; posted entries must be
    /// reversed instead.
    ///
    /// # Errors
    ///
    /// Returns `CannotVoidPosted` or `AlreadyVoid`.
    pub fn validate_void(entry: &PostedJournal) -> Result<(), JournalError> {
        match entry.status {
            JournalStatus::Draft => Ok(()),
            JournalStatus::Posted => Err(JournalError::CannotVoidPosted(entry.id)),
            JournalStatus::Void => Err(JournalError::AlreadyVoid(entry.id)),
        }
    }

    /// Validates that a draft entry may be posted to the given period.
    ///
    /// # Errors
    ///
    /// Returns `NotPostable` for non-draft entries, or a period error.
    pub fn validate_post(
        entry: &PostedJournal,
        period: Option<&FiscalPeriod>,
        is_system_generated: bool,
    ) -> Result<(), JournalError> {
        if entry.status != JournalStatus::Draft {
            return Err(JournalError::NotPostable {
                id: entry.id,
                status: entry.status,
            });
        }
        validate_posting(period, entry.entry_date, is_system_generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::PeriodStatus;
    use crate::journal::types::{LineInput, PostedLine, SourceType};
    use chrono::NaiveDate;
    use ledgra_shared::types::{ActorId, FiscalPeriodId, JournalEntryId, TenantId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn active(_id: AccountId) -> Option<AccountState> {
        Some(AccountState { is_active: true })
    }

    fn march() -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            tenant_id: TenantId::new(),
            name: "March 2026".to_string(),
            period_number: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status: PeriodStatus::Open,
        }
    }

    fn make_input(date: NaiveDate) -> CreateJournalInput {
        CreateJournalInput {
            tenant_id: TenantId::new(),
            entry_date: date,
            description: "Test".to_string(),
            source_type: SourceType::Manual,
            source_id: None,
            idempotency_key: "key-1".to_string(),
            lines: vec![
                LineInput::debit(AccountId::new(), dec!(50)),
                LineInput::credit(AccountId::new(), dec!(50)),
            ],
            created_by: ActorId::new(),
            post_immediately: true,
            source_payload: None,
        }
    }

    fn make_entry(status: JournalStatus, date: NaiveDate) -> PostedJournal {
        PostedJournal {
            id: JournalEntryId::new(),
            tenant_id: TenantId::new(),
            entry_number: "JE-2026-000001".to_string(),
            entry_date: date,
            description: "Test".to_string(),
            source_type: SourceType::Manual,
            status,
            reversal_of: None,
            reversed_by: None,
            lines: vec![
                PostedLine {
                    account_id: AccountId::new(),
                    line_number: 1,
                    description: None,
                    debit: dec!(50),
                    credit: Decimal::ZERO,
                    department: None,
                    project: None,
                },
                PostedLine {
                    account_id: AccountId::new(),
                    line_number: 2,
                    description: None,
                    debit: Decimal::ZERO,
                    credit: dec!(50),
                    department: None,
                    project: None,
                },
            ],
        }
    }

    #[test]
    fn test_validate_create_open_period() {
        let period = march();
        let input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        let totals = JournalService::validate_create(&input, active, Some(&period), false).unwrap();
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_validate_create_grace_mode() {
        let input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert!(JournalService::validate_create(&input, active, None, false).is_ok());
    }

    #[test]
    fn test_validate_create_closed_period_manual_rejected() {
        let mut period = march();
        period.status = PeriodStatus::Closed;
        let input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert!(matches!(
            JournalService::validate_create(&input, active, Some(&period), false),
            Err(JournalError::PeriodNotOpen { .. })
        ));
    }

    #[test]
    fn test_validate_create_closed_period_system_allowed() {
        let mut period = march();
        period.status = PeriodStatus::Closed;
        let input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert!(JournalService::validate_create(&input, active, Some(&period), true).is_ok());
    }

    #[test]
    fn test_validate_create_locked_period_system_rejected() {
        let mut period = march();
        period.status = PeriodStatus::Locked;
        let input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert!(matches!(
            JournalService::validate_create(&input, active, Some(&period), true),
            Err(JournalError::PeriodLocked { .. })
        ));
    }

    #[test]
    fn test_validate_create_rejects_unbalanced_before_period_check() {
        let mut input = make_input(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        input.lines[1].credit = dec!(40);
        assert!(matches!(
            JournalService::validate_create(&input, active, None, false),
            Err(JournalError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn test_validate_void_draft() {
        let entry = make_entry(
            JournalStatus::Draft,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        assert!(JournalService::validate_void(&entry).is_ok());
    }

    #[test]
    fn test_validate_void_posted_rejected() {
        let entry = make_entry(
            JournalStatus::Posted,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        assert!(matches!(
            JournalService::validate_void(&entry),
            Err(JournalError::CannotVoidPosted(_))
        ));
    }

    #[test]
    fn test_validate_void_void_rejected() {
        let entry = make_entry(
            JournalStatus::Void,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        assert!(matches!(
            JournalService::validate_void(&entry),
            Err(JournalError::AlreadyVoid(_))
        ));
    }

    #[test]
    fn test_validate_post_draft() {
        let period = march();
        let entry = make_entry(
            JournalStatus::Draft,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        assert!(JournalService::validate_post(&entry, Some(&period), false).is_ok());
    }

    #[test]
    fn test_validate_post_posted_rejected() {
        let period = march();
        let entry = make_entry(
            JournalStatus::Posted,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        );
        assert!(matches!(
            JournalService::validate_post(&entry, Some(&period), false),
            Err(JournalError::NotPostable { .. })
        ));
    }
}
