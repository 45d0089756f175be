//! Period close: transitions, sequencing, closing entries, snapshots.

use chrono::NaiveDate;
use ledgra_shared::types::{AccountId, ActorId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FiscalError;
use super::types::{FiscalPeriod, PeriodStatus};
use crate::coa::AccountType;
use crate::journal::{CreateJournalInput, LineInput, SourceType};
use crate::ledger::signed_balance;

/// Validates a period status transition.
///
/// Forward path: OPEN → CLOSED → LOCKED. Explicit exceptions:
/// CLOSED → OPEN (reopen) and LOCKED → CLOSED (unlock, which requires a
/// non-empty reason). Same-status transitions are accepted as no-ops.
///
/// # Errors
///
/// Returns `InvalidStatusTransition` or `MissingReason`.
pub fn validate_transition(
    from: PeriodStatus,
    to: PeriodStatus,
    reason: Option<&str>,
) -> Result<(), FiscalError> {
    let valid = match (from, to) {
        _ if from == to => true,
        (PeriodStatus::Open, PeriodStatus::Closed)
        | (PeriodStatus::Closed, PeriodStatus::Locked | PeriodStatus::Open) => true,
        (PeriodStatus::Locked, PeriodStatus::Closed) => {
            if reason.is_none_or(|r| r.trim().is_empty()) {
                return Err(FiscalError::MissingReason);
            }
            true
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(FiscalError::InvalidStatusTransition { from, to })
    }
}

/// Validates that a period may close: the immediately preceding period (if
/// any) must already be closed or locked. Periods close strictly in
/// sequence.
///
/// # Errors
///
/// Returns `PrecedingPeriodOpen` naming the offending period.
pub fn validate_close_sequence(preceding: Option<&FiscalPeriod>) -> Result<(), FiscalError> {
    if let Some(prior) = preceding {
        if prior.status == PeriodStatus::Open {
            return Err(FiscalError::PrecedingPeriodOpen {
                preceding: prior.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validates that a period may reopen: no later period may already be
/// closed or locked, otherwise the close sequence would be violated
/// retroactively.
///
/// # Errors
///
/// Returns `LaterPeriodClosed` naming the first offending period.
pub fn validate_reopen(later_periods: &[FiscalPeriod]) -> Result<(), FiscalError> {
    if let Some(later) = later_periods
        .iter()
        .find(|p| matches!(p.status, PeriodStatus::Closed | PeriodStatus::Locked))
    {
        return Err(FiscalError::LaterPeriodClosed {
            later: later.name.clone(),
            status: later.status,
        });
    }
    Ok(())
}

/// Applies the draft policy at close time.
///
/// # Errors
///
/// Returns `DraftJournalsExist` when drafts remain and the tenant policy
/// blocks closing over them.
pub fn check_draft_policy(
    period: &FiscalPeriod,
    draft_count: u64,
    block_close_on_drafts: bool,
) -> Result<(), FiscalError> {
    if block_close_on_drafts && draft_count > 0 {
        return Err(FiscalError::DraftJournalsExist {
            period_id: period.id,
            count: draft_count,
        });
    }
    Ok(())
}

/// Per-account debit/credit totals over a period, input to the closing
/// entry and the snapshot.
#[derive(Debug, Clone)]
pub struct AccountPeriodBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Total posted debits.
    pub total_debit: Decimal,
    /// Total posted credits.
    pub total_credit: Decimal,
}

impl AccountPeriodBalance {
    /// Net amount on the account's normal side.
    #[must_use]
    pub fn net(&self) -> Decimal {
        signed_balance(
            self.account_type.normal_balance(),
            self.total_debit,
            self.total_credit,
        )
    }
}

/// Computes the closing entry for a period: zero out every INCOME and
/// EXPENSE account's net period activity and transfer the difference to
/// the retained earnings account.
///
/// `balances` must cover the period's date range including any earlier
/// closing entries, so a close after reopen-and-post transfers only the
/// residual. `close_sequence` numbers the close generation: retries of
/// the same close share an idempotency key, while a later re-close gets
/// a fresh one.
///
/// Returns `None` when there is no residual income/expense activity: a
/// journal entry needs at least two lines, and an all-zero close has
/// nothing to transfer.
#[must_use]
pub fn compute_closing_entry(
    tenant_id: TenantId,
    period: &FiscalPeriod,
    balances: &[AccountPeriodBalance],
    retained_earnings: AccountId,
    actor: ActorId,
    close_sequence: u64,
) -> Option<CreateJournalInput> {
    let mut lines = Vec::new();
    let mut net_income = Decimal::ZERO;

    for balance in balances {
        match balance.account_type {
            AccountType::Income => {
                let net = balance.total_credit - balance.total_debit;
                if net > Decimal::ZERO {
                    lines.push(LineInput {
                        account_id: balance.account_id,
                        description: Some(format!("Close {}", balance.name)),
                        debit: net,
                        credit: Decimal::ZERO,
                        department: None,
                        project: None,
                    });
                } else if net < Decimal::ZERO {
                    lines.push(LineInput {
                        account_id: balance.account_id,
                        description: Some(format!("Close {}", balance.name)),
                        debit: Decimal::ZERO,
                        credit: -net,
                        department: None,
                        project: None,
                    });
                }
                net_income += net;
            }
            AccountType::Expense => {
                let net = balance.total_debit - balance.total_credit;
                if net > Decimal::ZERO {
                    lines.push(LineInput {
                        account_id: balance.account_id,
                        description: Some(format!("Close {}", balance.name)),
                        debit: Decimal::ZERO,
                        credit: net,
                        department: None,
                        project: None,
                    });
                } else if net < Decimal::ZERO {
                    lines.push(LineInput {
                        account_id: balance.account_id,
                        description: Some(format!("Close {}", balance.name)),
                        debit: -net,
                        credit: Decimal::ZERO,
                        department: None,
                        project: None,
                    });
                }
                net_income -= net;
            }
            AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
        }
    }

    if lines.is_empty() {
        return None;
    }

    // Transfer the net result to retained earnings; the entry balances by
    // construction even when net income is zero but gross activity is not.
    if net_income > Decimal::ZERO {
        lines.push(LineInput {
            account_id: retained_earnings,
            description: Some("Net income to retained earnings".to_string()),
            debit: Decimal::ZERO,
            credit: net_income,
            department: None,
            project: None,
        });
    } else if net_income < Decimal::ZERO {
        lines.push(LineInput {
            account_id: retained_earnings,
            description: Some("Net loss to retained earnings".to_string()),
            debit: -net_income,
            credit: Decimal::ZERO,
            department: None,
            project: None,
        });
    }

    Some(CreateJournalInput {
        tenant_id,
        entry_date: period.end_date,
        description: format!("Closing entry for {}", period.name),
        source_type: SourceType::Closing,
        source_id: Some(period.id.to_string()),
        idempotency_key: format!("closing-{}-{close_sequence}", period.id),
        lines,
        created_by: actor,
        post_immediately: true,
        source_payload: None,
    })
}

/// A single account row in a close-time balance snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Total posted debits up to the snapshot date.
    pub total_debit: Decimal,
    /// Total posted credits up to the snapshot date.
    pub total_credit: Decimal,
    /// Signed balance oriented to the account's normal side.
    pub balance: Decimal,
}

/// Point-in-time balance snapshot captured when a period closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Snapshot date (the period's end date).
    pub as_of: NaiveDate,
    /// Per-account balances.
    pub accounts: Vec<SnapshotRow>,
}

/// Builds a snapshot from per-account balances.
#[must_use]
pub fn snapshot_from_balances(
    balances: &[AccountPeriodBalance],
    as_of: NaiveDate,
) -> BalanceSnapshot {
    let accounts = balances
        .iter()
        .map(|b| SnapshotRow {
            account_id: b.account_id,
            code: b.code.clone(),
            name: b.name.clone(),
            account_type: b.account_type,
            total_debit: b.total_debit,
            total_credit: b.total_credit,
            balance: b.net(),
        })
        .collect();

    BalanceSnapshot { as_of, accounts }
}
