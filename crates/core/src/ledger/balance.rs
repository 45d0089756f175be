//! Balance calculations.

use chrono::NaiveDate;
use ledgra_shared::types::JournalEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coa::NormalBalance;

/// Returns the signed balance oriented to the account's normal side.
///
/// Debit-normal accounts: debit − credit.
/// Credit-normal accounts: credit − debit.
#[must_use]
pub fn signed_balance(normal: NormalBalance, total_debit: Decimal, total_credit: Decimal) -> Decimal {
    match normal {
        NormalBalance::Debit => total_debit - total_credit,
        NormalBalance::Credit => total_credit - total_debit,
    }
}

/// A single posted line in an account's chronological activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLine {
    /// The journal entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// Human-readable entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Line or entry description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// An activity line with its running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The underlying activity line.
    #[serde(flatten)]
    pub line: ActivityLine,
    /// Balance after applying this line, oriented to the normal side.
    pub running_balance: Decimal,
}

/// Computes the running ledger for an account from an opening balance and
/// chronologically ordered activity.
#[must_use]
pub fn running_ledger(
    opening_balance: Decimal,
    normal: NormalBalance,
    lines: Vec<ActivityLine>,
) -> Vec<LedgerRow> {
    let mut balance = opening_balance;
    lines
        .into_iter()
        .map(|line| {
            balance += signed_balance(normal, line.debit, line.credit);
            LedgerRow {
                line,
                running_balance: balance,
            }
        })
        .collect()
}
