//! Report data types.

use chrono::NaiveDate;
use ledgra_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coa::AccountType;
use crate::journal::SourceType;
use crate::ledger::signed_balance;

/// Account balance for reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceRow {
    /// Account ID.
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
    /// Signed balance oriented to the account's normal side.
    pub balance: Decimal,
}

impl AccountBalanceRow {
    /// Builds a row from raw totals, orienting the balance to the
    /// account type's normal side.
    #[must_use]
    pub fn from_totals(
        account_id: AccountId,
        code: String,
        name: String,
        account_type: AccountType,
        total_debit: Decimal,
        total_credit: Decimal,
    ) -> Self {
        let balance = signed_balance(account_type.normal_balance(), total_debit, total_credit);
        Self {
            account_id,
            code,
            name,
            account_type,
            total_debit,
            total_credit,
            balance,
        }
    }

    /// Returns true if the account saw any posted activity.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !self.total_debit.is_zero() || !self.total_credit.is_zero()
    }
}

/// Trial balance totals.
///
/// `is_balanced` is the system's core correctness check, exposed as a
/// queryable signal rather than asserted internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit across all accounts.
    pub total_debit: Decimal,
    /// Total credit across all accounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Balances per account with activity.
    pub accounts: Vec<AccountBalanceRow>,
    /// Aggregate totals.
    pub totals: TrialBalanceTotals,
}

/// A report section: a group of accounts and their total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section total (sum of signed balances).
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountBalanceRow>,
}

/// Income statement (profit & loss) report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Income section.
    pub income: ReportSection,
    /// Expense section.
    pub expenses: ReportSection,
    /// Net income (income − expenses).
    pub net_income: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: ReportSection,
    /// Liabilities section.
    pub liabilities: ReportSection,
    /// Equity section (posted equity accounts only).
    pub equity: ReportSection,
    /// Income − expenses not yet closed to equity.
    pub current_earnings: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities + equity + current earnings.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// Net cash movement attributed to one source type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashActivityRow {
    /// The business origin of the movement.
    pub source_type: SourceType,
    /// Cash debits (inflows) from this source.
    pub total_debit: Decimal,
    /// Cash credits (outflows) from this source.
    pub total_credit: Decimal,
}

/// Cash flow summary over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Cash balance at period start.
    pub opening_cash: Decimal,
    /// Total inflows.
    pub inflows: Decimal,
    /// Total outflows.
    pub outflows: Decimal,
    /// Net change (inflows − outflows).
    pub net_change: Decimal,
    /// Cash balance at period end.
    pub closing_cash: Decimal,
    /// Movements grouped by source type.
    pub by_source: Vec<CashActivityRow>,
}
