//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AccountBalanceRow, BalanceSheetReport, CashActivityRow, CashFlowReport,
    IncomeStatementReport, ReportSection, TrialBalanceReport, TrialBalanceTotals,
};
use crate::coa::AccountType;

/// Service for generating financial reports from per-account totals.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance report.
    ///
    /// Accounts without activity are dropped; the aggregate totals verify
    /// that posted debits equal posted credits across the whole ledger.
    #[must_use]
    pub fn trial_balance(accounts: Vec<AccountBalanceRow>, as_of: NaiveDate) -> TrialBalanceReport {
        let accounts: Vec<AccountBalanceRow> =
            accounts.into_iter().filter(AccountBalanceRow::has_activity).collect();

        let total_debit: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        TrialBalanceReport {
            as_of,
            accounts,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates an income statement over a date range.
    ///
    /// Input rows must carry totals restricted to the range.
    #[must_use]
    pub fn income_statement(
        accounts: Vec<AccountBalanceRow>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> IncomeStatementReport {
        let mut income = ReportSection::default();
        let mut expenses = ReportSection::default();

        for account in accounts {
            if !account.has_activity() {
                continue;
            }
            match account.account_type {
                AccountType::Income => Self::add_to_section(&mut income, account),
                AccountType::Expense => Self::add_to_section(&mut expenses, account),
                _ => {}
            }
        }

        let net_income = income.total - expenses.total;

        IncomeStatementReport {
            period_start,
            period_end,
            income,
            expenses,
            net_income,
        }
    }

    /// Generates a balance sheet as of a date.
    ///
    /// Income and expense balances that have not been closed to equity are
    /// folded in as `current_earnings`, so the sheet balances at any point
    /// in time, not just after period close.
    #[must_use]
    pub fn balance_sheet(accounts: Vec<AccountBalanceRow>, as_of: NaiveDate) -> BalanceSheetReport {
        let mut assets = ReportSection::default();
        let mut liabilities = ReportSection::default();
        let mut equity = ReportSection::default();
        let mut current_earnings = Decimal::ZERO;

        for account in accounts {
            if !account.has_activity() {
                continue;
            }
            match account.account_type {
                AccountType::Asset => Self::add_to_section(&mut assets, account),
                AccountType::Liability => Self::add_to_section(&mut liabilities, account),
                AccountType::Equity => Self::add_to_section(&mut equity, account),
                AccountType::Income => current_earnings += account.balance,
                AccountType::Expense => current_earnings -= account.balance,
            }
        }

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total + current_earnings;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            current_earnings,
            total_assets,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Generates a cash flow summary from cash-account movements grouped
    /// by source type.
    #[must_use]
    pub fn cash_flow(
        movements: Vec<CashActivityRow>,
        opening_cash: Decimal,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> CashFlowReport {
        let inflows: Decimal = movements.iter().map(|m| m.total_debit).sum();
        let outflows: Decimal = movements.iter().map(|m| m.total_credit).sum();
        let net_change = inflows - outflows;

        CashFlowReport {
            period_start,
            period_end,
            opening_cash,
            inflows,
            outflows,
            net_change,
            closing_cash: opening_cash + net_change,
            by_source: movements,
        }
    }

    fn add_to_section(section: &mut ReportSection, account: AccountBalanceRow) {
        section.total += account.balance;
        section.accounts.push(account);
    }
}
