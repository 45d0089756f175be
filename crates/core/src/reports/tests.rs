//! Tests for report generation.

use chrono::NaiveDate;
use ledgra_shared::types::AccountId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::ReportService;
use super::types::{AccountBalanceRow, CashActivityRow};
use crate::coa::AccountType;
use crate::journal::SourceType;

fn row(
    code: &str,
    account_type: AccountType,
    debit: Decimal,
    credit: Decimal,
) -> AccountBalanceRow {
    AccountBalanceRow::from_totals(
        AccountId::new(),
        code.to_string(),
        code.to_string(),
        account_type,
        debit,
        credit,
    )
}

fn march_31() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

#[test]
fn test_trial_balance_balanced() {
    // Cash sale: Dr Cash 100,000 / Cr Sales 100,000.
    let accounts = vec![
        row("1000", AccountType::Asset, dec!(100000), Decimal::ZERO),
        row("4000", AccountType::Income, Decimal::ZERO, dec!(100000)),
    ];

    let report = ReportService::trial_balance(accounts, march_31());

    assert_eq!(report.totals.total_debit, dec!(100000));
    assert_eq!(report.totals.total_credit, dec!(100000));
    assert!(report.totals.is_balanced);

    // Both balances are positive when oriented to the normal side.
    assert_eq!(report.accounts[0].balance, dec!(100000));
    assert_eq!(report.accounts[1].balance, dec!(100000));
}

#[test]
fn test_trial_balance_drops_inactive_accounts() {
    let accounts = vec![
        row("1000", AccountType::Asset, dec!(50), Decimal::ZERO),
        row("4000", AccountType::Income, Decimal::ZERO, dec!(50)),
        row("9999", AccountType::Expense, Decimal::ZERO, Decimal::ZERO),
    ];

    let report = ReportService::trial_balance(accounts, march_31());
    assert_eq!(report.accounts.len(), 2);
}

#[test]
fn test_trial_balance_detects_imbalance() {
    // A corrupted data set must be reported, not masked.
    let accounts = vec![row("1000", AccountType::Asset, dec!(10), Decimal::ZERO)];
    let report = ReportService::trial_balance(accounts, march_31());
    assert!(!report.totals.is_balanced);
}

#[test]
fn test_income_statement() {
    let accounts = vec![
        row("4000", AccountType::Income, Decimal::ZERO, dec!(1500)),
        row("5000", AccountType::Expense, dec!(900), Decimal::ZERO),
        row("1000", AccountType::Asset, dec!(600), Decimal::ZERO),
    ];

    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let report = ReportService::income_statement(accounts, start, march_31());

    assert_eq!(report.income.total, dec!(1500));
    assert_eq!(report.expenses.total, dec!(900));
    assert_eq!(report.net_income, dec!(600));
    assert_eq!(report.income.accounts.len(), 1);
    assert_eq!(report.expenses.accounts.len(), 1);
}

#[test]
fn test_income_statement_loss() {
    let accounts = vec![
        row("4000", AccountType::Income, Decimal::ZERO, dec!(300)),
        row("5000", AccountType::Expense, dec!(500), Decimal::ZERO),
    ];
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let report = ReportService::income_statement(accounts, start, march_31());
    assert_eq!(report.net_income, dec!(-200));
}

#[test]
fn test_balance_sheet_balances_before_close() {
    // Open books: cash sale of 1000, rent expense 400 paid in cash.
    let accounts = vec![
        row("1000", AccountType::Asset, dec!(1000), dec!(400)),
        row("4000", AccountType::Income, Decimal::ZERO, dec!(1000)),
        row("5000", AccountType::Expense, dec!(400), Decimal::ZERO),
    ];

    let report = ReportService::balance_sheet(accounts, march_31());

    assert_eq!(report.total_assets, dec!(600));
    assert_eq!(report.current_earnings, dec!(600));
    assert_eq!(report.liabilities_and_equity, dec!(600));
    assert!(report.is_balanced);
}

#[test]
fn test_balance_sheet_with_liabilities_and_equity() {
    let accounts = vec![
        row("1000", AccountType::Asset, dec!(5000), Decimal::ZERO),
        row("2000", AccountType::Liability, Decimal::ZERO, dec!(2000)),
        row("3000", AccountType::Equity, Decimal::ZERO, dec!(3000)),
    ];

    let report = ReportService::balance_sheet(accounts, march_31());

    assert_eq!(report.total_assets, dec!(5000));
    assert_eq!(report.liabilities.total, dec!(2000));
    assert_eq!(report.equity.total, dec!(3000));
    assert_eq!(report.current_earnings, Decimal::ZERO);
    assert!(report.is_balanced);
}

#[test]
fn test_cash_flow() {
    let movements = vec![
        CashActivityRow {
            source_type: SourceType::Sale,
            total_debit: dec!(1200),
            total_credit: Decimal::ZERO,
        },
        CashActivityRow {
            source_type: SourceType::Expense,
            total_debit: Decimal::ZERO,
            total_credit: dec!(450),
        },
    ];

    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let report = ReportService::cash_flow(movements, dec!(100), start, march_31());

    assert_eq!(report.inflows, dec!(1200));
    assert_eq!(report.outflows, dec!(450));
    assert_eq!(report.net_change, dec!(750));
    assert_eq!(report.closing_cash, dec!(850));
    assert_eq!(report.by_source.len(), 2);
}

#[test]
fn test_cash_flow_empty_period() {
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let report = ReportService::cash_flow(vec![], dec!(100), start, march_31());
    assert_eq!(report.net_change, Decimal::ZERO);
    assert_eq!(report.closing_cash, dec!(100));
}
