//! Ledger read-side math.
//!
//! Pure balance computation over posted journal lines. The repository
//! feeds aggregated debit/credit totals or chronological line activity;
//! this module orients balances to each account's normal side and
//! computes running balances for drill-down.

pub mod balance;

pub use balance::{ActivityLine, LedgerRow, running_ledger, signed_balance};
