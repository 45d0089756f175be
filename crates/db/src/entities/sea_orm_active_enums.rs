//! Database enum mappings.
//!
//! These mirror the Postgres enum types created by the initial migration.
//! Conversions to and from the `ledgra-core` enums live here so the
//! repositories stay free of mapping boilerplate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Resources owned.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Obligations owed.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Owner's residual interest.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue earned.
    #[sea_orm(string_value = "income")]
    Income,
    /// Costs incurred.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Normal balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "normal_balance")]
pub enum NormalBalance {
    /// Balance grows with debits.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Balance grows with credits.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Journal entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_status")]
pub enum JournalStatus {
    /// Staged, not yet affecting the ledger.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Posted to the ledger (immutable).
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Discarded before posting (immutable).
    #[sea_orm(string_value = "void")]
    Void,
}

/// Business origin of a journal entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_type")]
pub enum SourceType {
    /// Direct sale.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Direct purchase.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Customer invoice.
    #[sea_orm(string_value = "invoice")]
    Invoice,
    /// Supplier bill.
    #[sea_orm(string_value = "bill")]
    Bill,
    /// Payment in or out.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Standalone expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Manually keyed entry.
    #[sea_orm(string_value = "manual")]
    Manual,
    /// Period-closing entry.
    #[sea_orm(string_value = "closing")]
    Closing,
    /// Adjustment entry.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Reversal of a previous entry.
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

/// Fiscal period status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_status")]
pub enum PeriodStatus {
    /// Accepts all postings.
    #[sea_orm(string_value = "open")]
    Open,
    /// Closed; system-generated postings only.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Locked; nothing posts.
    #[sea_orm(string_value = "locked")]
    Locked,
}

/// Open item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "open_item_kind")]
pub enum OpenItemKind {
    /// Accounts receivable.
    #[sea_orm(string_value = "receivable")]
    Receivable,
    /// Accounts payable.
    #[sea_orm(string_value = "payable")]
    Payable,
}

/// Open item settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "open_item_status")]
pub enum OpenItemStatus {
    /// Nothing applied yet.
    #[sea_orm(string_value = "open")]
    Open,
    /// Partially settled.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Voided.
    #[sea_orm(string_value = "void")]
    Void,
}

// ============================================================
// Conversions to/from core enums
// ============================================================

impl From<ledgra_core::coa::AccountType> for AccountType {
    fn from(value: ledgra_core::coa::AccountType) -> Self {
        match value {
            ledgra_core::coa::AccountType::Asset => Self::Asset,
            ledgra_core::coa::AccountType::Liability => Self::Liability,
            ledgra_core::coa::AccountType::Equity => Self::Equity,
            ledgra_core::coa::AccountType::Income => Self::Income,
            ledgra_core::coa::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for ledgra_core::coa::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<ledgra_core::coa::NormalBalance> for NormalBalance {
    fn from(value: ledgra_core::coa::NormalBalance) -> Self {
        match value {
            ledgra_core::coa::NormalBalance::Debit => Self::Debit,
            ledgra_core::coa::NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<NormalBalance> for ledgra_core::coa::NormalBalance {
    fn from(value: NormalBalance) -> Self {
        match value {
            NormalBalance::Debit => Self::Debit,
            NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<ledgra_core::journal::JournalStatus> for JournalStatus {
    fn from(value: ledgra_core::journal::JournalStatus) -> Self {
        match value {
            ledgra_core::journal::JournalStatus::Draft => Self::Draft,
            ledgra_core::journal::JournalStatus::Posted => Self::Posted,
            ledgra_core::journal::JournalStatus::Void => Self::Void,
        }
    }
}

impl From<JournalStatus> for ledgra_core::journal::JournalStatus {
    fn from(value: JournalStatus) -> Self {
        match value {
            JournalStatus::Draft => Self::Draft,
            JournalStatus::Posted => Self::Posted,
            JournalStatus::Void => Self::Void,
        }
    }
}

impl From<ledgra_core::journal::SourceType> for SourceType {
    fn from(value: ledgra_core::journal::SourceType) -> Self {
        match value {
            ledgra_core::journal::SourceType::Sale => Self::Sale,
            ledgra_core::journal::SourceType::Purchase => Self::Purchase,
            ledgra_core::journal::SourceType::Invoice => Self::Invoice,
            ledgra_core::journal::SourceType::Bill => Self::Bill,
            ledgra_core::journal::SourceType::Payment => Self::Payment,
            ledgra_core::journal::SourceType::Expense => Self::Expense,
            ledgra_core::journal::SourceType::Manual => Self::Manual,
            ledgra_core::journal::SourceType::Closing => Self::Closing,
            ledgra_core::journal::SourceType::Adjustment => Self::Adjustment,
            ledgra_core::journal::SourceType::Reversal => Self::Reversal,
        }
    }
}

impl From<SourceType> for ledgra_core::journal::SourceType {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Sale => Self::Sale,
            SourceType::Purchase => Self::Purchase,
            SourceType::Invoice => Self::Invoice,
            SourceType::Bill => Self::Bill,
            SourceType::Payment => Self::Payment,
            SourceType::Expense => Self::Expense,
            SourceType::Manual => Self::Manual,
            SourceType::Closing => Self::Closing,
            SourceType::Adjustment => Self::Adjustment,
            SourceType::Reversal => Self::Reversal,
        }
    }
}

impl From<ledgra_core::fiscal::PeriodStatus> for PeriodStatus {
    fn from(value: ledgra_core::fiscal::PeriodStatus) -> Self {
        match value {
            ledgra_core::fiscal::PeriodStatus::Open => Self::Open,
            ledgra_core::fiscal::PeriodStatus::Closed => Self::Closed,
            ledgra_core::fiscal::PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<PeriodStatus> for ledgra_core::fiscal::PeriodStatus {
    fn from(value: PeriodStatus) -> Self {
        match value {
            PeriodStatus::Open => Self::Open,
            PeriodStatus::Closed => Self::Closed,
            PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<ledgra_core::subledger::OpenItemKind> for OpenItemKind {
    fn from(value: ledgra_core::subledger::OpenItemKind) -> Self {
        match value {
            ledgra_core::subledger::OpenItemKind::Receivable => Self::Receivable,
            ledgra_core::subledger::OpenItemKind::Payable => Self::Payable,
        }
    }
}

impl From<OpenItemKind> for ledgra_core::subledger::OpenItemKind {
    fn from(value: OpenItemKind) -> Self {
        match value {
            OpenItemKind::Receivable => Self::Receivable,
            OpenItemKind::Payable => Self::Payable,
        }
    }
}

impl From<ledgra_core::subledger::OpenItemStatus> for OpenItemStatus {
    fn from(value: ledgra_core::subledger::OpenItemStatus) -> Self {
        match value {
            ledgra_core::subledger::OpenItemStatus::Open => Self::Open,
            ledgra_core::subledger::OpenItemStatus::Partial => Self::Partial,
            ledgra_core::subledger::OpenItemStatus::Paid => Self::Paid,
            ledgra_core::subledger::OpenItemStatus::Void => Self::Void,
        }
    }
}

impl From<OpenItemStatus> for ledgra_core::subledger::OpenItemStatus {
    fn from(value: OpenItemStatus) -> Self {
        match value {
            OpenItemStatus::Open => Self::Open,
            OpenItemStatus::Partial => Self::Partial,
            OpenItemStatus::Paid => Self::Paid,
            OpenItemStatus::Void => Self::Void,
        }
    }
}
