//! Open item (receivable/payable) domain types.

use chrono::NaiveDate;
use ledgra_shared::types::{CounterpartyId, JournalEntryId, OpenItemId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::SourceType;

/// Whether an open item is money owed to us or by us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenItemKind {
    /// Money owed to us (accounts receivable).
    Receivable,
    /// Money we owe (accounts payable).
    Payable,
}

impl OpenItemKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Receivable => "receivable",
            Self::Payable => "payable",
        }
    }
}

/// Settlement status of an open item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenItemStatus {
    /// Nothing applied yet.
    Open,
    /// Partially settled (0 < remaining < original).
    Partial,
    /// Fully settled (remaining == 0).
    Paid,
    /// Voided alongside its journal entry.
    Void,
}

impl OpenItemStatus {
    /// Returns true if payments may still be applied.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        matches!(self, Self::Open | Self::Partial)
    }
}

/// An open receivable or payable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenItem {
    /// Unique identifier.
    pub id: OpenItemId,
    /// Tenant this item belongs to.
    pub tenant_id: TenantId,
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// The customer or supplier.
    pub counterparty_id: CounterpartyId,
    /// Business origin of the item.
    pub source_type: SourceType,
    /// Reference to the originating document.
    pub source_id: String,
    /// Original amount.
    pub original_amount: Decimal,
    /// Remaining amount (original − Σ applications, never negative).
    pub remaining_amount: Decimal,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date, drives aging.
    pub due_date: NaiveDate,
    /// Settlement status.
    pub status: OpenItemStatus,
    /// The journal entry that created this item.
    pub journal_entry_id: JournalEntryId,
}

/// Input for creating an open item.
#[derive(Debug, Clone)]
pub struct CreateOpenItemInput {
    /// Tenant the item belongs to.
    pub tenant_id: TenantId,
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// The customer or supplier.
    pub counterparty_id: CounterpartyId,
    /// Business origin.
    pub source_type: SourceType,
    /// Originating document reference.
    pub source_id: String,
    /// Original (and initial remaining) amount.
    pub amount: Decimal,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// The journal entry created alongside this item.
    pub journal_entry_id: JournalEntryId,
}
