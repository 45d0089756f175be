//! Domain event types published through the outbox.

use chrono::NaiveDate;
use ledgra_shared::types::{FiscalPeriodId, JournalEntryId, OpenItemId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::SourceType;
use crate::subledger::OpenItemKind;

/// Outbound domain events.
///
/// Consumers receive these at least once; payloads carry the ids needed to
/// deduplicate and to fetch current state without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// A journal entry was posted to the ledger.
    #[serde(rename = "journal.posted")]
    JournalPosted {
        /// Tenant the entry belongs to.
        tenant_id: TenantId,
        /// The posted entry.
        journal_id: JournalEntryId,
        /// Human-readable entry number.
        entry_number: String,
        /// Entry date.
        entry_date: NaiveDate,
        /// Business origin.
        source_type: SourceType,
        /// Total posted amount (per side).
        total_amount: Decimal,
    },

    /// A posted journal entry was reversed.
    #[serde(rename = "journal.reversed")]
    JournalReversed {
        /// Tenant the entries belong to.
        tenant_id: TenantId,
        /// The original entry.
        original_id: JournalEntryId,
        /// The reversing entry.
        reversal_id: JournalEntryId,
        /// Mandatory reversal reason.
        reason: String,
    },

    /// A fiscal period was closed.
    #[serde(rename = "period.closed")]
    PeriodClosed {
        /// Tenant the period belongs to.
        tenant_id: TenantId,
        /// The closed period.
        period_id: FiscalPeriodId,
        /// Period name.
        name: String,
        /// The closing entry, if one was generated.
        closing_entry_id: Option<JournalEntryId>,
    },

    /// A fiscal period was locked.
    #[serde(rename = "period.locked")]
    PeriodLocked {
        /// Tenant the period belongs to.
        tenant_id: TenantId,
        /// The locked period.
        period_id: FiscalPeriodId,
        /// Period name.
        name: String,
    },

    /// A locked fiscal period was unlocked (audited exception).
    #[serde(rename = "period.unlocked")]
    PeriodUnlocked {
        /// Tenant the period belongs to.
        tenant_id: TenantId,
        /// The unlocked period.
        period_id: FiscalPeriodId,
        /// Period name.
        name: String,
        /// Mandatory unlock reason.
        reason: String,
    },

    /// A receivable or payable was created.
    #[serde(rename = "open_item.created")]
    OpenItemCreated {
        /// Tenant the item belongs to.
        tenant_id: TenantId,
        /// The new item.
        open_item_id: OpenItemId,
        /// Receivable or payable.
        kind: OpenItemKind,
        /// Original amount.
        amount: Decimal,
    },

    /// A receivable or payable was fully settled.
    #[serde(rename = "open_item.paid")]
    OpenItemPaid {
        /// Tenant the item belongs to.
        tenant_id: TenantId,
        /// The settled item.
        open_item_id: OpenItemId,
        /// Receivable or payable.
        kind: OpenItemKind,
        /// Original amount.
        amount: Decimal,
    },
}

impl DomainEvent {
    /// The wire-level event type tag.
    ///
    /// Open-item events are tagged per side (`ar.*` / `ap.*`) so consumers
    /// can subscribe to one subledger without parsing payloads.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::JournalPosted { .. } => "journal.posted",
            Self::JournalReversed { .. } => "journal.reversed",
            Self::PeriodClosed { .. } => "period.closed",
            Self::PeriodLocked { .. } => "period.locked",
            Self::PeriodUnlocked { .. } => "period.unlocked",
            Self::OpenItemCreated { kind, .. } => match kind {
                OpenItemKind::Receivable => "ar.created",
                OpenItemKind::Payable => "ap.created",
            },
            Self::OpenItemPaid { kind, .. } => match kind {
                OpenItemKind::Receivable => "ar.paid",
                OpenItemKind::Payable => "ap.paid",
            },
        }
    }

    /// The tenant the event belongs to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        match self {
            Self::JournalPosted { tenant_id, .. }
            | Self::JournalReversed { tenant_id, .. }
            | Self::PeriodClosed { tenant_id, .. }
            | Self::PeriodLocked { tenant_id, .. }
            | Self::PeriodUnlocked { tenant_id, .. }
            | Self::OpenItemCreated { tenant_id, .. }
            | Self::OpenItemPaid { tenant_id, .. } => *tenant_id,
        }
    }
}
