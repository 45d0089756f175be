//! `SeaORM` Entity for the open_items table (receivables and payables).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{OpenItemKind, OpenItemStatus, SourceType};

/// Open receivable/payable row.
///
/// Invariant (also a table CHECK): `0 <= remaining_amount <= original_amount`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "open_items")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Tenant the item belongs to.
    pub tenant_id: Uuid,
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// The customer or supplier.
    pub counterparty_id: Uuid,
    /// Business origin.
    pub source_type: SourceType,
    /// Originating document reference, unique per tenant and kind.
    pub source_id: String,
    /// Original amount.
    pub original_amount: Decimal,
    /// Remaining amount.
    pub remaining_amount: Decimal,
    /// Issue date.
    pub issue_date: Date,
    /// Due date.
    pub due_date: Date,
    /// Settlement status.
    pub status: OpenItemStatus,
    /// The journal entry that created this item.
    pub journal_entry_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Payment applications against this item.
    #[sea_orm(has_many = "super::payment_applications::Entity")]
    PaymentApplications,
    /// The journal entry that created this item.
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
}

impl Related<super::payment_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentApplications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
