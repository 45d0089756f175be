//! `SeaORM` Entity for the payment_applications table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A payment applied against an open item. Append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_applications")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Tenant the application belongs to.
    pub tenant_id: Uuid,
    /// The open item being settled.
    pub open_item_id: Uuid,
    /// Amount applied (positive).
    pub amount: Decimal,
    /// External payment reference.
    pub payment_ref: Option<String>,
    /// The payment's own journal entry.
    pub journal_entry_id: Uuid,
    /// When the application was recorded.
    pub applied_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The open item being settled.
    #[sea_orm(
        belongs_to = "super::open_items::Entity",
        from = "Column::OpenItemId",
        to = "super::open_items::Column::Id"
    )]
    OpenItems,
}

impl Related<super::open_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
