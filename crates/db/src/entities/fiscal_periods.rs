//! `SeaORM` Entity for the fiscal_periods table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PeriodStatus;

/// Fiscal period row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fiscal_periods")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Tenant the period belongs to.
    pub tenant_id: Uuid,
    /// Period name (e.g., "March 2026").
    pub name: String,
    /// Ordering number within the tenant's sequence.
    pub period_number: i32,
    /// Start date.
    pub start_date: Date,
    /// End date.
    pub end_date: Date,
    /// Current status.
    pub status: PeriodStatus,
    /// Who closed the period.
    pub closed_by: Option<Uuid>,
    /// When the period was closed.
    pub closed_at: Option<DateTimeWithTimeZone>,
    /// Who locked the period.
    pub locked_by: Option<Uuid>,
    /// When the period was locked.
    pub locked_at: Option<DateTimeWithTimeZone>,
    /// Reason recorded on unlock (audited exception).
    pub unlock_reason: Option<String>,
    /// The closing journal entry, if one was generated.
    pub closing_entry_id: Option<Uuid>,
    /// Point-in-time balance snapshot captured at close.
    pub balance_snapshot: Option<Json>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Journal entries within this period.
    #[sea_orm(has_many = "super::journal_entries::Entity")]
    JournalEntries,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
