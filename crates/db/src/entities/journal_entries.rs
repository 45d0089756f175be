//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{JournalStatus, SourceType};

/// Journal entry header.
///
/// Once status is `posted` the row is immutable except for the narrow
/// status-transition columns (`reversed_by`, `reversal_reason`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Tenant the entry belongs to.
    pub tenant_id: Uuid,
    /// Human-readable sequential number, per tenant per year.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: Date,
    /// Free-text description.
    pub description: String,
    /// Business origin.
    pub source_type: SourceType,
    /// Reference to the originating business document.
    pub source_id: Option<String>,
    /// Idempotency key, unique per tenant.
    pub idempotency_key: String,
    /// Entry status.
    pub status: JournalStatus,
    /// Fiscal period containing the entry date (NULL in grace mode).
    pub fiscal_period_id: Option<Uuid>,
    /// The entry this one reverses, if any. Unique: one reversal per entry.
    pub reversal_of: Option<Uuid>,
    /// The entry that reverses this one, if any.
    pub reversed_by: Option<Uuid>,
    /// Mandatory reason when reversal linkage is present.
    pub reversal_reason: Option<String>,
    /// Reason recorded when a draft was voided.
    pub void_reason: Option<String>,
    /// Snapshot of the triggering payload, kept for audit.
    pub source_payload: Option<Json>,
    /// The actor who created the entry.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The entry's lines.
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
    /// The fiscal period the entry belongs to.
    #[sea_orm(
        belongs_to = "super::fiscal_periods::Entity",
        from = "Column::FiscalPeriodId",
        to = "super::fiscal_periods::Column::Id"
    )]
    FiscalPeriods,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl Related<super::fiscal_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FiscalPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
