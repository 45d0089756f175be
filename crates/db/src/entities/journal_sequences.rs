//! `SeaORM` Entity for the journal_sequences table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-tenant, per-year journal number counter.
///
/// Concurrent allocations serialize through `SELECT ... FOR UPDATE` on
/// this row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_sequences")]
pub struct Model {
    /// Tenant the counter belongs to.
    #[sea_orm(primary_key, auto_increment = false)]
    pub tenant_id: Uuid,
    /// Calendar year of the counter.
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    /// Last allocated sequence value.
    pub last_value: i64,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
