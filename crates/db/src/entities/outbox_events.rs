//! `SeaORM` Entity for the outbox_events table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outbox event row.
///
/// Created in the same transaction as the state change it describes;
/// `published_at` is stamped by the at-least-once publisher; never
/// mutated otherwise.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "outbox_events")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Tenant the event belongs to.
    pub tenant_id: Uuid,
    /// Wire-level event type tag.
    pub event_type: String,
    /// Event payload.
    pub payload: Json,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Publication timestamp (NULL = pending).
    pub published_at: Option<DateTimeWithTimeZone>,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
