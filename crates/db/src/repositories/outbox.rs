//! Outbox repository.
//!
//! Events are inserted in the same transaction as the state change they
//! describe (callers use `insert_event_tx`); a separate publisher drains
//! pending rows at least once and marks them published.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use ledgra_core::outbox::DomainEvent;
use ledgra_shared::types::OutboxEventId;

use crate::entities::outbox_events;

/// Outbox repository.
#[derive(Debug, Clone)]
pub struct OutboxRepository {
    db: DatabaseConnection,
}

/// Inserts a domain event into the outbox within the caller's transaction.
pub(crate) async fn insert_event_tx<C: ConnectionTrait>(
    conn: &C,
    event: &DomainEvent,
) -> Result<(), DbErr> {
    let payload = serde_json::to_value(event)
        .map_err(|e| DbErr::Custom(format!("outbox payload serialization failed: {e}")))?;

    let row = outbox_events::ActiveModel {
        id: Set(OutboxEventId::new().into_inner()),
        tenant_id: Set(event.tenant_id().into_inner()),
        event_type: Set(event.event_type().to_string()),
        payload: Set(payload),
        created_at: Set(chrono::Utc::now().into()),
        published_at: Set(None),
    };

    outbox_events::Entity::insert(row).exec(conn).await?;
    Ok(())
}

impl OutboxRepository {
    /// Creates a new outbox repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches pending (unpublished) events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending(&self, limit: u64) -> Result<Vec<outbox_events::Model>, DbErr> {
        outbox_events::Entity::find()
            .filter(outbox_events::Column::PublishedAt.is_null())
            .order_by_asc(outbox_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Marks events as published. Safe to call repeatedly: already
    /// published rows are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_published(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = outbox_events::Entity::update_many()
            .col_expr(
                outbox_events::Column::PublishedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(outbox_events::Column::Id.is_in(ids.iter().copied()))
            .filter(outbox_events::Column::PublishedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
