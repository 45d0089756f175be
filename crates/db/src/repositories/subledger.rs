//! AR/AP subledger repository.
//!
//! Open items are created alongside their originating journal entry and
//! settled through payment applications. Application is atomic with the
//! payment's own journal entry: the consumer performs both inside one
//! transaction, and the standalone path takes the already-created payment
//! journal's id.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};

use ledgra_core::outbox::DomainEvent;
use ledgra_core::subledger::{
    self, AgingReport, CreateOpenItemInput, OpenItem, OpenItemKind, SubledgerError,
};
use ledgra_shared::types::{
    CounterpartyId, JournalEntryId, OpenItemId, PaymentApplicationId, TenantId,
};

use crate::entities::{open_items, payment_applications, sea_orm_active_enums};
use crate::repositories::outbox::insert_event_tx;

fn db_err(err: DbErr) -> SubledgerError {
    SubledgerError::Database(err.to_string())
}

/// Converts an open item row to the core domain type.
pub(crate) fn to_core_item(model: &open_items::Model) -> OpenItem {
    OpenItem {
        id: OpenItemId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        kind: model.kind.into(),
        counterparty_id: CounterpartyId::from_uuid(model.counterparty_id),
        source_type: model.source_type.into(),
        source_id: model.source_id.clone(),
        original_amount: model.original_amount,
        remaining_amount: model.remaining_amount,
        issue_date: model.issue_date,
        due_date: model.due_date,
        status: model.status.into(),
        journal_entry_id: JournalEntryId::from_uuid(model.journal_entry_id),
    }
}

/// Subledger repository.
#[derive(Debug, Clone)]
pub struct SubledgerRepository {
    db: DatabaseConnection,
}

impl SubledgerRepository {
    /// Creates a new subledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an open item (receivable or payable) with
    /// `remaining = original` and status OPEN.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOriginalAmount` for non-positive amounts.
    pub async fn create_open_item(
        &self,
        input: CreateOpenItemInput,
    ) -> Result<open_items::Model, SubledgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let model = insert_open_item_tx(&txn, &input).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(model)
    }

    /// Applies a payment to an open item, recording the application and
    /// linking it to the payment's journal entry.
    ///
    /// # Errors
    ///
    /// Returns `OverApplicationError` if the amount exceeds the remaining
    /// balance, or `ItemNotOpen` for settled/void items.
    pub async fn apply_payment(
        &self,
        tenant_id: TenantId,
        open_item_id: OpenItemId,
        amount: Decimal,
        payment_ref: Option<String>,
        journal_entry_id: JournalEntryId,
    ) -> Result<(open_items::Model, payment_applications::Model), SubledgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Row lock serializes concurrent applications to the same item.
        let item = open_items::Entity::find_by_id(open_item_id.into_inner())
            .filter(open_items::Column::TenantId.eq(tenant_id.into_inner()))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(SubledgerError::NotFound(open_item_id))?;

        let result = apply_payment_tx(&txn, item, amount, payment_ref, journal_entry_id).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(result)
    }

    /// Finds an open item by its originating document reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_source(
        &self,
        tenant_id: TenantId,
        kind: OpenItemKind,
        source_id: &str,
    ) -> Result<Option<open_items::Model>, SubledgerError> {
        let db_kind: sea_orm_active_enums::OpenItemKind = kind.into();
        open_items::Entity::find()
            .filter(open_items::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(open_items::Column::Kind.eq(db_kind))
            .filter(open_items::Column::SourceId.eq(source_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Builds the aging report for a tenant's receivables or payables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn aging_report(
        &self,
        tenant_id: TenantId,
        kind: OpenItemKind,
        as_of: NaiveDate,
    ) -> Result<AgingReport, SubledgerError> {
        let db_kind: sea_orm_active_enums::OpenItemKind = kind.into();
        let models = open_items::Entity::find()
            .filter(open_items::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(open_items::Column::Kind.eq(db_kind))
            .filter(
                open_items::Column::Status.is_in([
                    sea_orm_active_enums::OpenItemStatus::Open,
                    sea_orm_active_enums::OpenItemStatus::Partial,
                ]),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<OpenItem> = models.iter().map(to_core_item).collect();
        Ok(subledger::aging_report(&items, kind, as_of))
    }
}

/// Inserts an open item (plus its outbox event) within the caller's
/// transaction.
pub(crate) async fn insert_open_item_tx(
    txn: &DatabaseTransaction,
    input: &CreateOpenItemInput,
) -> Result<open_items::Model, SubledgerError> {
    subledger::application::validate_original_amount(input.amount)?;

    let now = chrono::Utc::now().into();
    let id = OpenItemId::new();
    let model = open_items::ActiveModel {
        id: Set(id.into_inner()),
        tenant_id: Set(input.tenant_id.into_inner()),
        kind: Set(input.kind.into()),
        counterparty_id: Set(input.counterparty_id.into_inner()),
        source_type: Set(input.source_type.into()),
        source_id: Set(input.source_id.clone()),
        original_amount: Set(input.amount),
        remaining_amount: Set(input.amount),
        issue_date: Set(input.issue_date),
        due_date: Set(input.due_date),
        status: Set(sea_orm_active_enums::OpenItemStatus::Open),
        journal_entry_id: Set(input.journal_entry_id.into_inner()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await
    .map_err(db_err)?;

    insert_event_tx(
        txn,
        &DomainEvent::OpenItemCreated {
            tenant_id: input.tenant_id,
            open_item_id: id,
            kind: input.kind,
            amount: input.amount,
        },
    )
    .await
    .map_err(db_err)?;

    Ok(model)
}

/// Applies a payment to a loaded open item within the caller's
/// transaction: updates remaining/status, records the application, and
/// emits the settled event when the item reaches PAID.
pub(crate) async fn apply_payment_tx(
    txn: &DatabaseTransaction,
    item: open_items::Model,
    amount: Decimal,
    payment_ref: Option<String>,
    journal_entry_id: JournalEntryId,
) -> Result<(open_items::Model, payment_applications::Model), SubledgerError> {
    let core_item = to_core_item(&item);
    let outcome = subledger::apply_payment(&core_item, amount)?;

    let now = chrono::Utc::now().into();
    let mut active: open_items::ActiveModel = item.into();
    active.remaining_amount = Set(outcome.new_remaining);
    active.status = Set(outcome.new_status.into());
    active.updated_at = Set(now);
    let updated = active.update(txn).await.map_err(db_err)?;

    let application = payment_applications::ActiveModel {
        id: Set(PaymentApplicationId::new().into_inner()),
        tenant_id: Set(updated.tenant_id),
        open_item_id: Set(updated.id),
        amount: Set(amount),
        payment_ref: Set(payment_ref),
        journal_entry_id: Set(journal_entry_id.into_inner()),
        applied_at: Set(now),
    }
    .insert(txn)
    .await
    .map_err(db_err)?;

    if outcome.new_status == ledgra_core::subledger::OpenItemStatus::Paid {
        insert_event_tx(
            txn,
            &DomainEvent::OpenItemPaid {
                tenant_id: core_item.tenant_id,
                open_item_id: core_item.id,
                kind: core_item.kind,
                amount: core_item.original_amount,
            },
        )
        .await
        .map_err(db_err)?;
    }

    tracing::info!(
        tenant_id = %core_item.tenant_id,
        open_item_id = %core_item.id,
        remaining = %outcome.new_remaining,
        "payment applied to open item"
    );

    Ok((updated, application))
}

/// Finds and locks an open item by source reference within a transaction.
pub(crate) async fn find_by_source_tx(
    txn: &DatabaseTransaction,
    tenant_id: TenantId,
    kind: OpenItemKind,
    source_id: &str,
) -> Result<Option<open_items::Model>, DbErr> {
    let db_kind: sea_orm_active_enums::OpenItemKind = kind.into();
    open_items::Entity::find()
        .filter(open_items::Column::TenantId.eq(tenant_id.into_inner()))
        .filter(open_items::Column::Kind.eq(db_kind))
        .filter(open_items::Column::SourceId.eq(source_id))
        .lock_exclusive()
        .one(txn)
        .await
}
