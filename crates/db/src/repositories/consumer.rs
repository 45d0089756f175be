//! Auto-posting event consumer.
//!
//! Receives business events (delivered at least once by the messaging
//! layer), maps them through the tenant's resolver table, and executes
//! journal + subledger effects as a single atomic unit keyed by the
//! event-derived idempotency key. The same event arriving 0, 1, or N
//! times, concurrently or not, produces exactly one set of effects.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use ledgra_core::journal::{CreateJournalInput, JournalError, LineInput};
use ledgra_core::posting::{
    AccountResolver, BusinessEvent, OpenItemEffect, PostingError, build_posting,
};
use ledgra_core::subledger::{CreateOpenItemInput, OpenItemKind, SubledgerError};
use ledgra_shared::types::{AccountId, ActorId, JournalEntryId, TenantId};

use crate::entities::accounts;
use crate::repositories::journal::{JournalRepository, JournalWithLines, TxInsertOutcome};
use crate::repositories::subledger::{apply_payment_tx, find_by_source_tx, insert_open_item_tx};

/// The nil-UUID actor recorded on system-generated postings.
const SYSTEM_ACTOR: ActorId = ActorId::from_uuid(Uuid::nil());

/// Errors that can occur while consuming a business event.
#[derive(Debug, Error)]
pub enum ConsumeError {
    /// The event could not be mapped to journal lines.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Journal creation failed.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Subledger effect failed.
    #[error(transparent)]
    Subledger(#[from] SubledgerError),

    /// The resolver produced a code with no matching account.
    #[error("No account found for code '{0}'")]
    UnknownAccountCode(String),

    /// A settlement referenced an open item that does not exist.
    #[error("No open {kind:?} found for source '{source_id}'")]
    OpenItemNotFound {
        /// Receivable or payable.
        kind: OpenItemKind,
        /// The missing document reference.
        source_id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

fn db_err(err: DbErr) -> ConsumeError {
    ConsumeError::Database(err.to_string())
}

/// Result of consuming one event.
#[derive(Debug)]
pub struct ConsumeOutcome {
    /// The journal entry produced (or previously produced) by the event.
    pub journal: JournalWithLines,
    /// True when the event had already been consumed: the returned
    /// journal is the original and no new side effects were performed.
    pub is_duplicate: bool,
}

/// The auto-posting event consumer.
#[derive(Debug, Clone)]
pub struct EventConsumer {
    db: DatabaseConnection,
    journals: JournalRepository,
}

impl EventConsumer {
    /// Creates a new event consumer.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let journals = JournalRepository::new(db.clone());
        Self { db, journals }
    }

    /// Consumes one business event.
    ///
    /// Builds the deterministic posting instruction, resolves account
    /// codes against the tenant's chart, and persists the journal plus
    /// any receivable/payable effect in one transaction. Redelivered
    /// events return the original journal with `is_duplicate = true`.
    ///
    /// # Errors
    ///
    /// Returns `ConsumeError` on mapping, validation, or storage failure;
    /// nothing is persisted in that case.
    pub async fn handle(
        &self,
        event: &BusinessEvent,
        resolver: &AccountResolver,
    ) -> Result<ConsumeOutcome, ConsumeError> {
        let instruction = build_posting(event, resolver)?;
        let tenant_id = instruction.tenant_id;

        let input = self.to_journal_input(tenant_id, event, &instruction).await?;

        if let Some(existing) = self
            .journals
            .find_by_idempotency_key(tenant_id, &input.idempotency_key)
            .await?
        {
            tracing::info!(
                tenant_id = %tenant_id,
                event_type = event.event_type(),
                idempotency_key = %input.idempotency_key,
                "event already consumed, skipping"
            );
            return Ok(ConsumeOutcome {
                journal: existing,
                is_duplicate: true,
            });
        }

        // Auto-posted entries may land in CLOSED (not LOCKED) periods.
        let period = self.journals.validate_create(&input, true).await?;
        let period_id = period.map(|p| p.id);

        let txn = self.db.begin().await.map_err(db_err)?;

        let journal = match self
            .journals
            .insert_journal_tx(&txn, &input, period_id, None)
            .await?
        {
            TxInsertOutcome::Created(journal) => journal,
            TxInsertOutcome::DuplicateKey => {
                // A concurrent delivery won the insert; its effects stand.
                txn.rollback().await.map_err(db_err)?;
                let existing = self
                    .journals
                    .find_by_idempotency_key(tenant_id, &input.idempotency_key)
                    .await?
                    .ok_or_else(|| {
                        ConsumeError::Database(
                            "idempotency conflict raised but no existing entry found".to_string(),
                        )
                    })?;
                return Ok(ConsumeOutcome {
                    journal: existing,
                    is_duplicate: true,
                });
            }
        };

        match instruction.open_item {
            Some(OpenItemEffect::Create {
                kind,
                counterparty_id,
                amount,
                issue_date,
                due_date,
            }) => {
                insert_open_item_tx(
                    &txn,
                    &CreateOpenItemInput {
                        tenant_id,
                        kind,
                        counterparty_id,
                        source_type: event.source_type(),
                        source_id: instruction.journal.source_id.clone(),
                        amount,
                        issue_date,
                        due_date,
                        journal_entry_id: JournalEntryId::from_uuid(journal.entry.id),
                    },
                )
                .await?;
            }
            Some(OpenItemEffect::Apply {
                kind,
                settles_source_id,
                amount,
                payment_ref,
            }) => {
                let item = find_by_source_tx(&txn, tenant_id, kind, &settles_source_id)
                    .await
                    .map_err(db_err)?
                    .ok_or_else(|| ConsumeError::OpenItemNotFound {
                        kind,
                        source_id: settles_source_id.clone(),
                    })?;
                apply_payment_tx(
                    &txn,
                    item,
                    amount,
                    payment_ref,
                    JournalEntryId::from_uuid(journal.entry.id),
                )
                .await?;
            }
            None => {}
        }

        txn.commit().await.map_err(db_err)?;
        tracing::info!(
            tenant_id = %tenant_id,
            event_type = event.event_type(),
            journal_id = %journal.entry.id,
            "business event posted"
        );
        Ok(ConsumeOutcome {
            journal,
            is_duplicate: false,
        })
    }

    /// Resolves the instruction's account codes and assembles the journal
    /// input, embedding the full event payload for audit.
    async fn to_journal_input(
        &self,
        tenant_id: TenantId,
        event: &BusinessEvent,
        instruction: &ledgra_core::posting::PostingInstruction,
    ) -> Result<CreateJournalInput, ConsumeError> {
        let codes: Vec<String> = instruction
            .journal
            .lines
            .iter()
            .map(|l| l.account_code.clone())
            .collect();

        let by_code: HashMap<String, Uuid> = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Code.is_in(codes))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| (m.code, m.id))
            .collect();

        let lines = instruction
            .journal
            .lines
            .iter()
            .map(|line| {
                let id = by_code
                    .get(&line.account_code)
                    .ok_or_else(|| ConsumeError::UnknownAccountCode(line.account_code.clone()))?;
                Ok(LineInput {
                    account_id: AccountId::from_uuid(*id),
                    description: line.description.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    department: None,
                    project: None,
                })
            })
            .collect::<Result<Vec<_>, ConsumeError>>()?;

        let source_payload = serde_json::to_value(event)
            .map_err(|e| ConsumeError::Database(format!("event snapshot failed: {e}")))?;

        Ok(CreateJournalInput {
            tenant_id,
            entry_date: instruction.journal.entry_date,
            description: instruction.journal.description.clone(),
            source_type: instruction.journal.source_type,
            source_id: Some(instruction.journal.source_id.clone()),
            idempotency_key: instruction.journal.idempotency_key.clone(),
            lines,
            created_by: SYSTEM_ACTOR,
            post_immediately: true,
            source_payload: Some(source_payload),
        })
    }
}
