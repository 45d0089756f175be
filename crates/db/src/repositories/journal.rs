//! Journal repository: the kernel's only write path for journal entries.
//!
//! Creation is idempotent: the unique constraint on
//! `(tenant_id, idempotency_key)` plus insert-on-conflict semantics make
//! the same request safe to arrive 0, 1, or N times, concurrently or not.
//! Header, lines, and outbox row commit in one transaction; a failure
//! leaves no partial journal visible.

use chrono::Datelike;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use uuid::Uuid;

use ledgra_core::fiscal::{self, FiscalPeriod};
use ledgra_core::journal::{
    self, CreateJournalInput, JournalError, JournalService, JournalStatus, PostedJournal,
    PostedLine, format_entry_number,
};
use ledgra_core::outbox::DomainEvent;
use ledgra_shared::types::{
    ActorId, FiscalPeriodId, JournalEntryId, JournalLineId, PageRequest, PageResponse, TenantId,
};

use crate::entities::{
    accounts, fiscal_periods, journal_entries, journal_lines, journal_sequences,
    sea_orm_active_enums,
};
use crate::repositories::outbox::insert_event_tx;

/// A journal entry header with its lines.
#[derive(Debug, Clone)]
pub struct JournalWithLines {
    /// The header row.
    pub entry: journal_entries::Model,
    /// The lines, ordered by line number.
    pub lines: Vec<journal_lines::Model>,
}

/// Result of a create call.
#[derive(Debug, Clone)]
pub struct CreatedJournal {
    /// The persisted (or pre-existing) journal.
    pub journal: JournalWithLines,
    /// True when the idempotency key had been seen before: the returned
    /// journal is the original, and no new side effects were produced.
    pub is_duplicate: bool,
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    /// Filter by status.
    pub status: Option<JournalStatus>,
    /// Filter by source type.
    pub source_type: Option<journal::SourceType>,
    /// Filter by originating document id.
    pub source_id: Option<String>,
    /// Only entries with a line on this account.
    pub account_id: Option<Uuid>,
    /// Entries dated on or after this date.
    pub date_from: Option<chrono::NaiveDate>,
    /// Entries dated on or before this date.
    pub date_to: Option<chrono::NaiveDate>,
}

/// Outcome of an in-transaction insert attempt.
pub(crate) enum TxInsertOutcome {
    /// The journal was inserted.
    Created(JournalWithLines),
    /// Another transaction holds this idempotency key; nothing inserted.
    DuplicateKey,
}

/// Reversal linkage recorded on a reversing entry's header.
pub(crate) struct ReversalLink {
    /// The entry being reversed.
    pub original_id: Uuid,
    /// The mandatory reversal reason.
    pub reason: String,
}

fn db_err(err: DbErr) -> JournalError {
    JournalError::Database(err.to_string())
}

/// Converts a fiscal period row to the core domain type.
pub(crate) fn to_core_period(model: &fiscal_periods::Model) -> FiscalPeriod {
    FiscalPeriod {
        id: FiscalPeriodId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        name: model.name.clone(),
        period_number: model.period_number,
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.into(),
    }
}

/// Converts a journal row and its lines to the core domain type.
#[must_use]
pub fn to_core_journal(journal: &JournalWithLines) -> PostedJournal {
    PostedJournal {
        id: JournalEntryId::from_uuid(journal.entry.id),
        tenant_id: TenantId::from_uuid(journal.entry.tenant_id),
        entry_number: journal.entry.entry_number.clone(),
        entry_date: journal.entry.entry_date,
        description: journal.entry.description.clone(),
        source_type: journal.entry.source_type.into(),
        status: journal.entry.status.into(),
        reversal_of: journal.entry.reversal_of.map(JournalEntryId::from_uuid),
        reversed_by: journal.entry.reversed_by.map(JournalEntryId::from_uuid),
        lines: journal
            .lines
            .iter()
            .map(|line| PostedLine {
                account_id: ledgra_shared::types::AccountId::from_uuid(line.account_id),
                line_number: line.line_number,
                description: line.description.clone(),
                debit: line.debit,
                credit: line.credit,
                department: line.department.clone(),
                project: line.project.clone(),
            })
            .collect(),
    }
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a journal entry.
    ///
    /// On a new idempotency key: validates double-entry and period
    /// eligibility, allocates the next sequential entry number, and
    /// persists header + lines + outbox event atomically. On a repeated
    /// key for the same tenant: returns the existing entry unchanged with
    /// `is_duplicate = true`; no duplicate side effects, no error.
    ///
    /// `is_system_generated` postings (auto-posting, closing entries) may
    /// land in CLOSED-but-not-LOCKED periods.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` on validation or period-eligibility failure;
    /// nothing is persisted in that case.
    pub async fn create_journal(
        &self,
        input: CreateJournalInput,
        is_system_generated: bool,
    ) -> Result<CreatedJournal, JournalError> {
        if let Some(existing) = self
            .find_by_idempotency_key(input.tenant_id, &input.idempotency_key)
            .await?
        {
            tracing::info!(
                tenant_id = %input.tenant_id,
                idempotency_key = %input.idempotency_key,
                journal_id = %existing.entry.id,
                "duplicate journal request, returning existing entry"
            );
            return Ok(CreatedJournal {
                journal: existing,
                is_duplicate: true,
            });
        }

        let period = self.validate_create(&input, is_system_generated).await?;
        let period_id = period.as_ref().map(|p| p.id);

        let txn = self.db.begin().await.map_err(db_err)?;
        match self.insert_journal_tx(&txn, &input, period_id, None).await? {
            TxInsertOutcome::Created(journal) => {
                txn.commit().await.map_err(db_err)?;
                tracing::info!(
                    tenant_id = %input.tenant_id,
                    journal_id = %journal.entry.id,
                    entry_number = %journal.entry.entry_number,
                    "journal entry created"
                );
                Ok(CreatedJournal {
                    journal,
                    is_duplicate: false,
                })
            }
            TxInsertOutcome::DuplicateKey => {
                // Lost a concurrent race on the idempotency key; the winner's
                // row is the result.
                txn.rollback().await.map_err(db_err)?;
                let existing = self
                    .find_by_idempotency_key(input.tenant_id, &input.idempotency_key)
                    .await?
                    .ok_or_else(|| {
                        JournalError::Database(
                            "idempotency conflict raised but no existing entry found".to_string(),
                        )
                    })?;
                Ok(CreatedJournal {
                    journal: existing,
                    is_duplicate: true,
                })
            }
        }
    }

    /// Posts a draft entry to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `NotPostable` for non-draft entries, or a period error.
    pub async fn post_journal(
        &self,
        tenant_id: TenantId,
        journal_id: JournalEntryId,
        _actor: ActorId,
    ) -> Result<JournalWithLines, JournalError> {
        let journal = self.get_journal(tenant_id, journal_id).await?;
        let period = self
            .find_period_for_date(tenant_id, journal.entry.entry_date)
            .await?;

        JournalService::validate_post(
            &to_core_journal(&journal),
            period.as_ref().map(to_core_period).as_ref(),
            false,
        )?;

        let total: Decimal = journal.lines.iter().map(|l| l.debit).sum();
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut active: journal_entries::ActiveModel = journal.entry.clone().into();
        active.status = Set(sea_orm_active_enums::JournalStatus::Posted);
        active.updated_at = Set(chrono::Utc::now().into());
        let entry = active.update(&txn).await.map_err(db_err)?;

        insert_event_tx(
            &txn,
            &DomainEvent::JournalPosted {
                tenant_id,
                journal_id,
                entry_number: entry.entry_number.clone(),
                entry_date: entry.entry_date,
                source_type: entry.source_type.into(),
                total_amount: total,
            },
        )
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(JournalWithLines {
            entry,
            lines: journal.lines,
        })
    }

    /// Voids a draft entry. Posted entries must be reversed instead.
    ///
    /// # Errors
    ///
    /// Returns `CannotVoidPosted`, `AlreadyVoid`, or `MissingReason`.
    pub async fn void_journal(
        &self,
        tenant_id: TenantId,
        journal_id: JournalEntryId,
        reason: &str,
        _actor: ActorId,
    ) -> Result<JournalWithLines, JournalError> {
        if reason.trim().is_empty() {
            return Err(JournalError::MissingReason);
        }

        let journal = self.get_journal(tenant_id, journal_id).await?;
        JournalService::validate_void(&to_core_journal(&journal))?;

        let mut active: journal_entries::ActiveModel = journal.entry.clone().into();
        active.status = Set(sea_orm_active_enums::JournalStatus::Void);
        active.void_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(chrono::Utc::now().into());
        let entry = active.update(&self.db).await.map_err(db_err)?;

        tracing::info!(
            tenant_id = %tenant_id,
            journal_id = %journal_id,
            "draft journal voided"
        );
        Ok(JournalWithLines {
            entry,
            lines: journal.lines,
        })
    }

    /// Reverses a posted entry: creates a brand-new entry with every
    /// line's debit/credit swapped, dated on `reversal_date`, linked both
    /// ways. Append-only correction: the original is never edited beyond
    /// its `reversed_by` marker.
    ///
    /// # Errors
    ///
    /// Fails if the entry is not posted, already reversed, the original's
    /// period is locked, or the reversal date falls in a period that is
    /// not open.
    pub async fn reverse_journal(
        &self,
        tenant_id: TenantId,
        journal_id: JournalEntryId,
        reversal_date: chrono::NaiveDate,
        reason: &str,
        actor: ActorId,
    ) -> Result<JournalWithLines, JournalError> {
        let original = self.get_journal(tenant_id, journal_id).await?;
        let reversal_input =
            journal::build_reversal(&to_core_journal(&original), reversal_date, reason, actor)?;

        // The original's period must not be locked.
        if let Some(period_id) = original.entry.fiscal_period_id {
            let period = fiscal_periods::Entity::find_by_id(period_id)
                .one(&self.db)
                .await
                .map_err(db_err)?;
            if let Some(period) = period {
                if period.status == sea_orm_active_enums::PeriodStatus::Locked {
                    return Err(JournalError::PeriodLocked {
                        period_id: FiscalPeriodId::from_uuid(period.id),
                    });
                }
            }
        }

        // The reversal date must land in an open period (or grace mode).
        let reversal_period = self.find_period_for_date(tenant_id, reversal_date).await?;
        fiscal::validate_posting(
            reversal_period.as_ref().map(to_core_period).as_ref(),
            reversal_date,
            false,
        )?;

        let reversal_period_id = reversal_period.as_ref().map(|p| p.id);
        let link = ReversalLink {
            original_id: journal_id.into_inner(),
            reason: reason.to_string(),
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        let reversal = match self
            .insert_journal_tx(&txn, &reversal_input, reversal_period_id, Some(&link))
            .await?
        {
            TxInsertOutcome::Created(journal) => journal,
            TxInsertOutcome::DuplicateKey => {
                // A concurrent reversal won; one reversal per entry.
                txn.rollback().await.map_err(db_err)?;
                let existing = self
                    .find_by_idempotency_key(tenant_id, &reversal_input.idempotency_key)
                    .await?
                    .ok_or_else(|| {
                        JournalError::Database(
                            "reversal conflict raised but no existing reversal found".to_string(),
                        )
                    })?;
                return Err(JournalError::AlreadyReversed {
                    original: journal_id,
                    reversed_by: JournalEntryId::from_uuid(existing.entry.id),
                });
            }
        };

        let mut active: journal_entries::ActiveModel = original.entry.into();
        active.reversed_by = Set(Some(reversal.entry.id));
        active.reversal_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await.map_err(db_err)?;

        insert_event_tx(
            &txn,
            &DomainEvent::JournalReversed {
                tenant_id,
                original_id: journal_id,
                reversal_id: JournalEntryId::from_uuid(reversal.entry.id),
                reason: reason.to_string(),
            },
        )
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::info!(
            tenant_id = %tenant_id,
            original_id = %journal_id,
            reversal_id = %reversal.entry.id,
            "journal entry reversed"
        );
        Ok(reversal)
    }

    /// Gets a journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist for the tenant.
    pub async fn get_journal(
        &self,
        tenant_id: TenantId,
        journal_id: JournalEntryId,
    ) -> Result<JournalWithLines, JournalError> {
        let entry = journal_entries::Entity::find_by_id(journal_id.into_inner())
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(JournalError::NotFound(journal_id))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(JournalWithLines { entry, lines })
    }

    /// Lists journal entries with optional filters, paginated, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_journals(
        &self,
        tenant_id: TenantId,
        filter: JournalFilter,
        page: PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, JournalError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(status) = filter.status {
            let db_status: sea_orm_active_enums::JournalStatus = status.into();
            query = query.filter(journal_entries::Column::Status.eq(db_status));
        }
        if let Some(source_type) = filter.source_type {
            let db_source: sea_orm_active_enums::SourceType = source_type.into();
            query = query.filter(journal_entries::Column::SourceType.eq(db_source));
        }
        if let Some(source_id) = filter.source_id {
            query = query.filter(journal_entries::Column::SourceId.eq(source_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(date_to));
        }
        if let Some(account_id) = filter.account_id {
            query = query
                .join(
                    JoinType::InnerJoin,
                    journal_entries::Relation::JournalLines.def(),
                )
                .filter(journal_lines::Column::AccountId.eq(account_id))
                .distinct();
        }

        let paginator = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(models, page.page, page.per_page, total))
    }

    /// Finds an entry by its idempotency key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_idempotency_key(
        &self,
        tenant_id: TenantId,
        key: &str,
    ) -> Result<Option<JournalWithLines>, JournalError> {
        let entry = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::IdempotencyKey.eq(key))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(entry) = entry else {
            return Ok(None);
        };

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(JournalWithLines { entry, lines }))
    }

    /// Counts draft entries dated within a range (used by period close).
    pub(crate) async fn count_drafts_in_range(
        &self,
        tenant_id: TenantId,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<u64, DbErr> {
        journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Draft))
            .filter(journal_entries::Column::EntryDate.gte(start))
            .filter(journal_entries::Column::EntryDate.lte(end))
            .count(&self.db)
            .await
    }

    /// Validates a create request: line shape, account state, and period
    /// eligibility. Returns the resolved period (if any).
    pub(crate) async fn validate_create(
        &self,
        input: &CreateJournalInput,
        is_system_generated: bool,
    ) -> Result<Option<fiscal_periods::Model>, JournalError> {
        let ids: Vec<Uuid> = input
            .lines
            .iter()
            .map(|l| l.account_id.into_inner())
            .collect();

        let states = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(input.tenant_id.into_inner()))
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| (m.id, m.is_active))
            .collect::<std::collections::HashMap<Uuid, bool>>();

        let period = self
            .find_period_for_date(input.tenant_id, input.entry_date)
            .await?;

        JournalService::validate_create(
            input,
            |id| {
                states
                    .get(&id.into_inner())
                    .map(|&is_active| journal::AccountState { is_active })
            },
            period.as_ref().map(to_core_period).as_ref(),
            is_system_generated,
        )?;

        Ok(period)
    }

    /// Finds the fiscal period containing a date for a tenant.
    pub(crate) async fn find_period_for_date(
        &self,
        tenant_id: TenantId,
        date: chrono::NaiveDate,
    ) -> Result<Option<fiscal_periods::Model>, JournalError> {
        fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::StartDate.lte(date))
            .filter(fiscal_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Inserts a validated journal (header + lines + outbox row) within
    /// the caller's transaction.
    ///
    /// Returns `DuplicateKey` when the idempotency constraint fires; the
    /// caller decides whether that means "return the winner" (create) or
    /// "already reversed" (reversal).
    pub(crate) async fn insert_journal_tx(
        &self,
        txn: &DatabaseTransaction,
        input: &CreateJournalInput,
        fiscal_period_id: Option<Uuid>,
        reversal: Option<&ReversalLink>,
    ) -> Result<TxInsertOutcome, JournalError> {
        let year = input.entry_date.year();
        let sequence = allocate_entry_number(txn, input.tenant_id.into_inner(), year).await?;
        let entry_number = format_entry_number(year, sequence);

        let status = if input.post_immediately {
            sea_orm_active_enums::JournalStatus::Posted
        } else {
            sea_orm_active_enums::JournalStatus::Draft
        };

        let now = chrono::Utc::now().into();
        let entry_id = JournalEntryId::new().into_inner();

        let header = journal_entries::ActiveModel {
            id: Set(entry_id),
            tenant_id: Set(input.tenant_id.into_inner()),
            entry_number: Set(entry_number.clone()),
            entry_date: Set(input.entry_date),
            description: Set(input.description.clone()),
            source_type: Set(input.source_type.into()),
            source_id: Set(input.source_id.clone()),
            idempotency_key: Set(input.idempotency_key.clone()),
            status: Set(status),
            fiscal_period_id: Set(fiscal_period_id),
            reversal_of: Set(reversal.map(|r| r.original_id)),
            reversed_by: Set(None),
            reversal_reason: Set(reversal.map(|r| r.reason.clone())),
            void_reason: Set(None),
            source_payload: Set(input.source_payload.clone()),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let insert_result = journal_entries::Entity::insert(header)
            .on_conflict(
                OnConflict::columns([
                    journal_entries::Column::TenantId,
                    journal_entries::Column::IdempotencyKey,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(txn)
            .await;

        match insert_result {
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) => return Ok(TxInsertOutcome::DuplicateKey),
            Err(err) => return Err(db_err(err)),
        }

        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| JournalError::Database("inserted journal not found".to_string()))?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (idx, line) in input.lines.iter().enumerate() {
            let line_number = i32::try_from(idx + 1)
                .map_err(|_| JournalError::Database("line number overflow".to_string()))?;
            let model = journal_lines::ActiveModel {
                id: Set(JournalLineId::new().into_inner()),
                journal_entry_id: Set(entry_id),
                account_id: Set(line.account_id.into_inner()),
                line_number: Set(line_number),
                description: Set(line.description.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                department: Set(line.department.clone()),
                project: Set(line.project.clone()),
                created_at: Set(now),
            }
            .insert(txn)
            .await
            .map_err(db_err)?;
            lines.push(model);
        }

        if input.post_immediately {
            let total: Decimal = input.lines.iter().map(|l| l.debit).sum();
            insert_event_tx(
                txn,
                &DomainEvent::JournalPosted {
                    tenant_id: input.tenant_id,
                    journal_id: JournalEntryId::from_uuid(entry_id),
                    entry_number,
                    entry_date: input.entry_date,
                    source_type: input.source_type,
                    total_amount: total,
                },
            )
            .await
            .map_err(db_err)?;
        }

        Ok(TxInsertOutcome::Created(JournalWithLines { entry, lines }))
    }
}

/// Allocates the next sequential entry number for a tenant/year.
///
/// Concurrent allocations for the same tenant and year serialize through
/// `SELECT ... FOR UPDATE` on the counter row; losers of the first-row
/// insert race re-read under the lock.
async fn allocate_entry_number(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    year: i32,
) -> Result<i64, JournalError> {
    let existing = journal_sequences::Entity::find_by_id((tenant_id, year))
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?;

    if let Some(row) = existing {
        let next = row.last_value + 1;
        let mut active: journal_sequences::ActiveModel = row.into();
        active.last_value = Set(next);
        active.update(txn).await.map_err(db_err)?;
        return Ok(next);
    }

    let first = journal_sequences::ActiveModel {
        tenant_id: Set(tenant_id),
        year: Set(year),
        last_value: Set(1),
    };

    match journal_sequences::Entity::insert(first)
        .on_conflict(
            OnConflict::columns([
                journal_sequences::Column::TenantId,
                journal_sequences::Column::Year,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(txn)
        .await
    {
        Ok(_) => Ok(1),
        Err(DbErr::RecordNotInserted) => {
            let row = journal_sequences::Entity::find_by_id((tenant_id, year))
                .lock_exclusive()
                .one(txn)
                .await
                .map_err(db_err)?
                .ok_or_else(|| {
                    JournalError::Database("sequence row vanished after conflict".to_string())
                })?;
            let next = row.last_value + 1;
            let mut active: journal_sequences::ActiveModel = row.into();
            active.last_value = Set(next);
            active.update(txn).await.map_err(db_err)?;
            Ok(next)
        }
        Err(err) => Err(db_err(err)),
    }
}
