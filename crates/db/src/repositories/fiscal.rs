//! Fiscal period repository.
//!
//! Owns the period lifecycle: creation (non-overlapping), sequenced close
//! with closing-entry generation and balance snapshot, lock, audited
//! unlock, and reopen.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use ledgra_core::fiscal::{
    self, AccountPeriodBalance, FiscalError, snapshot_from_balances,
};
use ledgra_core::outbox::DomainEvent;
use ledgra_shared::types::{AccountId, ActorId, FiscalPeriodId, TenantId};

use crate::entities::{accounts, fiscal_periods, journal_entries, journal_lines, sea_orm_active_enums};
use crate::repositories::journal::{JournalRepository, TxInsertOutcome};
use crate::repositories::outbox::insert_event_tx;

/// Input for creating a fiscal period.
#[derive(Debug, Clone)]
pub struct CreatePeriodInput {
    /// Tenant the period belongs to.
    pub tenant_id: TenantId,
    /// Period name (e.g., "March 2026").
    pub name: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date.
    pub end_date: NaiveDate,
}

/// Options for closing a period.
#[derive(Debug, Clone)]
pub struct ClosePeriodOptions {
    /// Generate the income/expense → retained earnings closing entry.
    pub generate_closing_entries: bool,
    /// Retained earnings account code; required when generating.
    pub retained_earnings_code: Option<String>,
    /// Tenant policy: fail the close while draft journals remain in range.
    pub block_close_on_drafts: bool,
}

fn db_err(err: DbErr) -> FiscalError {
    FiscalError::Database(err.to_string())
}

/// Validates that start_date is strictly before end_date.
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), FiscalError> {
    if start_date >= end_date {
        return Err(FiscalError::InvalidDateRange);
    }
    Ok(())
}

/// Checks if two date ranges overlap.
///
/// Two ranges [a_start, a_end] and [b_start, b_end] overlap if:
/// a_start <= b_end AND a_end >= b_start
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Name, start, and end of each monthly period in a calendar year.
fn monthly_period_specs(year: i32) -> Vec<(String, NaiveDate, NaiveDate)> {
    (1..=12u32)
        .map(|month| {
            let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let end = last_day_of_month(year, month);
            (format!("{} {year}", month_name(month)), start, end)
        })
        .collect()
}

/// Returns the last day of a month.
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month
        .unwrap()
        .pred_opt()
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
}

/// Returns the month name.
fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Fiscal period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
    journals: JournalRepository,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let journals = JournalRepository::new(db.clone());
        Self { db, journals }
    }

    /// Creates a fiscal period. Periods for a tenant never overlap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or `OverlappingPeriod`.
    pub async fn create_period(
        &self,
        input: CreatePeriodInput,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        validate_date_range(input.start_date, input.end_date)?;

        let overlapping = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(input.tenant_id.into_inner()))
            .filter(fiscal_periods::Column::StartDate.lte(input.end_date))
            .filter(fiscal_periods::Column::EndDate.gte(input.start_date))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(existing) = overlapping {
            return Err(FiscalError::OverlappingPeriod(existing.name));
        }

        let next_number = self.next_period_number(input.tenant_id).await?;
        let now = chrono::Utc::now().into();

        let period = fiscal_periods::ActiveModel {
            id: Set(FiscalPeriodId::new().into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            name: Set(input.name),
            period_number: Set(next_number),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(sea_orm_active_enums::PeriodStatus::Open),
            closed_by: Set(None),
            closed_at: Set(None),
            locked_by: Set(None),
            locked_at: Set(None),
            unlock_reason: Set(None),
            closing_entry_id: Set(None),
            balance_snapshot: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        period.insert(&self.db).await.map_err(db_err)
    }

    /// Creates twelve monthly periods for a calendar year.
    ///
    /// # Errors
    ///
    /// Returns `OverlappingPeriod` if any existing period intersects the
    /// year.
    pub async fn create_monthly_periods(
        &self,
        tenant_id: TenantId,
        year: i32,
    ) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();

        let overlapping = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::StartDate.lte(year_end))
            .filter(fiscal_periods::Column::EndDate.gte(year_start))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(existing) = overlapping {
            return Err(FiscalError::OverlappingPeriod(existing.name));
        }

        let mut next_number = self.next_period_number(tenant_id).await?;
        let now = chrono::Utc::now().into();
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut created = Vec::with_capacity(12);
        for (name, start_date, end_date) in monthly_period_specs(year) {
            let period = fiscal_periods::ActiveModel {
                id: Set(FiscalPeriodId::new().into_inner()),
                tenant_id: Set(tenant_id.into_inner()),
                name: Set(name),
                period_number: Set(next_number),
                start_date: Set(start_date),
                end_date: Set(end_date),
                status: Set(sea_orm_active_enums::PeriodStatus::Open),
                closed_by: Set(None),
                closed_at: Set(None),
                locked_by: Set(None),
                locked_at: Set(None),
                unlock_reason: Set(None),
                closing_entry_id: Set(None),
                balance_snapshot: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            created.push(period.insert(&txn).await.map_err(db_err)?);
            next_number += 1;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(created)
    }

    /// Lists a tenant's periods in sequence order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_asc(fiscal_periods::Column::PeriodNumber)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds a period by ID within a tenant.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound`.
    pub async fn get_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        fiscal_periods::Entity::find_by_id(period_id.into_inner())
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FiscalError::PeriodNotFound(period_id))
    }

    /// Finds a period by name within a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_by_name(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<Option<fiscal_periods::Model>, FiscalError> {
        fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Closes a period.
    ///
    /// Requires the immediately preceding period (if any) to already be
    /// closed; periods close strictly in sequence. Optionally posts the
    /// closing entry transferring net income/expense to retained
    /// earnings, captures the full balance snapshot, and transitions the
    /// status, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `PrecedingPeriodOpen`, `DraftJournalsExist` (per policy),
    /// `RetainedEarningsNotFound`, or a transition error.
    pub async fn close_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
        actor: ActorId,
        options: ClosePeriodOptions,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let period = self.get_period(tenant_id, period_id).await?;
        let core_period = super::journal::to_core_period(&period);

        fiscal::validate_transition(
            period.status.into(),
            ledgra_core::fiscal::PeriodStatus::Closed,
            None,
        )?;

        // Periods close strictly in sequence.
        let preceding = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::PeriodNumber.lt(period.period_number))
            .order_by_desc(fiscal_periods::Column::PeriodNumber)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        fiscal::validate_close_sequence(
            preceding.as_ref().map(super::journal::to_core_period).as_ref(),
        )?;

        let draft_count = self
            .journals
            .count_drafts_in_range(tenant_id, period.start_date, period.end_date)
            .await
            .map_err(db_err)?;
        fiscal::check_draft_policy(&core_period, draft_count, options.block_close_on_drafts)?;

        // Closing entry from the period's income/expense activity.
        let closing_input = if options.generate_closing_entries {
            let code = options
                .retained_earnings_code
                .as_deref()
                .ok_or_else(|| {
                    FiscalError::RetainedEarningsNotFound("(not configured)".to_string())
                })?;
            let retained_earnings = accounts::Entity::find()
                .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
                .filter(accounts::Column::Code.eq(code))
                .one(&self.db)
                .await
                .map_err(db_err)?
                .ok_or_else(|| FiscalError::RetainedEarningsNotFound(code.to_string()))?;

            let period_balances = account_period_balances(
                &self.db,
                tenant_id,
                Some(period.start_date),
                period.end_date,
            )
            .await
            .map_err(db_err)?;

            // Close generation: a retried close reuses its key, a re-close
            // after reopen gets a fresh one and posts only the residual.
            let close_sequence = journal_entries::Entity::find()
                .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
                .filter(
                    journal_entries::Column::SourceType
                        .eq(sea_orm_active_enums::SourceType::Closing),
                )
                .filter(journal_entries::Column::SourceId.eq(period.id.to_string()))
                .count(&self.db)
                .await
                .map_err(db_err)?;

            fiscal::compute_closing_entry(
                tenant_id,
                &core_period,
                &period_balances,
                AccountId::from_uuid(retained_earnings.id),
                actor,
                close_sequence,
            )
        } else {
            None
        };

        let txn = self.db.begin().await.map_err(db_err)?;

        let closing_entry_id = match closing_input {
            Some(input) => {
                match self
                    .journals
                    .insert_journal_tx(&txn, &input, Some(period.id), None)
                    .await
                    .map_err(|e| FiscalError::Database(e.to_string()))?
                {
                    TxInsertOutcome::Created(journal) => Some(journal.entry.id),
                    TxInsertOutcome::DuplicateKey => {
                        // Close retried after a partial failure; reuse the
                        // previously posted closing entry.
                        journal_entries::Entity::find()
                            .filter(
                                journal_entries::Column::TenantId.eq(tenant_id.into_inner()),
                            )
                            .filter(
                                journal_entries::Column::IdempotencyKey
                                    .eq(input.idempotency_key.clone()),
                            )
                            .one(&txn)
                            .await
                            .map_err(db_err)?
                            .map(|e| e.id)
                    }
                }
            }
            None => None,
        };

        // Point-in-time snapshot, inclusive of the closing entry.
        let snapshot_balances =
            account_period_balances(&txn, tenant_id, None, period.end_date)
                .await
                .map_err(db_err)?;
        let snapshot = snapshot_from_balances(&snapshot_balances, period.end_date);
        let snapshot_json = serde_json::to_value(&snapshot)
            .map_err(|e| FiscalError::Database(format!("snapshot serialization failed: {e}")))?;

        let now = chrono::Utc::now().into();
        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(sea_orm_active_enums::PeriodStatus::Closed);
        active.closed_by = Set(Some(actor.into_inner()));
        active.closed_at = Set(Some(now));
        active.closing_entry_id = Set(closing_entry_id);
        active.balance_snapshot = Set(Some(snapshot_json));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await.map_err(db_err)?;

        insert_event_tx(
            &txn,
            &DomainEvent::PeriodClosed {
                tenant_id,
                period_id,
                name: updated.name.clone(),
                closing_entry_id: closing_entry_id
                    .map(ledgra_shared::types::JournalEntryId::from_uuid),
            },
        )
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::info!(
            tenant_id = %tenant_id,
            period_id = %period_id,
            drafts = draft_count,
            "fiscal period closed"
        );
        Ok(updated)
    }

    /// Locks a closed period. Locked periods reject all postings and all
    /// reversals targeting them.
    ///
    /// # Errors
    ///
    /// Returns a transition error unless the period is closed.
    pub async fn lock_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
        actor: ActorId,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let period = self.get_period(tenant_id, period_id).await?;
        fiscal::validate_transition(
            period.status.into(),
            ledgra_core::fiscal::PeriodStatus::Locked,
            None,
        )?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = chrono::Utc::now().into();
        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(sea_orm_active_enums::PeriodStatus::Locked);
        active.locked_by = Set(Some(actor.into_inner()));
        active.locked_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await.map_err(db_err)?;

        insert_event_tx(
            &txn,
            &DomainEvent::PeriodLocked {
                tenant_id,
                period_id,
                name: updated.name.clone(),
            },
        )
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    /// Unlocks a locked period back to closed. Privileged and audited:
    /// the mandatory reason lands on the period row and in the outbox.
    ///
    /// # Errors
    ///
    /// Returns `MissingReason` or a transition error.
    pub async fn unlock_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
        _actor: ActorId,
        reason: &str,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let period = self.get_period(tenant_id, period_id).await?;
        fiscal::validate_transition(
            period.status.into(),
            ledgra_core::fiscal::PeriodStatus::Closed,
            Some(reason),
        )?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = chrono::Utc::now().into();
        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(sea_orm_active_enums::PeriodStatus::Closed);
        active.unlock_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await.map_err(db_err)?;

        insert_event_tx(
            &txn,
            &DomainEvent::PeriodUnlocked {
                tenant_id,
                period_id,
                name: updated.name.clone(),
                reason: reason.to_string(),
            },
        )
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::warn!(
            tenant_id = %tenant_id,
            period_id = %period_id,
            reason = %reason,
            "locked fiscal period unlocked"
        );
        Ok(updated)
    }

    /// Reopens a closed period. Rejected while any later period is
    /// closed or locked.
    ///
    /// # Errors
    ///
    /// Returns `LaterPeriodClosed` or a transition error.
    pub async fn reopen_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
        _actor: ActorId,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let period = self.get_period(tenant_id, period_id).await?;
        fiscal::validate_transition(
            period.status.into(),
            ledgra_core::fiscal::PeriodStatus::Open,
            None,
        )?;

        let later = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::PeriodNumber.gt(period.period_number))
            .order_by_asc(fiscal_periods::Column::PeriodNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let later_core: Vec<_> = later.iter().map(super::journal::to_core_period).collect();
        fiscal::validate_reopen(&later_core)?;

        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(sea_orm_active_enums::PeriodStatus::Open);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(db_err)
    }

    /// Evaluates the posting permission matrix for a date: boolean plus
    /// the named reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn can_post_to_date(
        &self,
        tenant_id: TenantId,
        date: NaiveDate,
        is_system_generated: bool,
    ) -> Result<fiscal::PostingDecision, FiscalError> {
        let period = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(fiscal_periods::Column::StartDate.lte(date))
            .filter(fiscal_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(fiscal::can_post_to_date(
            period.as_ref().map(super::journal::to_core_period).as_ref(),
            is_system_generated,
        ))
    }

    async fn next_period_number(&self, tenant_id: TenantId) -> Result<i32, FiscalError> {
        let latest = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_desc(fiscal_periods::Column::PeriodNumber)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(latest.map_or(1, |p| p.period_number + 1))
    }
}

/// Aggregates posted debit/credit per account over a window.
async fn account_period_balances<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    start: Option<NaiveDate>,
    end: NaiveDate,
) -> Result<Vec<AccountPeriodBalance>, DbErr> {
    let account_models = accounts::Entity::find()
        .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
        .order_by_asc(accounts::Column::Code)
        .all(conn)
        .await?;

    let mut query = journal_lines::Entity::find()
        .find_also_related(journal_entries::Entity)
        .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
        .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted))
        .filter(journal_entries::Column::EntryDate.lte(end));
    if let Some(start) = start {
        query = query.filter(journal_entries::Column::EntryDate.gte(start));
    }

    let mut totals: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
    for (line, _) in query.all(conn).await? {
        let sums = totals.entry(line.account_id).or_default();
        sums.0 += line.debit;
        sums.1 += line.credit;
    }

    Ok(account_models
        .into_iter()
        .filter_map(|account| {
            let (debit, credit) = totals.get(&account.id).copied()?;
            Some(AccountPeriodBalance {
                account_id: AccountId::from_uuid(account.id),
                code: account.code,
                name: account.name,
                account_type: account.account_type.into(),
                total_debit: debit,
                total_credit: credit,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_period_specs_full_year() {
        let specs = monthly_period_specs(2026);
        assert_eq!(specs.len(), 12);
        assert_eq!(specs[0].0, "January 2026");
        assert_eq!(specs[0].1, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(specs[0].2, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(specs[11].0, "December 2026");
        assert_eq!(specs[11].2, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_monthly_periods_are_contiguous() {
        let specs = monthly_period_specs(2026);
        for window in specs.windows(2) {
            let prev_end = window[0].2;
            let next_start = window[1].1;
            assert_eq!(prev_end.succ_opt().unwrap(), next_start);
        }
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2026, 2),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        ); // Leap year
        assert_eq!(
            last_day_of_month(2026, 12),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_validate_date_range() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(matches!(
            validate_date_range(end, start),
            Err(FiscalError::InvalidDateRange)
        ));
        assert!(matches!(
            validate_date_range(start, start),
            Err(FiscalError::InvalidDateRange)
        ));
    }

    #[test]
    fn test_date_ranges_overlap() {
        let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let feb1 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let feb28 = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        let jan15 = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        assert!(date_ranges_overlap(jan1, jan31, jan15, feb28));
        assert!(!date_ranges_overlap(jan1, jan31, feb1, feb28));
        // Symmetric
        assert_eq!(
            date_ranges_overlap(jan1, jan31, jan15, feb28),
            date_ranges_overlap(jan15, feb28, jan1, jan31)
        );
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = NaiveDate> {
            (2020i32..=2030, 1u32..=12, 1u32..=28)
                .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            /// Overlap detection is symmetric.
            #[test]
            fn prop_overlap_is_symmetric(
                a_start in date_strategy(),
                a_len in 1i64..=365,
                b_start in date_strategy(),
                b_len in 1i64..=365,
            ) {
                let a_end = a_start + chrono::Duration::days(a_len);
                let b_end = b_start + chrono::Duration::days(b_len);
                prop_assert_eq!(
                    date_ranges_overlap(a_start, a_end, b_start, b_end),
                    date_ranges_overlap(b_start, b_end, a_start, a_end)
                );
            }

            /// Adjacent ranges do not overlap.
            #[test]
            fn prop_adjacent_ranges_do_not_overlap(
                start in date_strategy(),
                len in 1i64..=365,
                next_len in 1i64..=365,
            ) {
                let end = start + chrono::Duration::days(len);
                let next_start = end + chrono::Duration::days(1);
                let next_end = next_start + chrono::Duration::days(next_len);
                prop_assert!(!date_ranges_overlap(start, end, next_start, next_end));
            }

            /// A range always overlaps itself.
            #[test]
            fn prop_range_overlaps_itself(start in date_strategy(), len in 0i64..=365) {
                let end = start + chrono::Duration::days(len);
                prop_assert!(date_ranges_overlap(start, end, start, end));
            }
        }
    }
}
