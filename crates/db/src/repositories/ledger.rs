//! Ledger repository: the read side.
//!
//! Computes balances, the trial balance, per-account activity, and report
//! inputs by aggregating over posted journal lines. This uncached
//! aggregate-over-lines path is the reference behavior; reads never block
//! writers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use ledgra_core::coa::NormalBalance;
use ledgra_core::ledger::{ActivityLine, LedgerRow, running_ledger, signed_balance};
use ledgra_core::reports::{
    AccountBalanceRow, BalanceSheetReport, CashActivityRow, CashFlowReport, IncomeStatementReport,
    ReportService, TrialBalanceReport,
};
use ledgra_shared::types::{AccountId, JournalEntryId, TenantId};

use crate::entities::{accounts, journal_entries, journal_lines, sea_orm_active_enums};

/// Errors that can occur during ledger reads.
#[derive(Debug, Error)]
pub enum LedgerReadError {
    /// Account not found by code.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Ledger repository for read-only balance and report queries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes an account's signed balance as of a date.
    ///
    /// Sums posted debits/credits up to and including `as_of`, oriented to
    /// the account's normal balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for unknown codes.
    pub async fn account_balance(
        &self,
        tenant_id: TenantId,
        account_code: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerReadError> {
        let account = self.account_by_code(tenant_id, account_code).await?;
        let (debit, credit) = self
            .account_totals(tenant_id, account.id, None, Some(as_of))
            .await?;
        Ok(signed_balance(account.normal_balance.into(), debit, credit))
    }

    /// Generates the trial balance as of a date.
    ///
    /// The report's `is_balanced` flag is the queryable correctness
    /// signal: it must hold for any consistent data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn trial_balance(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, LedgerReadError> {
        let rows = self.balance_rows(tenant_id, None, Some(as_of)).await?;
        Ok(ReportService::trial_balance(rows, as_of))
    }

    /// Chronological line-level activity for an account with running
    /// balance, for audit drill-down.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for unknown codes.
    pub async fn account_ledger(
        &self,
        tenant_id: TenantId,
        account_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerRow>, LedgerReadError> {
        let account = self.account_by_code(tenant_id, account_code).await?;
        let normal: NormalBalance = account.normal_balance.into();

        let opening = match start.pred_opt() {
            Some(day_before) => {
                let (debit, credit) = self
                    .account_totals(tenant_id, account.id, None, Some(day_before))
                    .await?;
                signed_balance(normal, debit, credit)
            }
            None => Decimal::ZERO,
        };

        let rows = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_lines::Column::AccountId.eq(account.id))
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted))
            .filter(journal_entries::Column::EntryDate.gte(start))
            .filter(journal_entries::Column::EntryDate.lte(end))
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::EntryNumber)
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await?;

        let activity = rows
            .into_iter()
            .filter_map(|(line, entry)| {
                let entry = entry?;
                Some(ActivityLine {
                    entry_id: JournalEntryId::from_uuid(entry.id),
                    entry_number: entry.entry_number,
                    entry_date: entry.entry_date,
                    description: line.description.or(Some(entry.description)),
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect();

        Ok(running_ledger(opening, normal, activity))
    }

    /// Generates the income statement over a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn income_statement(
        &self,
        tenant_id: TenantId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IncomeStatementReport, LedgerReadError> {
        let rows = self.balance_rows(tenant_id, Some(start), Some(end)).await?;
        Ok(ReportService::income_statement(rows, start, end))
    }

    /// Generates the balance sheet as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_sheet(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, LedgerReadError> {
        let rows = self.balance_rows(tenant_id, None, Some(as_of)).await?;
        Ok(ReportService::balance_sheet(rows, as_of))
    }

    /// Generates a cash flow summary over a date range.
    ///
    /// `cash_account_codes` names the tenant's cash/bank accounts (the
    /// same set the auto-posting resolver maps payment methods onto).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn cash_flow(
        &self,
        tenant_id: TenantId,
        cash_account_codes: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CashFlowReport, LedgerReadError> {
        let cash_accounts = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Code.is_in(cash_account_codes.iter().cloned()))
            .all(&self.db)
            .await?;
        let cash_ids: Vec<Uuid> = cash_accounts.iter().map(|a| a.id).collect();

        let mut opening = Decimal::ZERO;
        if let Some(day_before) = start.pred_opt() {
            for id in &cash_ids {
                let (debit, credit) = self
                    .account_totals(tenant_id, *id, None, Some(day_before))
                    .await?;
                opening += signed_balance(NormalBalance::Debit, debit, credit);
            }
        }

        let rows = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_lines::Column::AccountId.is_in(cash_ids))
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted))
            .filter(journal_entries::Column::EntryDate.gte(start))
            .filter(journal_entries::Column::EntryDate.lte(end))
            .all(&self.db)
            .await?;

        let mut by_source: HashMap<sea_orm_active_enums::SourceType, (Decimal, Decimal)> =
            HashMap::new();
        for (line, entry) in rows {
            let Some(entry) = entry else { continue };
            let sums = by_source.entry(entry.source_type).or_default();
            sums.0 += line.debit;
            sums.1 += line.credit;
        }

        let movements = by_source
            .into_iter()
            .map(|(source_type, (debit, credit))| CashActivityRow {
                source_type: source_type.into(),
                total_debit: debit,
                total_credit: credit,
            })
            .collect();

        Ok(ReportService::cash_flow(movements, opening, start, end))
    }

    /// Loads per-account balance rows over an optional date window.
    async fn balance_rows(
        &self,
        tenant_id: TenantId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<AccountBalanceRow>, LedgerReadError> {
        let account_models = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let mut query = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted));
        if let Some(start) = start {
            query = query.filter(journal_entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let mut totals: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
        for (line, _) in query.all(&self.db).await? {
            let sums = totals.entry(line.account_id).or_default();
            sums.0 += line.debit;
            sums.1 += line.credit;
        }

        let rows = account_models
            .into_iter()
            .map(|account| {
                let (debit, credit) = totals.get(&account.id).copied().unwrap_or_default();
                AccountBalanceRow::from_totals(
                    AccountId::from_uuid(account.id),
                    account.code,
                    account.name,
                    account.account_type.into(),
                    debit,
                    credit,
                )
            })
            .collect();

        Ok(rows)
    }

    /// Sums posted debit/credit for one account over an optional window.
    async fn account_totals(
        &self,
        tenant_id: TenantId,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(Decimal, Decimal), LedgerReadError> {
        let mut query = journal_lines::Entity::find()
            .find_also_related(journal_entries::Entity)
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted));
        if let Some(start) = start {
            query = query.filter(journal_entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for (line, _) in query.all(&self.db).await? {
            debit += line.debit;
            credit += line.credit;
        }
        Ok((debit, credit))
    }

    async fn account_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<accounts::Model, LedgerReadError> {
        accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerReadError::AccountNotFound(code.to_string()))
    }
}
