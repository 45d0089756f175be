//! Initial database migration.
//!
//! Creates all kernel enums, tables, constraints, and indexes. Every
//! tenant-scoped table carries `tenant_id` in its unique keys so no query
//! can cross tenants by accident.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: FISCAL PERIODS
        // ============================================================
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;

        // ============================================================
        // PART 4: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_SEQUENCES_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 5: SUBLEDGER
        // ============================================================
        db.execute_unprepared(OPEN_ITEMS_SQL).await?;
        db.execute_unprepared(PAYMENT_APPLICATIONS_SQL).await?;

        // ============================================================
        // PART 6: OUTBOX
        // ============================================================
        db.execute_unprepared(OUTBOX_EVENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account classification
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense'
);

-- Normal balance side
CREATE TYPE normal_balance AS ENUM ('debit', 'credit');

-- Journal entry status
CREATE TYPE journal_status AS ENUM ('draft', 'posted', 'void');

-- Business origin of a journal entry
CREATE TYPE source_type AS ENUM (
    'sale',
    'purchase',
    'invoice',
    'bill',
    'payment',
    'expense',
    'manual',
    'closing',
    'adjustment',
    'reversal'
);

-- Fiscal period status
CREATE TYPE period_status AS ENUM ('open', 'closed', 'locked');

-- Open item kind and status
CREATE TYPE open_item_kind AS ENUM ('receivable', 'payable');
CREATE TYPE open_item_status AS ENUM ('open', 'partial', 'paid', 'void');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    code VARCHAR(32) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    normal_balance normal_balance NOT NULL,
    parent_id UUID REFERENCES accounts(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_system BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_accounts_tenant_code UNIQUE (tenant_id, code)
);

CREATE INDEX idx_accounts_tenant ON accounts(tenant_id);
CREATE INDEX idx_accounts_parent ON accounts(parent_id) WHERE parent_id IS NOT NULL;
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    name VARCHAR(100) NOT NULL,
    period_number INTEGER NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status period_status NOT NULL DEFAULT 'open',
    closed_by UUID,
    closed_at TIMESTAMPTZ,
    locked_by UUID,
    locked_at TIMESTAMPTZ,
    unlock_reason TEXT,
    closing_entry_id UUID,
    balance_snapshot JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_fiscal_periods_tenant_number UNIQUE (tenant_id, period_number),
    CONSTRAINT ck_fiscal_periods_date_range CHECK (start_date <= end_date)
);

CREATE INDEX idx_fiscal_periods_tenant_dates ON fiscal_periods(tenant_id, start_date, end_date);
";

const JOURNAL_SEQUENCES_SQL: &str = r"
CREATE TABLE journal_sequences (
    tenant_id UUID NOT NULL,
    year INTEGER NOT NULL,
    last_value BIGINT NOT NULL DEFAULT 0,

    PRIMARY KEY (tenant_id, year)
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    entry_number VARCHAR(32) NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    source_type source_type NOT NULL,
    source_id VARCHAR(255),
    idempotency_key VARCHAR(255) NOT NULL,
    status journal_status NOT NULL DEFAULT 'draft',
    fiscal_period_id UUID REFERENCES fiscal_periods(id),
    reversal_of UUID REFERENCES journal_entries(id),
    reversed_by UUID REFERENCES journal_entries(id),
    reversal_reason TEXT,
    void_reason TEXT,
    source_payload JSONB,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Exactly-once effects under at-least-once delivery
    CONSTRAINT uq_journal_entries_idempotency UNIQUE (tenant_id, idempotency_key),
    -- One reversal per entry
    CONSTRAINT uq_journal_entries_reversal_of UNIQUE (reversal_of),
    CONSTRAINT uq_journal_entries_tenant_number UNIQUE (tenant_id, entry_number),
    -- Reversal linkage always carries a reason
    CONSTRAINT ck_journal_entries_reversal_reason
        CHECK (reversal_of IS NULL OR reversal_reason IS NOT NULL)
);

CREATE INDEX idx_journal_entries_tenant_date ON journal_entries(tenant_id, entry_date);
CREATE INDEX idx_journal_entries_tenant_status ON journal_entries(tenant_id, status);
CREATE INDEX idx_journal_entries_tenant_source ON journal_entries(tenant_id, source_type, source_id);
CREATE INDEX idx_journal_entries_period ON journal_entries(fiscal_period_id)
    WHERE fiscal_period_id IS NOT NULL;
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    line_number INTEGER NOT NULL,
    description TEXT,
    debit DECIMAL(20,6) NOT NULL DEFAULT 0,
    credit DECIMAL(20,6) NOT NULL DEFAULT 0,
    department VARCHAR(100),
    project VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_journal_lines_entry_number UNIQUE (journal_entry_id, line_number),
    -- Exactly one side per line, both non-negative
    CONSTRAINT ck_journal_lines_one_side
        CHECK ((debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0))
);

CREATE INDEX idx_journal_lines_account ON journal_lines(account_id);
CREATE INDEX idx_journal_lines_entry ON journal_lines(journal_entry_id);
";

const OPEN_ITEMS_SQL: &str = r"
CREATE TABLE open_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    kind open_item_kind NOT NULL,
    counterparty_id UUID NOT NULL,
    source_type source_type NOT NULL,
    source_id VARCHAR(255) NOT NULL,
    original_amount DECIMAL(20,6) NOT NULL,
    remaining_amount DECIMAL(20,6) NOT NULL,
    issue_date DATE NOT NULL,
    due_date DATE NOT NULL,
    status open_item_status NOT NULL DEFAULT 'open',
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_open_items_tenant_source UNIQUE (tenant_id, kind, source_id),
    CONSTRAINT ck_open_items_amounts
        CHECK (original_amount > 0 AND remaining_amount >= 0 AND remaining_amount <= original_amount)
);

CREATE INDEX idx_open_items_tenant_status ON open_items(tenant_id, kind, status);
CREATE INDEX idx_open_items_counterparty ON open_items(tenant_id, counterparty_id);
";

const PAYMENT_APPLICATIONS_SQL: &str = r"
CREATE TABLE payment_applications (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    open_item_id UUID NOT NULL REFERENCES open_items(id),
    amount DECIMAL(20,6) NOT NULL,
    payment_ref VARCHAR(255),
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id),
    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT ck_payment_applications_amount CHECK (amount > 0)
);

CREATE INDEX idx_payment_applications_item ON payment_applications(open_item_id);
";

const OUTBOX_EVENTS_SQL: &str = r"
CREATE TABLE outbox_events (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    event_type VARCHAR(100) NOT NULL,
    payload JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    published_at TIMESTAMPTZ
);

CREATE INDEX idx_outbox_events_pending ON outbox_events(created_at)
    WHERE published_at IS NULL;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS outbox_events;
DROP TABLE IF EXISTS payment_applications;
DROP TABLE IF EXISTS open_items;
DROP TABLE IF EXISTS journal_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS journal_sequences;
DROP TABLE IF EXISTS fiscal_periods;
DROP TABLE IF EXISTS accounts;

DROP TYPE IF EXISTS open_item_status;
DROP TYPE IF EXISTS open_item_kind;
DROP TYPE IF EXISTS period_status;
DROP TYPE IF EXISTS source_type;
DROP TYPE IF EXISTS journal_status;
DROP TYPE IF EXISTS normal_balance;
DROP TYPE IF EXISTS account_type;
";
