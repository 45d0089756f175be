//! Integration tests for the journal write path: idempotent creation,
//! reversal, and the trial balance invariant.
//!
//! These tests run against a real Postgres instance and are skipped when
//! `DATABASE_URL` is not set.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ledgra_core::coa::{AccountType, CreateAccountInput};
use ledgra_core::journal::{CreateJournalInput, JournalError, LineInput, SourceType};
use ledgra_db::migration::Migrator;
use ledgra_db::repositories::{AccountRepository, JournalRepository, LedgerRepository};
use ledgra_shared::types::{AccountId, ActorId, TenantId};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

async fn connect_or_skip() -> Option<DatabaseConnection> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    };
    let db = ledgra_db::connect(&url).await.expect("failed to connect");
    Migrator::up(&db, None).await.expect("migrations failed");
    Some(db)
}

struct Fixture {
    tenant: TenantId,
    actor: ActorId,
    cash: AccountId,
    sales: AccountId,
}

async fn setup_accounts(db: &DatabaseConnection) -> Fixture {
    let tenant = TenantId::new();
    let actor = ActorId::new();
    let accounts = AccountRepository::new(db.clone());

    let cash = accounts
        .create_account(CreateAccountInput {
            tenant_id: tenant,
            code: "1000".to_string(),
            name: "Cash".to_string(),
            account_type: AccountType::Asset,
            parent_id: None,
            is_system: false,
        })
        .await
        .expect("create cash account");

    let sales = accounts
        .create_account(CreateAccountInput {
            tenant_id: tenant,
            code: "4000".to_string(),
            name: "Sales".to_string(),
            account_type: AccountType::Income,
            parent_id: None,
            is_system: false,
        })
        .await
        .expect("create sales account");

    Fixture {
        tenant,
        actor,
        cash: AccountId::from_uuid(cash.id),
        sales: AccountId::from_uuid(sales.id),
    }
}

fn cash_sale_input(fixture: &Fixture, key: &str) -> CreateJournalInput {
    CreateJournalInput {
        tenant_id: fixture.tenant,
        entry_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        description: "Cash sale".to_string(),
        source_type: SourceType::Sale,
        source_id: Some("S-1".to_string()),
        idempotency_key: key.to_string(),
        lines: vec![
            LineInput::debit(fixture.cash, dec!(100000)),
            LineInput::credit(fixture.sales, dec!(100000)),
        ],
        created_by: fixture.actor,
        post_immediately: true,
        source_payload: None,
    }
}

// ============================================================================
// Scenario from the brief: post, replay, reverse
// ============================================================================
#[tokio::test]
async fn test_post_replay_reverse_scenario() {
    let Some(db) = connect_or_skip().await else {
        return;
    };
    let fixture = setup_accounts(&db).await;
    let journals = JournalRepository::new(db.clone());
    let ledger = LedgerRepository::new(db.clone());
    let as_of = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

    // First delivery posts.
    let created = journals
        .create_journal(cash_sale_input(&fixture, "T1"), false)
        .await
        .expect("create journal");
    assert!(!created.is_duplicate);
    assert_eq!(created.journal.lines.len(), 2);

    // Trial balance: Cash +100,000, Sales +100,000 (credit-normal), balanced.
    let trial = ledger.trial_balance(fixture.tenant, as_of).await.unwrap();
    assert!(trial.totals.is_balanced);
    let cash_row = trial.accounts.iter().find(|a| a.code == "1000").unwrap();
    let sales_row = trial.accounts.iter().find(|a| a.code == "4000").unwrap();
    assert_eq!(cash_row.balance, dec!(100000));
    assert_eq!(sales_row.balance, dec!(100000));

    // Identical replay returns the same journal, no new row.
    let replay = journals
        .create_journal(cash_sale_input(&fixture, "T1"), false)
        .await
        .expect("replay journal");
    assert!(replay.is_duplicate);
    assert_eq!(replay.journal.entry.id, created.journal.entry.id);

    // Reversal swaps the lines and cancels the balances.
    let reversal = journals
        .reverse_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(created.journal.entry.id),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            "customer return",
            fixture.actor,
        )
        .await
        .expect("reverse journal");
    assert_eq!(reversal.lines[0].credit, dec!(100000));
    assert_eq!(reversal.lines[1].debit, dec!(100000));

    let cash_balance = ledger
        .account_balance(fixture.tenant, "1000", as_of)
        .await
        .unwrap();
    let sales_balance = ledger
        .account_balance(fixture.tenant, "4000", as_of)
        .await
        .unwrap();
    assert_eq!(cash_balance, dec!(0));
    assert_eq!(sales_balance, dec!(0));

    let trial = ledger.trial_balance(fixture.tenant, as_of).await.unwrap();
    assert!(trial.totals.is_balanced);

    // Second reversal is rejected: one reversal per entry.
    let again = journals
        .reverse_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(created.journal.entry.id),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
            "again",
            fixture.actor,
        )
        .await;
    assert!(matches!(again, Err(JournalError::AlreadyReversed { .. })));
}

// ============================================================================
// Concurrent duplicate deliveries yield exactly one persisted journal
// ============================================================================
#[tokio::test]
async fn test_concurrent_idempotent_create() {
    let Some(db) = connect_or_skip().await else {
        return;
    };
    let fixture = setup_accounts(&db).await;
    let journals = JournalRepository::new(db.clone());

    let a = journals.create_journal(cash_sale_input(&fixture, "RACE-1"), false);
    let b = journals.create_journal(cash_sale_input(&fixture, "RACE-1"), false);
    let (a, b) = futures::join!(a, b);
    let a = a.expect("first create");
    let b = b.expect("second create");

    assert_eq!(a.journal.entry.id, b.journal.entry.id);
    assert!(a.is_duplicate || b.is_duplicate);
    assert!(!(a.is_duplicate && b.is_duplicate));
}

// ============================================================================
// Draft lifecycle: void allowed, posting drafts later
// ============================================================================
#[tokio::test]
async fn test_draft_void_and_post() {
    let Some(db) = connect_or_skip().await else {
        return;
    };
    let fixture = setup_accounts(&db).await;
    let journals = JournalRepository::new(db.clone());

    let mut input = cash_sale_input(&fixture, "DRAFT-1");
    input.post_immediately = false;
    let draft = journals.create_journal(input, false).await.unwrap();

    let voided = journals
        .void_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(draft.journal.entry.id),
            "keyed in error",
            fixture.actor,
        )
        .await
        .expect("void draft");
    assert_eq!(voided.entry.void_reason.as_deref(), Some("keyed in error"));

    // A second draft can be posted later, and then no longer voided.
    let mut input = cash_sale_input(&fixture, "DRAFT-2");
    input.post_immediately = false;
    let draft = journals.create_journal(input, false).await.unwrap();

    let posted = journals
        .post_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(draft.journal.entry.id),
            fixture.actor,
        )
        .await
        .expect("post draft");
    assert_eq!(
        posted.entry.status,
        ledgra_db::entities::sea_orm_active_enums::JournalStatus::Posted
    );

    let result = journals
        .void_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(posted.entry.id),
            "too late",
            fixture.actor,
        )
        .await;
    assert!(matches!(result, Err(JournalError::CannotVoidPosted(_))));
}
