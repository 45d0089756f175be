//! Integration tests for the fiscal period lifecycle: sequenced close,
//! closing entries, snapshots, lock/unlock, and the outbox.
//!
//! Skipped when `DATABASE_URL` is not set.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ledgra_core::coa::{AccountType, CreateAccountInput};
use ledgra_core::fiscal::{BalanceSnapshot, FiscalError};
use ledgra_core::journal::{CreateJournalInput, JournalError, LineInput, SourceType};
use ledgra_db::entities::sea_orm_active_enums;
use ledgra_db::migration::Migrator;
use ledgra_db::repositories::{
    AccountRepository, ClosePeriodOptions, FiscalRepository, JournalRepository, LedgerRepository,
    OutboxRepository,
};
use ledgra_shared::types::{AccountId, ActorId, FiscalPeriodId, TenantId};
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

async fn setup(db: &DatabaseConnection) -> Fixture {
    let tenant = TenantId::new();
    let actor = ActorId::new();
    let accounts = AccountRepository::new(db.clone());

    let mut ids = Vec::new();
    for (code, name, account_type, is_system) in [
        ("1000", "Cash", AccountType::Asset, false),
        ("4000", "Sales", AccountType::Income, false),
        ("3900", "Retained Earnings", AccountType::Equity, true),
    ] {
        let model = accounts
            .create_account(CreateAccountInput {
                tenant_id: tenant,
                code: code.to_string(),
                name: name.to_string(),
                account_type,
                parent_id: None,
                is_system,
            })
            .await
            .expect("create account");
        ids.push(AccountId::from_uuid(model.id));
    }

    Fixture {
        tenant,
        actor,
        cash: ids[0],
        sales: ids[1],
    }
}

fn sale(fixture: &Fixture, key: &str, date: NaiveDate) -> CreateJournalInput {
    CreateJournalInput {
        tenant_id: fixture.tenant,
        entry_date: date,
        description: "Cash sale".to_string(),
        source_type: SourceType::Sale,
        source_id: None,
        idempotency_key: key.to_string(),
        lines: vec![
            LineInput::debit(fixture.cash, dec!(1000)),
            LineInput::credit(fixture.sales, dec!(1000)),
        ],
        created_by: fixture.actor,
        post_immediately: true,
        source_payload: None,
    }
}

fn close_options() -> ClosePeriodOptions {
    ClosePeriodOptions {
        generate_closing_entries: true,
        retained_earnings_code: Some("3900".to_string()),
        block_close_on_drafts: true,
    }
}

#[tokio::test]
async fn test_period_close_lifecycle() {
    let Some(db) = connect_or_skip().await else {
        return;
    };
    let fixture = setup(&db).await;
    let fiscal = FiscalRepository::new(db.clone());
    let journals = JournalRepository::new(db.clone());
    let ledger = LedgerRepository::new(db.clone());

    let periods = fiscal
        .create_monthly_periods(fixture.tenant, 2026)
        .await
        .expect("create periods");
    assert_eq!(periods.len(), 12);
    let january = FiscalPeriodId::from_uuid(periods[0].id);
    let february = FiscalPeriodId::from_uuid(periods[1].id);

    journals
        .create_journal(
            sale(&fixture, "JAN-1", NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            false,
        )
        .await
        .expect("post january sale");

    // Closing February before January is rejected.
    let out_of_order = fiscal
        .close_period(fixture.tenant, february, fixture.actor, close_options())
        .await;
    assert!(matches!(
        out_of_order,
        Err(FiscalError::PrecedingPeriodOpen { .. })
    ));

    // Close January with a closing entry.
    let closed = fiscal
        .close_period(fixture.tenant, january, fixture.actor, close_options())
        .await
        .expect("close january");
    assert_eq!(closed.status, sea_orm_active_enums::PeriodStatus::Closed);
    let closing_entry_id = closed.closing_entry_id.expect("closing entry generated");

    // The closing entry zeroed income into retained earnings.
    let closing = journals
        .get_journal(
            fixture.tenant,
            ledgra_shared::types::JournalEntryId::from_uuid(closing_entry_id),
        )
        .await
        .unwrap();
    assert_eq!(
        closing.entry.source_type,
        sea_orm_active_enums::SourceType::Closing
    );

    let as_of = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
    let sales_balance = ledger
        .account_balance(fixture.tenant, "4000", as_of)
        .await
        .unwrap();
    let retained = ledger
        .account_balance(fixture.tenant, "3900", as_of)
        .await
        .unwrap();
    assert_eq!(sales_balance, dec!(0));
    assert_eq!(retained, dec!(1000));

    let trial = ledger.trial_balance(fixture.tenant, as_of).await.unwrap();
    assert!(trial.totals.is_balanced);

    // Snapshot captured at close parses and includes the cash account.
    let snapshot: BalanceSnapshot =
        serde_json::from_value(closed.balance_snapshot.clone().expect("snapshot captured"))
            .expect("snapshot parses");
    assert!(snapshot.accounts.iter().any(|a| a.code == "1000"));

    // Manual postings into the closed period are rejected; system ones land.
    let manual = journals
        .create_journal(
            sale(&fixture, "JAN-2", NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()),
            false,
        )
        .await;
    assert!(matches!(manual, Err(JournalError::PeriodNotOpen { .. })));
    journals
        .create_journal(
            sale(&fixture, "JAN-3", NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()),
            true,
        )
        .await
        .expect("system posting into closed period");

    // Reopening January while nothing later is closed works; the re-close
    // posts a fresh closing entry for the residual (JAN-3) activity.
    fiscal
        .reopen_period(fixture.tenant, january, fixture.actor)
        .await
        .expect("reopen january");
    let reclosed = fiscal
        .close_period(fixture.tenant, january, fixture.actor, close_options())
        .await
        .expect("re-close january");
    assert_ne!(reclosed.closing_entry_id, Some(closing_entry_id));
    let sales_after = ledger
        .account_balance(fixture.tenant, "4000", as_of)
        .await
        .unwrap();
    assert_eq!(sales_after, dec!(0));

    // Lock January: nothing posts, not even system.
    fiscal
        .lock_period(fixture.tenant, january, fixture.actor)
        .await
        .expect("lock january");
    let system = journals
        .create_journal(
            sale(&fixture, "JAN-4", NaiveDate::from_ymd_opt(2026, 1, 21).unwrap()),
            true,
        )
        .await;
    assert!(matches!(system, Err(JournalError::PeriodLocked { .. })));

    // Unlock requires a reason.
    let no_reason = fiscal
        .unlock_period(fixture.tenant, january, fixture.actor, "  ")
        .await;
    assert!(matches!(no_reason, Err(FiscalError::MissingReason)));
    let unlocked = fiscal
        .unlock_period(fixture.tenant, january, fixture.actor, "auditor adjustment")
        .await
        .expect("unlock january");
    assert_eq!(unlocked.status, sea_orm_active_enums::PeriodStatus::Closed);

    // Close February, then reopening January is rejected.
    fiscal
        .close_period(fixture.tenant, february, fixture.actor, close_options())
        .await
        .expect("close february");
    let reopen = fiscal
        .reopen_period(fixture.tenant, january, fixture.actor)
        .await;
    assert!(matches!(reopen, Err(FiscalError::LaterPeriodClosed { .. })));
}

#[tokio::test]
async fn test_outbox_drain() {
    let Some(db) = connect_or_skip().await else {
        return;
    };
    let fixture = setup(&db).await;
    let journals = JournalRepository::new(db.clone());
    let outbox = OutboxRepository::new(db.clone());

    journals
        .create_journal(
            sale(&fixture, "OB-1", NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()),
            false,
        )
        .await
        .expect("post sale");

    let pending = outbox.pending(100).await.expect("fetch pending");
    let ours: Vec<_> = pending
        .iter()
        .filter(|e| e.tenant_id == fixture.tenant.into_inner())
        .collect();
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].event_type, "journal.posted");

    let ids: Vec<_> = ours.iter().map(|e| e.id).collect();
    let published = outbox.mark_published(&ids).await.expect("mark published");
    assert_eq!(published, 1);

    // Marking again is a no-op: at-least-once publishing stays safe.
    let republished = outbox.mark_published(&ids).await.expect("mark again");
    assert_eq!(republished, 0);
}
