//! Repository abstractions for data access.
//!
//! Repositories execute the core's rules against the transactional store,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every operation takes an explicit tenant parameter; no
//! query can return another tenant's rows.

pub mod account;
pub mod consumer;
pub mod fiscal;
pub mod journal;
pub mod ledger;
pub mod outbox;
pub mod subledger;

pub use account::{AccountFilter, AccountRepository};
pub use consumer::{ConsumeError, ConsumeOutcome, EventConsumer};
pub use fiscal::{ClosePeriodOptions, CreatePeriodInput, FiscalRepository};
pub use journal::{
    CreatedJournal, JournalFilter, JournalRepository, JournalWithLines, to_core_journal,
};
pub use ledger::{LedgerReadError, LedgerRepository};
pub use outbox::OutboxRepository;
pub use subledger::SubledgerRepository;
