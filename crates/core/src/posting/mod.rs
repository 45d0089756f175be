//! Auto-posting: business events to journal entries.
//!
//! Each recognized business event maps to a deterministic set of journal
//! lines through a resolver table held in tenant configuration. The
//! mapping is a pure function of event payload plus configuration, with
//! no hidden state. Idempotency keys derive from the event's own identity,
//! which is what makes at-least-once delivery safe.

pub mod error;
pub mod events;
pub mod resolver;
pub mod rules;

pub use error::PostingError;
pub use events::{
    BillPayload, BusinessEvent, ExpensePayload, InvoicePayload, PaymentMethod, PurchasePayload,
    SalePayload, SettlementPayload,
};
pub use resolver::{AccountResolver, ControlAccounts};
pub use rules::{CodeLine, JournalDraft, OpenItemEffect, PostingInstruction, build_posting};
