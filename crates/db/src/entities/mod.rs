//! `SeaORM` entity definitions.

pub mod accounts;
pub mod fiscal_periods;
pub mod journal_entries;
pub mod journal_lines;
pub mod journal_sequences;
pub mod open_items;
pub mod outbox_events;
pub mod payment_applications;
pub mod sea_orm_active_enums;
