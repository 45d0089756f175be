//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the kernel's tables
//! - Repository abstractions executing the core's rules transactionally
//! - Database migrations
//!
//! The kernel assumes a transactional SQL store (Postgres); this crate is
//! the boundary to it. Tenancy is enforced by scoping every query with the
//! caller's tenant id.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, EventConsumer, FiscalRepository, JournalRepository, LedgerRepository,
    OutboxRepository, SubledgerRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
