//! `SeaORM` Entity for the journal_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal line.
///
/// Exactly one of debit/credit is strictly positive (enforced by a table
/// CHECK constraint as well as by the core validator).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_lines")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Parent journal entry.
    pub journal_entry_id: Uuid,
    /// Account posted to.
    pub account_id: Uuid,
    /// Stable line number within the entry (1-based).
    pub line_number: i32,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount, DECIMAL(20,6).
    pub debit: Decimal,
    /// Credit amount, DECIMAL(20,6).
    pub credit: Decimal,
    /// Optional department tag.
    pub department: Option<String>,
    /// Optional project tag.
    pub project: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The parent journal entry.
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
    /// The account posted to.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
