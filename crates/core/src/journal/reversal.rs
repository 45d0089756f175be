//! Reversal construction for posted journal entries.
//!
//! Posted entries are never edited in place; a correction is a brand-new
//! entry with every line's debit and credit swapped, linked back to the
//! original. One reversal per entry, enforced by the store's uniqueness
//! on the linkage.

use chrono::NaiveDate;
use ledgra_shared::types::{ActorId, JournalEntryId};

use super::error::JournalError;
use super::types::{CreateJournalInput, JournalStatus, LineInput, PostedJournal, SourceType};

/// Derives the idempotency key for the reversal of an entry.
///
/// Deriving the key from the original's identity makes "reverse" itself
/// safe to retry: a redelivered reversal request resolves to the same row.
#[must_use]
pub fn reversal_idempotency_key(original: JournalEntryId) -> String {
    format!("reversal-{original}")
}

/// Validates that an entry may be reversed.
///
/// # Errors
///
/// Returns `NotReversible` unless the entry is posted, `AlreadyReversed`
/// if a reversal already exists, and `MissingReason` for an empty reason.
pub fn validate_can_reverse(entry: &PostedJournal, reason: &str) -> Result<(), JournalError> {
    if reason.trim().is_empty() {
        return Err(JournalError::MissingReason);
    }
    if entry.status != JournalStatus::Posted {
        return Err(JournalError::NotReversible {
            id: entry.id,
            status: entry.status,
        });
    }
    if let Some(reversed_by) = entry.reversed_by {
        return Err(JournalError::AlreadyReversed {
            original: entry.id,
            reversed_by,
        });
    }
    Ok(())
}

/// Builds the reversing entry for a posted journal.
///
/// Every line's debit and credit are swapped; accounts, amounts, and
/// dimension tags are preserved. The reversal posts immediately on
/// `reversal_date` with source type `Reversal`.
///
/// # Errors
///
/// Returns an error if the entry is not reversible (see
/// [`validate_can_reverse`]).
pub fn build_reversal(
    original: &PostedJournal,
    reversal_date: NaiveDate,
    reason: &str,
    actor: ActorId,
) -> Result<CreateJournalInput, JournalError> {
    validate_can_reverse(original, reason)?;

    let lines = original
        .lines
        .iter()
        .map(|line| LineInput {
            account_id: line.account_id,
            description: line.description.clone(),
            // Swap sides; amounts carry over untouched.
            debit: line.credit,
            credit: line.debit,
            department: line.department.clone(),
            project: line.project.clone(),
        })
        .collect();

    Ok(CreateJournalInput {
        tenant_id: original.tenant_id,
        entry_date: reversal_date,
        description: format!("Reversal of {}: {reason}", original.entry_number),
        source_type: SourceType::Reversal,
        source_id: Some(original.id.to_string()),
        idempotency_key: reversal_idempotency_key(original.id),
        lines,
        created_by: actor,
        post_immediately: true,
        source_payload: None,
    })
}
