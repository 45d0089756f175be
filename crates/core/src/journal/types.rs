//! Journal domain types for entry creation and validation.

use chrono::NaiveDate;
use ledgra_shared::types::{AccountId, ActorId, JournalEntryId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The business origin of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Direct sale (settled immediately).
    Sale,
    /// Direct purchase (settled immediately).
    Purchase,
    /// Customer invoice (creates a receivable).
    Invoice,
    /// Supplier bill (creates a payable).
    Bill,
    /// Payment received or made.
    Payment,
    /// Standalone expense.
    Expense,
    /// Manually keyed entry.
    Manual,
    /// Period-closing entry.
    Closing,
    /// Adjustment entry.
    Adjustment,
    /// Reversal of a previous entry.
    Reversal,
}

impl SourceType {
    /// Returns the string representation of the source type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Invoice => "invoice",
            Self::Bill => "bill",
            Self::Payment => "payment",
            Self::Expense => "expense",
            Self::Manual => "manual",
            Self::Closing => "closing",
            Self::Adjustment => "adjustment",
            Self::Reversal => "reversal",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Journal entry status.
///
/// The valid transitions are:
/// - Draft → Posted (post)
/// - Draft → Void (void)
///
/// Posted entries are immutable; corrections happen by reversal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is staged and does not affect the ledger.
    Draft,
    /// Entry is posted to the ledger (immutable).
    Posted,
    /// Entry was discarded before posting (immutable).
    Void,
}

impl JournalStatus {
    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Void)
    }

    /// Returns true if the entry affects ledger balances.
    #[must_use]
    pub fn affects_ledger(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// Input for a single journal line.
///
/// Exactly one of `debit`/`credit` must be strictly positive; the other
/// must be zero. Amounts carry six fractional digits of precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Optional line description.
    pub description: Option<String>,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional department tag.
    pub department: Option<String>,
    /// Optional project tag.
    pub project: Option<String>,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: amount,
            credit: Decimal::ZERO,
            department: None,
            project: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: Decimal::ZERO,
            credit: amount,
            department: None,
            project: None,
        }
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalInput {
    /// The tenant this entry belongs to.
    pub tenant_id: TenantId,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Business origin of the entry.
    pub source_type: SourceType,
    /// Reference to the originating business document, if any.
    pub source_id: Option<String>,
    /// Idempotency key, unique per tenant. Replays return the original entry.
    pub idempotency_key: String,
    /// The journal lines (at least 2).
    pub lines: Vec<LineInput>,
    /// The actor creating the entry.
    pub created_by: ActorId,
    /// Post immediately (system postings) or stage as a draft.
    pub post_immediately: bool,
    /// Snapshot of the triggering payload, kept for audit.
    pub source_payload: Option<serde_json::Value>,
}

/// A posted line, as read back from the store. Used as reversal input.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The account the line posted to.
    pub account_id: AccountId,
    /// Stable line number within the entry.
    pub line_number: i32,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount (zero if credit line).
    pub debit: Decimal,
    /// Credit amount (zero if debit line).
    pub credit: Decimal,
    /// Department tag.
    pub department: Option<String>,
    /// Project tag.
    pub project: Option<String>,
}

/// A posted journal entry with its lines, as read back from the store.
#[derive(Debug, Clone)]
pub struct PostedJournal {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Tenant ID.
    pub tenant_id: TenantId,
    /// Human-readable entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Description.
    pub description: String,
    /// Business origin.
    pub source_type: SourceType,
    /// Current status.
    pub status: JournalStatus,
    /// ID of the entry this one reverses, if any.
    pub reversal_of: Option<JournalEntryId>,
    /// ID of the entry that reverses this one, if any.
    pub reversed_by: Option<JournalEntryId>,
    /// The lines.
    pub lines: Vec<PostedLine>,
}

/// Totals for a candidate or posted entry.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits (decimal-exact).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// Formats a human-readable sequential entry number, scoped per tenant
/// per calendar year (e.g. `JE-2026-000042`).
#[must_use]
pub fn format_entry_number(year: i32, sequence: i64) -> String {
    format!("JE-{year}-{sequence:06}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_immutability() {
        assert!(!JournalStatus::Draft.is_immutable());
        assert!(JournalStatus::Posted.is_immutable());
        assert!(JournalStatus::Void.is_immutable());
    }

    #[test]
    fn test_status_affects_ledger() {
        assert!(!JournalStatus::Draft.affects_ledger());
        assert!(JournalStatus::Posted.affects_ledger());
        assert!(!JournalStatus::Void.affects_ledger());
    }

    #[test]
    fn test_line_constructors() {
        let account = AccountId::new();
        let line = LineInput::debit(account, dec!(100.50));
        assert_eq!(line.debit, dec!(100.50));
        assert_eq!(line.credit, Decimal::ZERO);

        let line = LineInput::credit(account, dec!(100.50));
        assert_eq!(line.debit, Decimal::ZERO);
        assert_eq!(line.credit, dec!(100.50));
    }

    #[test]
    fn test_entry_totals() {
        let totals = EntryTotals::new(dec!(100), dec!(100));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);

        let totals = EntryTotals::new(dec!(100), dec!(40));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(60));
    }

    #[test]
    fn test_format_entry_number() {
        assert_eq!(format_entry_number(2026, 42), "JE-2026-000042");
        assert_eq!(format_entry_number(2026, 1_000_000), "JE-2026-1000000");
    }

    #[test]
    fn test_source_type_as_str() {
        assert_eq!(SourceType::Sale.as_str(), "sale");
        assert_eq!(SourceType::Closing.as_str(), "closing");
        assert_eq!(SourceType::Reversal.as_str(), "reversal");
    }
}
