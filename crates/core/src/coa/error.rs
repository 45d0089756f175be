//! Account error types.

use ledgra_shared::types::AccountId;
use thiserror::Error;

use super::types::AccountType;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account code fails format rules.
    #[error("Invalid account code '{code}': {reason}")]
    InvalidCode {
        /// The offending code.
        code: String,
        /// Why the code was rejected.
        reason: &'static str,
    },

    /// Account code already exists within the tenant.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Parent account has a different type than the child.
    #[error("Parent account is {parent_type}, child must match (got {child_type})")]
    ParentTypeMismatch {
        /// The parent's account type.
        parent_type: AccountType,
        /// The requested child type.
        child_type: AccountType,
    },

    /// System-protected accounts cannot be deleted or deactivated.
    #[error("Account {0} is system-protected")]
    SystemAccountProtected(AccountId),

    /// Account has posted journal lines and cannot be deleted.
    #[error("Cannot delete account {account_id}: {line_count} journal lines reference it")]
    AccountHasActivity {
        /// The account ID.
        account_id: AccountId,
        /// Number of journal lines referencing the account.
        line_count: u64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AccountError {
    /// Returns the error code for API responses and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCode { .. } => "INVALID_ACCOUNT_CODE",
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_ACCOUNT_NOT_FOUND",
            Self::ParentTypeMismatch { .. } => "PARENT_TYPE_MISMATCH",
            Self::SystemAccountProtected(_) => "SYSTEM_ACCOUNT_PROTECTED",
            Self::AccountHasActivity { .. } => "ACCOUNT_HAS_ACTIVITY",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
