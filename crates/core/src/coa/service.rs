//! Account validation rules.

use super::error::AccountError;
use super::types::{Account, CreateAccountInput};

/// Maximum length of an account code.
const MAX_CODE_LEN: usize = 32;

/// Validates a new account before persistence.
///
/// Checks the code format and, when a parent is supplied, that the parent
/// shares the child's account type. Uniqueness of the code is enforced by
/// the store's unique constraint; the repository surfaces `DuplicateCode`.
///
/// # Errors
///
/// Returns an error if the code is malformed or the parent type differs.
pub fn validate_new_account(
    input: &CreateAccountInput,
    parent: Option<&Account>,
) -> Result<(), AccountError> {
    validate_code(&input.code)?;

    if let Some(parent) = parent {
        if parent.account_type != input.account_type {
            return Err(AccountError::ParentTypeMismatch {
                parent_type: parent.account_type,
                child_type: input.account_type,
            });
        }
    }

    Ok(())
}

/// Validates that an account may be deactivated.
///
/// # Errors
///
/// Returns `SystemAccountProtected` for system accounts.
pub fn validate_deactivate(account: &Account) -> Result<(), AccountError> {
    if account.is_system {
        return Err(AccountError::SystemAccountProtected(account.id));
    }
    Ok(())
}

/// Validates that an account may be deleted.
///
/// Deletion requires the account to be non-system and unreferenced by any
/// journal line. The caller supplies the referencing line count.
///
/// # Errors
///
/// Returns `SystemAccountProtected` or `AccountHasActivity`.
pub fn validate_delete(account: &Account, line_count: u64) -> Result<(), AccountError> {
    if account.is_system {
        return Err(AccountError::SystemAccountProtected(account.id));
    }
    if line_count > 0 {
        return Err(AccountError::AccountHasActivity {
            account_id: account.id,
            line_count,
        });
    }
    Ok(())
}

/// Validates the account code format: non-empty, bounded length, and
/// limited to alphanumerics plus `.`, `:`, `-`.
fn validate_code(code: &str) -> Result<(), AccountError> {
    if code.is_empty() {
        return Err(AccountError::InvalidCode {
            code: code.to_string(),
            reason: "code must not be empty",
        });
    }
    if code.len() > MAX_CODE_LEN {
        return Err(AccountError::InvalidCode {
            code: code.to_string(),
            reason: "code exceeds 32 characters",
        });
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-'))
    {
        return Err(AccountError::InvalidCode {
            code: code.to_string(),
            reason: "code may only contain alphanumerics, '.', ':' and '-'",
        });
    }
    Ok(())
}
