//! The double-entry validator.
//!
//! Pure function over a candidate line set: no I/O, no side effects.
//! Account existence/activity is supplied by the caller through a lookup
//! closure so the validator stays storage-agnostic.

use ledgra_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryTotals, LineInput};

/// The account facts the validator needs.
#[derive(Debug, Clone, Copy)]
pub struct AccountState {
    /// Whether the account accepts postings.
    pub is_active: bool,
}

/// Validates a candidate set of journal lines.
///
/// Rules, in order:
/// 1. At least 2 lines.
/// 2. Per line, exactly one of debit/credit is strictly positive and the
///    other is zero (both-zero and both-set are rejected; negatives are
///    rejected).
/// 3. Every referenced account exists and is active.
/// 4. Σdebit == Σcredit, compared decimal-exact.
///
/// Returns the entry totals on success.
///
/// # Errors
///
/// Returns the first violated rule as a `JournalError` carrying the
/// offending line number and amounts.
pub fn validate_lines<F>(lines: &[LineInput], account_lookup: F) -> Result<EntryTotals, JournalError>
where
    F: Fn(AccountId) -> Option<AccountState>,
{
    if lines.len() < 2 {
        return Err(JournalError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        let debit_set = line.debit > Decimal::ZERO;
        let credit_set = line.credit > Decimal::ZERO;
        let negative = line.debit < Decimal::ZERO || line.credit < Decimal::ZERO;

        if negative || debit_set == credit_set {
            return Err(JournalError::InvalidLine {
                line_number,
                debit: line.debit,
                credit: line.credit,
            });
        }

        match account_lookup(line.account_id) {
            None => {
                return Err(JournalError::UnknownAccount {
                    line_number,
                    account_id: line.account_id,
                });
            }
            Some(state) if !state.is_active => {
                return Err(JournalError::InactiveAccount {
                    line_number,
                    account_id: line.account_id,
                });
            }
            Some(_) => {}
        }

        total_debit += line.debit;
        total_credit += line.credit;
    }

    let totals = EntryTotals::new(total_debit, total_credit);

    if !totals.is_balanced {
        return Err(JournalError::UnbalancedEntry {
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::LineInput;
    use rust_decimal_macros::dec;

    fn active(_id: AccountId) -> Option<AccountState> {
        Some(AccountState { is_active: true })
    }

    #[test]
    fn test_balanced_entry() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(100)),
            LineInput::credit(AccountId::new(), dec!(100)),
        ];
        let totals = validate_lines(&lines, active).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, dec!(100));
        assert_eq!(totals.total_credit, dec!(100));
    }

    #[test]
    fn test_multi_line_balanced_entry() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(60)),
            LineInput::debit(AccountId::new(), dec!(40)),
            LineInput::credit(AccountId::new(), dec!(100)),
        ];
        assert!(validate_lines(&lines, active).is_ok());
    }

    #[test]
    fn test_unbalanced_entry() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(100)),
            LineInput::credit(AccountId::new(), dec!(50)),
        ];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::UnbalancedEntry {
                total_debit,
                total_credit,
            }) if total_debit == dec!(100) && total_credit == dec!(50)
        ));
    }

    #[test]
    fn test_single_line_rejected() {
        let lines = vec![LineInput::debit(AccountId::new(), dec!(100))];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::InsufficientLines)
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            validate_lines(&[], active),
            Err(JournalError::InsufficientLines)
        ));
    }

    #[test]
    fn test_both_sides_set_rejected() {
        let mut line = LineInput::debit(AccountId::new(), dec!(100));
        line.credit = dec!(100);
        let lines = vec![line, LineInput::credit(AccountId::new(), dec!(100))];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::InvalidLine { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_both_sides_zero_rejected() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(100)),
            LineInput::debit(AccountId::new(), Decimal::ZERO),
        ];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::InvalidLine { line_number: 2, .. })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(-100)),
            LineInput::credit(AccountId::new(), dec!(-100)),
        ];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::InvalidLine { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_account_rejected() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(100)),
            LineInput::credit(AccountId::new(), dec!(100)),
        ];
        let result = validate_lines(&lines, |_| None);
        assert!(matches!(
            result,
            Err(JournalError::UnknownAccount { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let inactive_id = AccountId::new();
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(100)),
            LineInput::credit(inactive_id, dec!(100)),
        ];
        let result = validate_lines(&lines, |id| {
            Some(AccountState {
                is_active: id != inactive_id,
            })
        });
        assert!(matches!(
            result,
            Err(JournalError::InactiveAccount { line_number: 2, account_id }) if account_id == inactive_id
        ));
    }

    #[test]
    fn test_high_precision_balance() {
        // Six fractional digits must compare exactly, no rounding drift.
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(0.000001)),
            LineInput::debit(AccountId::new(), dec!(0.000002)),
            LineInput::credit(AccountId::new(), dec!(0.000003)),
        ];
        assert!(validate_lines(&lines, active).is_ok());
    }

    #[test]
    fn test_high_precision_imbalance_detected() {
        let lines = vec![
            LineInput::debit(AccountId::new(), dec!(0.000001)),
            LineInput::credit(AccountId::new(), dec!(0.000002)),
        ];
        assert!(matches!(
            validate_lines(&lines, active),
            Err(JournalError::UnbalancedEntry { .. })
        ));
    }
}
