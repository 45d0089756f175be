//! Property-based tests for the double-entry validator.

use ledgra_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::LineInput;
use super::validation::{AccountState, validate_lines};

fn active(_id: AccountId) -> Option<AccountState> {
    Some(AccountState { is_active: true })
}

/// Strategy for positive amounts with up to six fractional digits.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

/// Strategy for a balanced entry: random debit amounts, mirrored by credit
/// lines carrying the same amounts.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<LineInput>> {
    prop::collection::vec(amount_strategy(), 1..=8).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in &amounts {
            lines.push(LineInput::debit(AccountId::new(), *amount));
        }
        for amount in &amounts {
            lines.push(LineInput::credit(AccountId::new(), *amount));
        }
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* set of lines where debit amounts are mirrored by credit
    /// amounts, validation SHALL succeed and report balanced totals.
    #[test]
    fn prop_balanced_entries_accepted(lines in balanced_lines_strategy()) {
        let totals = validate_lines(&lines, active);
        prop_assert!(totals.is_ok(), "Balanced entry should validate");
        let totals = totals.unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);
    }

    /// *For any* balanced entry, perturbing a single line's amount SHALL
    /// produce an `UnbalancedEntry` rejection.
    #[test]
    fn prop_perturbed_entries_rejected(
        lines in balanced_lines_strategy(),
        extra in amount_strategy(),
    ) {
        let mut lines = lines;
        lines[0].debit += extra;

        let result = validate_lines(&lines, active);
        prop_assert!(
            matches!(result, Err(JournalError::UnbalancedEntry { .. })),
            "Perturbed entry should be rejected as unbalanced"
        );
    }

    /// *For any* entry containing a line with both sides zero, validation
    /// SHALL fail with `InvalidLine` naming that line.
    #[test]
    fn prop_zero_line_rejected(
        lines in balanced_lines_strategy(),
        position in 0usize..16,
    ) {
        let mut lines = lines;
        let idx = position % lines.len();
        lines[idx].debit = Decimal::ZERO;
        lines[idx].credit = Decimal::ZERO;

        let result = validate_lines(&lines, active);
        prop_assert!(
            matches!(result, Err(JournalError::InvalidLine { line_number, .. }) if line_number == idx + 1),
            "Zero line should be rejected with its line number"
        );
    }

    /// *For any* entry containing a line with both sides set, validation
    /// SHALL fail with `InvalidLine`.
    #[test]
    fn prop_double_sided_line_rejected(
        lines in balanced_lines_strategy(),
        position in 0usize..16,
        amount in amount_strategy(),
    ) {
        let mut lines = lines;
        let idx = position % lines.len();
        lines[idx].debit = amount;
        lines[idx].credit = amount;

        let result = validate_lines(&lines, active);
        prop_assert!(matches!(result, Err(JournalError::InvalidLine { .. })), "expected InvalidLine");
    }

    /// *For any* balanced entry, an unknown account on any line SHALL be
    /// rejected before the balance check passes judgement.
    #[test]
    fn prop_unknown_account_rejected(lines in balanced_lines_strategy()) {
        let result = validate_lines(&lines, |_| None);
        prop_assert!(matches!(result, Err(JournalError::UnknownAccount { line_number: 1, .. })), "expected UnknownAccount");
    }

    /// Totals are order-independent: shuffling lines never changes the
    /// verdict or the sums.
    #[test]
    fn prop_validation_order_independent(lines in balanced_lines_strategy()) {
        let mut reversed = lines.clone();
        reversed.reverse();

        let a = validate_lines(&lines, active).unwrap();
        let b = validate_lines(&reversed, active).unwrap();
        prop_assert_eq!(a.total_debit, b.total_debit);
        prop_assert_eq!(a.total_credit, b.total_credit);
    }
}
