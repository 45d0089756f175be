//! Property-based tests for payment application.

use chrono::NaiveDate;
use ledgra_shared::types::{CounterpartyId, JournalEntryId, OpenItemId, TenantId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::application::apply_payment;
use super::error::SubledgerError;
use super::types::{OpenItem, OpenItemKind, OpenItemStatus};
use crate::journal::SourceType;

fn make_item(original: Decimal) -> OpenItem {
    OpenItem {
        id: OpenItemId::new(),
        tenant_id: TenantId::new(),
        kind: OpenItemKind::Receivable,
        counterparty_id: CounterpartyId::new(),
        source_type: SourceType::Invoice,
        source_id: "INV-1".to_string(),
        original_amount: original,
        remaining_amount: original,
        issue_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        status: OpenItemStatus::Open,
        journal_entry_id: JournalEntryId::new(),
    }
}

/// Amounts with six fractional digits.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* sequence of partial payments that sums to the original
    /// amount, the item SHALL walk OPEN → PARTIAL → PAID and remaining
    /// SHALL reach exactly zero, with no drift at six-decimal precision.
    #[test]
    fn prop_full_settlement_reaches_exact_zero(
        parts in prop::collection::vec(amount_strategy(), 1..=10),
    ) {
        let original: Decimal = parts.iter().copied().sum();
        let mut item = make_item(original);

        for (i, part) in parts.iter().enumerate() {
            let outcome = apply_payment(&item, *part).unwrap();
            item.remaining_amount = outcome.new_remaining;
            item.status = outcome.new_status;

            let applied: Decimal = parts[..=i].iter().copied().sum();
            prop_assert_eq!(item.remaining_amount, original - applied);
            prop_assert!(item.remaining_amount >= Decimal::ZERO);
        }

        prop_assert_eq!(item.remaining_amount, Decimal::ZERO);
        prop_assert_eq!(item.status, OpenItemStatus::Paid);
    }

    /// *For any* payment exceeding the remaining balance, application
    /// SHALL be rejected and the item left untouched.
    #[test]
    fn prop_over_application_rejected(
        original in amount_strategy(),
        excess in amount_strategy(),
    ) {
        let item = make_item(original);
        let result = apply_payment(&item, original + excess);
        prop_assert!(matches!(result, Err(SubledgerError::OverApplication { .. })), "expected OverApplication");
    }

    /// *For any* partial payment strictly below the remaining balance,
    /// the status SHALL be PARTIAL, never PAID.
    #[test]
    fn prop_partial_payment_keeps_item_open(
        original in amount_strategy(),
        fraction in 1i64..=99,
    ) {
        let payment = original * Decimal::new(fraction, 2);
        prop_assume!(payment > Decimal::ZERO && payment < original);

        let item = make_item(original);
        let outcome = apply_payment(&item, payment).unwrap();
        prop_assert_eq!(outcome.new_status, OpenItemStatus::Partial);
        prop_assert!(outcome.new_remaining > Decimal::ZERO);
    }
}
