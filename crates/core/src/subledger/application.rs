//! Payment application against open items.

use rust_decimal::Decimal;

use super::error::SubledgerError;
use super::types::{OpenItem, OpenItemStatus};

/// Outcome of applying a payment: the item's new remaining balance and
/// status. The repository persists both alongside the application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Remaining balance after the application.
    pub new_remaining: Decimal,
    /// Status after the application.
    pub new_status: OpenItemStatus,
}

/// Applies a payment to an open item.
///
/// The invariant `remaining = original − Σ applications` is preserved:
/// over-application is rejected, remaining never goes negative, and the
/// status follows OPEN → PARTIAL → PAID with PAID reached exactly when
/// remaining hits zero.
///
/// # Errors
///
/// Returns `InvalidAmount` for non-positive amounts, `ItemNotOpen` when
/// the item is paid or void, and `OverApplication` when the amount
/// exceeds the remaining balance.
pub fn apply_payment(item: &OpenItem, amount: Decimal) -> Result<PaymentOutcome, SubledgerError> {
    if amount <= Decimal::ZERO {
        return Err(SubledgerError::InvalidAmount(amount));
    }
    if !item.status.accepts_payments() {
        return Err(SubledgerError::ItemNotOpen {
            item_id: item.id,
            status: item.status,
        });
    }
    if amount > item.remaining_amount {
        return Err(SubledgerError::OverApplication {
            item_id: item.id,
            remaining: item.remaining_amount,
            attempted: amount,
        });
    }

    let new_remaining = item.remaining_amount - amount;
    let new_status = if new_remaining.is_zero() {
        OpenItemStatus::Paid
    } else {
        OpenItemStatus::Partial
    };

    Ok(PaymentOutcome {
        new_remaining,
        new_status,
    })
}

/// Validates the original amount for a new open item.
///
/// # Errors
///
/// Returns `InvalidOriginalAmount` for non-positive amounts.
pub fn validate_original_amount(amount: Decimal) -> Result<(), SubledgerError> {
    if amount <= Decimal::ZERO {
        return Err(SubledgerError::InvalidOriginalAmount(amount));
    }
    Ok(())
}
