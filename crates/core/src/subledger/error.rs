//! Subledger error types.

use ledgra_shared::types::OpenItemId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::OpenItemStatus;

/// Errors that can occur during subledger operations.
#[derive(Debug, Error)]
pub enum SubledgerError {
    /// Open item not found.
    #[error("Open item not found: {0}")]
    NotFound(OpenItemId),

    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Payment exceeds the remaining balance.
    #[error(
        "Payment of {attempted} exceeds remaining balance {remaining} on item {item_id}"
    )]
    OverApplication {
        /// The open item.
        item_id: OpenItemId,
        /// Remaining balance at the time of application.
        remaining: Decimal,
        /// The attempted payment amount.
        attempted: Decimal,
    },

    /// The item no longer accepts payments.
    #[error("Open item {item_id} is {status:?} and no longer accepts payments")]
    ItemNotOpen {
        /// The open item.
        item_id: OpenItemId,
        /// Its settlement status.
        status: OpenItemStatus,
    },

    /// Original amount must be positive.
    #[error("Open item amount must be positive, got {0}")]
    InvalidOriginalAmount(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl SubledgerError {
    /// Returns the error code for API responses and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "OPEN_ITEM_NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_PAYMENT_AMOUNT",
            Self::OverApplication { .. } => "OVER_APPLICATION",
            Self::ItemNotOpen { .. } => "ITEM_NOT_OPEN",
            Self::InvalidOriginalAmount(_) => "INVALID_ORIGINAL_AMOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_over_application_detail() {
        let id = OpenItemId::new();
        let err = SubledgerError::OverApplication {
            item_id: id,
            remaining: dec!(40),
            attempted: dec!(100),
        };
        assert_eq!(err.error_code(), "OVER_APPLICATION");
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("40"));
        assert!(msg.contains(&id.to_string()));
    }
}
