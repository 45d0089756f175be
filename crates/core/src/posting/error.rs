//! Auto-posting error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while mapping a business event to journal lines.
#[derive(Debug, Error)]
pub enum PostingError {
    /// No account is configured for the payment method.
    #[error("No account mapped for payment method '{0}'")]
    UnmappedPaymentMethod(String),

    /// No account is configured for the item/expense category.
    #[error("No account mapped for category '{0}'")]
    UnmappedCategory(String),

    /// Event amount must be positive.
    #[error("Event amount must be positive, got {0}")]
    InvalidAmount(Decimal),
}

impl PostingError {
    /// Returns the error code for API responses and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnmappedPaymentMethod(_) => "UNMAPPED_PAYMENT_METHOD",
            Self::UnmappedCategory(_) => "UNMAPPED_CATEGORY",
            Self::InvalidAmount(_) => "INVALID_EVENT_AMOUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PostingError::UnmappedPaymentMethod("wire".to_string()).error_code(),
            "UNMAPPED_PAYMENT_METHOD"
        );
        assert_eq!(
            PostingError::InvalidAmount(dec!(0)).error_code(),
            "INVALID_EVENT_AMOUNT"
        );
    }
}
