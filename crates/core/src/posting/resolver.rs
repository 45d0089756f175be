//! The account resolver: tenant configuration mapping business context to
//! account codes.
//!
//! Modeled as an explicit table rather than scattered conditionals, so a
//! new payment method or category is additive configuration, not a code
//! change.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::PostingError;
use super::events::PaymentMethod;

/// The control accounts every tenant must configure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlAccounts {
    /// Accounts receivable control account code.
    pub accounts_receivable: String,
    /// Accounts payable control account code.
    pub accounts_payable: String,
    /// Sales revenue account code.
    pub sales_revenue: String,
}

/// Per-tenant account resolution table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResolver {
    /// Payment method → cash/bank account code.
    pub payment_accounts: HashMap<PaymentMethod, String>,
    /// Item/expense category → inventory or expense account code.
    pub category_accounts: HashMap<String, String>,
    /// Control accounts.
    pub control: ControlAccounts,
}

impl AccountResolver {
    /// Creates a resolver with only control accounts configured.
    #[must_use]
    pub fn new(control: ControlAccounts) -> Self {
        Self {
            payment_accounts: HashMap::new(),
            category_accounts: HashMap::new(),
            control,
        }
    }

    /// Adds a payment-method mapping.
    #[must_use]
    pub fn with_payment_account(mut self, method: PaymentMethod, code: impl Into<String>) -> Self {
        self.payment_accounts.insert(method, code.into());
        self
    }

    /// Adds a category mapping.
    #[must_use]
    pub fn with_category_account(
        mut self,
        category: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        self.category_accounts.insert(category.into(), code.into());
        self
    }

    /// Resolves the cash/bank account for a payment method.
    ///
    /// # Errors
    ///
    /// Returns `UnmappedPaymentMethod` when no mapping exists.
    pub fn settlement_account(&self, method: &PaymentMethod) -> Result<&str, PostingError> {
        self.payment_accounts
            .get(method)
            .map(String::as_str)
            .ok_or_else(|| PostingError::UnmappedPaymentMethod(method.to_string()))
    }

    /// Resolves the inventory/expense account for a category.
    ///
    /// # Errors
    ///
    /// Returns `UnmappedCategory` when no mapping exists.
    pub fn category_account(&self, category: &str) -> Result<&str, PostingError> {
        self.category_accounts
            .get(category)
            .map(String::as_str)
            .ok_or_else(|| PostingError::UnmappedCategory(category.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AccountResolver {
        AccountResolver::new(ControlAccounts {
            accounts_receivable: "1200".to_string(),
            accounts_payable: "2100".to_string(),
            sales_revenue: "4000".to_string(),
        })
        .with_payment_account(PaymentMethod::Cash, "1000")
        .with_payment_account(PaymentMethod::BankTransfer, "1010")
        .with_category_account("office_supplies", "5200")
    }

    #[test]
    fn test_settlement_account_resolution() {
        let r = resolver();
        assert_eq!(r.settlement_account(&PaymentMethod::Cash).unwrap(), "1000");
        assert_eq!(
            r.settlement_account(&PaymentMethod::BankTransfer).unwrap(),
            "1010"
        );
    }

    #[test]
    fn test_unmapped_payment_method() {
        let r = resolver();
        assert!(matches!(
            r.settlement_account(&PaymentMethod::Cheque),
            Err(PostingError::UnmappedPaymentMethod(_))
        ));
    }

    #[test]
    fn test_category_resolution() {
        let r = resolver();
        assert_eq!(r.category_account("office_supplies").unwrap(), "5200");
        assert!(matches!(
            r.category_account("travel"),
            Err(PostingError::UnmappedCategory(_))
        ));
    }

    #[test]
    fn test_resolver_is_plain_configuration() {
        // The table round-trips through JSON; it is data, not code.
        let r = resolver();
        let json = serde_json::to_string(&r).unwrap();
        let back: AccountResolver = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.settlement_account(&PaymentMethod::Cash).unwrap(),
            "1000"
        );
    }
}
