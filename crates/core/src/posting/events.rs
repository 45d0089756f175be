//! Inbound business event contracts.
//!
//! These are the payloads other business modules deliver (at least once)
//! to drive posting. Every payload carries the tenant, a stable source id,
//! and enough context for the account resolver.

use chrono::NaiveDate;
use ledgra_shared::types::{CounterpartyId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::SourceType;

/// How a payment was made or received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Card payment.
    Card,
    /// Cheque.
    Cheque,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Card => "card",
            Self::Cheque => "cheque",
        };
        write!(f, "{s}")
    }
}

/// A completed sale, settled immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalePayload {
    /// Tenant the sale belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the sale document.
    pub source_id: String,
    /// Date the sale occurred.
    pub occurred_on: NaiveDate,
    /// Sale amount.
    pub amount: Decimal,
    /// How the sale was settled.
    pub payment_method: PaymentMethod,
    /// Customer, if known.
    pub counterparty_id: Option<CounterpartyId>,
    /// Free-text memo.
    pub memo: Option<String>,
}

/// A completed purchase, settled immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePayload {
    /// Tenant the purchase belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the purchase document.
    pub source_id: String,
    /// Date the purchase occurred.
    pub occurred_on: NaiveDate,
    /// Purchase amount.
    pub amount: Decimal,
    /// How the purchase was settled.
    pub payment_method: PaymentMethod,
    /// Item category, resolved to an inventory or expense account.
    pub category: String,
    /// Supplier, if known.
    pub counterparty_id: Option<CounterpartyId>,
    /// Free-text memo.
    pub memo: Option<String>,
}

/// A customer invoice was issued (creates a receivable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePayload {
    /// Tenant the invoice belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the invoice.
    pub source_id: String,
    /// Issue date.
    pub occurred_on: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Invoice amount.
    pub amount: Decimal,
    /// The customer.
    pub counterparty_id: CounterpartyId,
    /// Free-text memo.
    pub memo: Option<String>,
}

/// A supplier bill was received (creates a payable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPayload {
    /// Tenant the bill belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the bill.
    pub source_id: String,
    /// Receipt date.
    pub occurred_on: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Bill amount.
    pub amount: Decimal,
    /// The supplier.
    pub counterparty_id: CounterpartyId,
    /// Expense/inventory category.
    pub category: String,
    /// Free-text memo.
    pub memo: Option<String>,
}

/// A payment settling an existing open item (invoice or bill).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPayload {
    /// Tenant the payment belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the payment document.
    pub source_id: String,
    /// Payment date.
    pub occurred_on: NaiveDate,
    /// Payment amount.
    pub amount: Decimal,
    /// How the payment moved.
    pub payment_method: PaymentMethod,
    /// The source id of the invoice/bill being settled.
    pub settles_source_id: String,
    /// The counterparty.
    pub counterparty_id: CounterpartyId,
    /// External payment reference.
    pub payment_ref: Option<String>,
}

/// A standalone expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensePayload {
    /// Tenant the expense belongs to.
    pub tenant_id: TenantId,
    /// Stable identifier of the expense record.
    pub source_id: String,
    /// Date the expense occurred.
    pub occurred_on: NaiveDate,
    /// Expense amount.
    pub amount: Decimal,
    /// How the expense was paid.
    pub payment_method: PaymentMethod,
    /// Expense category.
    pub category: String,
    /// Free-text memo.
    pub memo: Option<String>,
}

/// The inbound business events recognized by the kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BusinessEvent {
    /// A sale settled on the spot.
    #[serde(rename = "sale.completed")]
    SaleCompleted(SalePayload),
    /// A purchase settled on the spot.
    #[serde(rename = "purchase.completed")]
    PurchaseCompleted(PurchasePayload),
    /// A customer invoice was issued.
    #[serde(rename = "invoice.created")]
    InvoiceCreated(InvoicePayload),
    /// A customer invoice was paid.
    #[serde(rename = "invoice.paid")]
    InvoicePaid(SettlementPayload),
    /// A supplier bill was received.
    #[serde(rename = "bill.created")]
    BillCreated(BillPayload),
    /// A supplier bill was paid.
    #[serde(rename = "bill.paid")]
    BillPaid(SettlementPayload),
    /// An on-account payment was received from a customer.
    #[serde(rename = "payment.received")]
    PaymentReceived(SettlementPayload),
    /// An on-account payment was made to a supplier.
    #[serde(rename = "payment.made")]
    PaymentMade(SettlementPayload),
    /// A standalone expense was recorded.
    #[serde(rename = "expense.recorded")]
    ExpenseRecorded(ExpensePayload),
}

impl BusinessEvent {
    /// The wire-level event type tag.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::SaleCompleted(_) => "sale.completed",
            Self::PurchaseCompleted(_) => "purchase.completed",
            Self::InvoiceCreated(_) => "invoice.created",
            Self::InvoicePaid(_) => "invoice.paid",
            Self::BillCreated(_) => "bill.created",
            Self::BillPaid(_) => "bill.paid",
            Self::PaymentReceived(_) => "payment.received",
            Self::PaymentMade(_) => "payment.made",
            Self::ExpenseRecorded(_) => "expense.recorded",
        }
    }

    /// The tenant the event belongs to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        match self {
            Self::SaleCompleted(p) => p.tenant_id,
            Self::PurchaseCompleted(p) => p.tenant_id,
            Self::InvoiceCreated(p) => p.tenant_id,
            Self::InvoicePaid(p) | Self::BillPaid(p) | Self::PaymentReceived(p)
            | Self::PaymentMade(p) => p.tenant_id,
            Self::BillCreated(p) => p.tenant_id,
            Self::ExpenseRecorded(p) => p.tenant_id,
        }
    }

    /// The stable source document id.
    #[must_use]
    pub fn source_id(&self) -> &str {
        match self {
            Self::SaleCompleted(p) => &p.source_id,
            Self::PurchaseCompleted(p) => &p.source_id,
            Self::InvoiceCreated(p) => &p.source_id,
            Self::InvoicePaid(p) | Self::BillPaid(p) | Self::PaymentReceived(p)
            | Self::PaymentMade(p) => &p.source_id,
            Self::BillCreated(p) => &p.source_id,
            Self::ExpenseRecorded(p) => &p.source_id,
        }
    }

    /// The journal source type this event posts as.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            Self::SaleCompleted(_) => SourceType::Sale,
            Self::PurchaseCompleted(_) => SourceType::Purchase,
            Self::InvoiceCreated(_) => SourceType::Invoice,
            Self::BillCreated(_) => SourceType::Bill,
            Self::InvoicePaid(_) | Self::BillPaid(_) | Self::PaymentReceived(_)
            | Self::PaymentMade(_) => SourceType::Payment,
            Self::ExpenseRecorded(_) => SourceType::Expense,
        }
    }

    /// Derives the idempotency key from the event's own identity.
    ///
    /// The same event delivered 0, 1, or N times always resolves to the
    /// same key, and therefore to at most one journal entry.
    #[must_use]
    pub fn idempotency_key(&self) -> String {
        format!("{}-{}", self.source_type().as_str(), self.source_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sale() -> BusinessEvent {
        BusinessEvent::SaleCompleted(SalePayload {
            tenant_id: TenantId::new(),
            source_id: "S-1001".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            amount: dec!(250),
            payment_method: PaymentMethod::Cash,
            counterparty_id: None,
            memo: None,
        })
    }

    #[test]
    fn test_idempotency_key_is_deterministic() {
        let event = sale();
        assert_eq!(event.idempotency_key(), "sale-S-1001");
        assert_eq!(event.idempotency_key(), event.idempotency_key());
    }

    #[test]
    fn test_event_type_tags() {
        assert_eq!(sale().event_type(), "sale.completed");
    }

    #[test]
    fn test_event_serde_round_trip() {
        let event = sale();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "sale.completed");
        let back: BusinessEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back.source_id(), "S-1001");
    }

    #[test]
    fn test_settlement_maps_to_payment_source() {
        let event = BusinessEvent::InvoicePaid(SettlementPayload {
            tenant_id: TenantId::new(),
            source_id: "PAY-7".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            amount: dec!(100),
            payment_method: PaymentMethod::BankTransfer,
            settles_source_id: "INV-3".to_string(),
            counterparty_id: CounterpartyId::new(),
            payment_ref: Some("TRX-999".to_string()),
        });
        assert_eq!(event.source_type(), SourceType::Payment);
        assert_eq!(event.idempotency_key(), "payment-PAY-7");
    }
}
