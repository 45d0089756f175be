//! Posting rules: the deterministic event → journal mapping.

use chrono::NaiveDate;
use ledgra_shared::types::{CounterpartyId, TenantId};
use rust_decimal::Decimal;

use super::error::PostingError;
use super::events::BusinessEvent;
use super::resolver::AccountResolver;
use crate::journal::SourceType;
use crate::subledger::OpenItemKind;

/// A journal line addressed by account code. The consumer resolves codes
/// to account ids against the tenant's chart before persisting.
#[derive(Debug, Clone)]
pub struct CodeLine {
    /// Target account code.
    pub account_code: String,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl CodeLine {
    fn debit(code: &str, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_code: code.to_string(),
            description,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    fn credit(code: &str, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_code: code.to_string(),
            description,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// The journal to create for an event.
#[derive(Debug, Clone)]
pub struct JournalDraft {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Business origin.
    pub source_type: SourceType,
    /// Originating document reference.
    pub source_id: String,
    /// Idempotency key derived from the event identity.
    pub idempotency_key: String,
    /// The lines, addressed by account code.
    pub lines: Vec<CodeLine>,
}

/// The subledger side effect to perform atomically with the journal.
#[derive(Debug, Clone)]
pub enum OpenItemEffect {
    /// Create a new receivable/payable.
    Create {
        /// Receivable or payable.
        kind: OpenItemKind,
        /// The counterparty.
        counterparty_id: CounterpartyId,
        /// Amount (original = remaining initially).
        amount: Decimal,
        /// Issue date.
        issue_date: NaiveDate,
        /// Due date.
        due_date: NaiveDate,
    },
    /// Apply a payment against an existing item.
    Apply {
        /// Receivable or payable.
        kind: OpenItemKind,
        /// Source id of the invoice/bill being settled.
        settles_source_id: String,
        /// Payment amount.
        amount: Decimal,
        /// External payment reference.
        payment_ref: Option<String>,
    },
}

/// The full, deterministic posting instruction derived from one event.
#[derive(Debug, Clone)]
pub struct PostingInstruction {
    /// Tenant the instruction applies to.
    pub tenant_id: TenantId,
    /// The journal to create.
    pub journal: JournalDraft,
    /// Optional subledger effect, same atomic unit as the journal.
    pub open_item: Option<OpenItemEffect>,
}

/// Maps a business event to its posting instruction.
///
/// Pure function of the event payload and the tenant's resolver table.
///
/// # Errors
///
/// Returns `PostingError` for non-positive amounts or unmapped
/// payment methods/categories.
pub fn build_posting(
    event: &BusinessEvent,
    resolver: &AccountResolver,
) -> Result<PostingInstruction, PostingError> {
    let (entry_date, description, amount, lines, open_item) = match event {
        BusinessEvent::SaleCompleted(p) => {
            let cash = resolver.settlement_account(&p.payment_method)?;
            (
                p.occurred_on,
                p.memo.clone().unwrap_or_else(|| format!("Sale {}", p.source_id)),
                p.amount,
                vec![
                    CodeLine::debit(cash, p.amount, None),
                    CodeLine::credit(&resolver.control.sales_revenue, p.amount, None),
                ],
                None,
            )
        }
        BusinessEvent::PurchaseCompleted(p) => {
            let cash = resolver.settlement_account(&p.payment_method)?;
            let category = resolver.category_account(&p.category)?;
            (
                p.occurred_on,
                p.memo
                    .clone()
                    .unwrap_or_else(|| format!("Purchase {}", p.source_id)),
                p.amount,
                vec![
                    CodeLine::debit(category, p.amount, None),
                    CodeLine::credit(cash, p.amount, None),
                ],
                None,
            )
        }
        BusinessEvent::InvoiceCreated(p) => (
            p.occurred_on,
            p.memo
                .clone()
                .unwrap_or_else(|| format!("Invoice {}", p.source_id)),
            p.amount,
            vec![
                CodeLine::debit(&resolver.control.accounts_receivable, p.amount, None),
                CodeLine::credit(&resolver.control.sales_revenue, p.amount, None),
            ],
            Some(OpenItemEffect::Create {
                kind: OpenItemKind::Receivable,
                counterparty_id: p.counterparty_id,
                amount: p.amount,
                issue_date: p.occurred_on,
                due_date: p.due_date,
            }),
        ),
        BusinessEvent::BillCreated(p) => {
            let category = resolver.category_account(&p.category)?;
            (
                p.occurred_on,
                p.memo.clone().unwrap_or_else(|| format!("Bill {}", p.source_id)),
                p.amount,
                vec![
                    CodeLine::debit(category, p.amount, None),
                    CodeLine::credit(&resolver.control.accounts_payable, p.amount, None),
                ],
                Some(OpenItemEffect::Create {
                    kind: OpenItemKind::Payable,
                    counterparty_id: p.counterparty_id,
                    amount: p.amount,
                    issue_date: p.occurred_on,
                    due_date: p.due_date,
                }),
            )
        }
        BusinessEvent::InvoicePaid(p) | BusinessEvent::PaymentReceived(p) => {
            let cash = resolver.settlement_account(&p.payment_method)?;
            (
                p.occurred_on,
                format!("Payment {} for {}", p.source_id, p.settles_source_id),
                p.amount,
                vec![
                    CodeLine::debit(cash, p.amount, None),
                    CodeLine::credit(&resolver.control.accounts_receivable, p.amount, None),
                ],
                Some(OpenItemEffect::Apply {
                    kind: OpenItemKind::Receivable,
                    settles_source_id: p.settles_source_id.clone(),
                    amount: p.amount,
                    payment_ref: p.payment_ref.clone(),
                }),
            )
        }
        BusinessEvent::BillPaid(p) | BusinessEvent::PaymentMade(p) => {
            let cash = resolver.settlement_account(&p.payment_method)?;
            (
                p.occurred_on,
                format!("Payment {} for {}", p.source_id, p.settles_source_id),
                p.amount,
                vec![
                    CodeLine::debit(&resolver.control.accounts_payable, p.amount, None),
                    CodeLine::credit(cash, p.amount, None),
                ],
                Some(OpenItemEffect::Apply {
                    kind: OpenItemKind::Payable,
                    settles_source_id: p.settles_source_id.clone(),
                    amount: p.amount,
                    payment_ref: p.payment_ref.clone(),
                }),
            )
        }
        BusinessEvent::ExpenseRecorded(p) => {
            let cash = resolver.settlement_account(&p.payment_method)?;
            let category = resolver.category_account(&p.category)?;
            (
                p.occurred_on,
                p.memo
                    .clone()
                    .unwrap_or_else(|| format!("Expense {}", p.source_id)),
                p.amount,
                vec![
                    CodeLine::debit(category, p.amount, None),
                    CodeLine::credit(cash, p.amount, None),
                ],
                None,
            )
        }
    };

    if amount <= Decimal::ZERO {
        return Err(PostingError::InvalidAmount(amount));
    }

    Ok(PostingInstruction {
        tenant_id: event.tenant_id(),
        journal: JournalDraft {
            entry_date,
            description,
            source_type: event.source_type(),
            source_id: event.source_id().to_string(),
            idempotency_key: event.idempotency_key(),
            lines,
        },
        open_item,
    })
}
