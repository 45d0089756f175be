//! Aging buckets for open receivables and payables.

use chrono::NaiveDate;
use ledgra_shared::types::CounterpartyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{OpenItem, OpenItemKind};

/// Days-overdue buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Not yet due.
    Current,
    /// 1-30 days overdue.
    Days1To30,
    /// 31-60 days overdue.
    Days31To60,
    /// 61-90 days overdue.
    Days61To90,
    /// More than 90 days overdue.
    Over90,
}

impl AgingBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 5] = [
        Self::Current,
        Self::Days1To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Over90,
    ];
}

/// Determines the aging bucket for an item as of a date.
#[must_use]
pub fn bucket_for(as_of: NaiveDate, due_date: NaiveDate) -> AgingBucket {
    let days_overdue = (as_of - due_date).num_days();
    match days_overdue {
        ..=0 => AgingBucket::Current,
        1..=30 => AgingBucket::Days1To30,
        31..=60 => AgingBucket::Days31To60,
        61..=90 => AgingBucket::Days61To90,
        _ => AgingBucket::Over90,
    }
}

/// Remaining balances of one counterparty split across buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingRow {
    /// The counterparty.
    pub counterparty_id: CounterpartyId,
    /// Remaining balance not yet due.
    pub current: Decimal,
    /// Remaining balance 1-30 days overdue.
    pub days_1_30: Decimal,
    /// Remaining balance 31-60 days overdue.
    pub days_31_60: Decimal,
    /// Remaining balance 61-90 days overdue.
    pub days_61_90: Decimal,
    /// Remaining balance more than 90 days overdue.
    pub over_90: Decimal,
    /// Total remaining balance.
    pub total: Decimal,
}

impl AgingRow {
    fn new(counterparty_id: CounterpartyId) -> Self {
        Self {
            counterparty_id,
            current: Decimal::ZERO,
            days_1_30: Decimal::ZERO,
            days_31_60: Decimal::ZERO,
            days_61_90: Decimal::ZERO,
            over_90: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        match bucket {
            AgingBucket::Current => self.current += amount,
            AgingBucket::Days1To30 => self.days_1_30 += amount,
            AgingBucket::Days31To60 => self.days_31_60 += amount,
            AgingBucket::Days61To90 => self.days_61_90 += amount,
            AgingBucket::Over90 => self.over_90 += amount,
        }
        self.total += amount;
    }
}

/// Aging report over open and partially settled items of one kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingReport {
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// As-of date used to compute overdue days.
    pub as_of: NaiveDate,
    /// Per-counterparty rows, ordered by counterparty ID.
    pub rows: Vec<AgingRow>,
    /// Grand total remaining balance.
    pub grand_total: Decimal,
}

/// Buckets open/partial items by days overdue, grouped per counterparty.
///
/// Items of other kinds or in terminal states are skipped; the caller is
/// expected to pre-filter by tenant.
#[must_use]
pub fn aging_report(items: &[OpenItem], kind: OpenItemKind, as_of: NaiveDate) -> AgingReport {
    let mut by_counterparty: BTreeMap<uuid::Uuid, AgingRow> = BTreeMap::new();
    let mut grand_total = Decimal::ZERO;

    for item in items {
        if item.kind != kind || !item.status.accepts_payments() {
            continue;
        }

        let bucket = bucket_for(as_of, item.due_date);
        by_counterparty
            .entry(item.counterparty_id.into_inner())
            .or_insert_with(|| AgingRow::new(item.counterparty_id))
            .add(bucket, item.remaining_amount);
        grand_total += item.remaining_amount;
    }

    AgingReport {
        kind,
        as_of,
        rows: by_counterparty.into_values().collect(),
        grand_total,
    }
}
