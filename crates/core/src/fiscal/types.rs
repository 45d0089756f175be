//! Fiscal period types.

use chrono::NaiveDate;
use ledgra_shared::types::{FiscalPeriodId, TenantId};
use serde::{Deserialize, Serialize};

/// Status of a fiscal period.
///
/// Status only advances OPEN → CLOSED → LOCKED; CLOSED → OPEN (reopen) and
/// LOCKED → CLOSED (unlock) are explicit, audited exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts all postings.
    Open,
    /// Period is closed; only system-generated postings may still land.
    Closed,
    /// Period is locked; nothing may post or reverse into it.
    Locked,
}

impl PeriodStatus {
    /// Returns true if the period accepts any posting at all.
    #[must_use]
    pub fn allows_any_posting(&self) -> bool {
        !matches!(self, Self::Locked)
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fiscal period.
///
/// Periods for a tenant never overlap; `period_number` orders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Tenant this period belongs to.
    pub tenant_id: TenantId,
    /// Period name (e.g., "March 2026").
    pub name: String,
    /// Ordering number within the tenant's period sequence.
    pub period_number: i32,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if transactions can be posted freely to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            tenant_id: TenantId::new(),
            name: "March 2026".to_string(),
            period_number: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status: PeriodStatus::Open,
        }
    }

    #[test]
    fn test_contains_date() {
        let period = march();
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
    }

    #[test]
    fn test_allows_any_posting() {
        assert!(PeriodStatus::Open.allows_any_posting());
        assert!(PeriodStatus::Closed.allows_any_posting());
        assert!(!PeriodStatus::Locked.allows_any_posting());
    }
}
