//! AR/AP subledger logic.
//!
//! Open receivables and payables, payment application, and aging. Each
//! open item is linked 1:1 to the journal entry that created it; the
//! remaining balance only ever decreases through recorded applications.

pub mod aging;
pub mod application;
pub mod error;
pub mod types;

#[cfg(test)]
mod application_props;

pub use aging::{AgingBucket, AgingReport, aging_report, bucket_for};
pub use application::{PaymentOutcome, apply_payment};
pub use error::SubledgerError;
pub use types::{CreateOpenItemInput, OpenItem, OpenItemKind, OpenItemStatus};
