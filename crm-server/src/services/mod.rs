//! Derivation services
//!
//! Pure functions over a store [`Snapshot`](crate::store::Snapshot) plus an
//! explicit reference date. Nothing in here mutates state or reads the
//! clock.

pub mod kpi;
pub mod ledger;
pub mod pipeline;
pub mod reminders;

pub use kpi::{DashboardSummary, Kpi, KpiPage};
pub use ledger::{DateRange, LedgerEntry, LedgerFilter};
pub use pipeline::StageBucket;
pub use reminders::{ReminderSender, ReminderTemplate};
