//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check, public
//! - [`staff`] - staff management (mutations admin-only)
//! - [`clients`] - client management
//! - [`prospects`] - prospect management and kanban stage moves
//! - [`sessions`] - session management
//! - [`pipeline`] - ordered stage buckets
//! - [`invoices`] - invoice ledger, creation, status, reminders
//! - [`kpis`] - per-page KPI banners
//! - [`dashboard`] - dashboard summary block
//! - [`contacts`] - unified client/prospect lookup

pub mod clients;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod kpis;
pub mod pipeline;
pub mod prospects;
pub mod sessions;
pub mod staff;

// Re-export common types for handlers
pub use shared::{AppError, AppResult};
