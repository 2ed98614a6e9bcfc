//! Shared types for the CoachDesk CRM
//!
//! Domain models, error types, response structures and small utilities
//! used by the server crate and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Client, Contact, Invoice, PipelineStage, Prospect, Role, Session, User};
