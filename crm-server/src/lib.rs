//! CoachDesk CRM Server
//!
//! Backend for a coaching-business CRM: role-scoped KPI aggregation,
//! pipeline classification and invoice ledger filtering over an in-process
//! entity store.
//!
//! # Module structure
//!
//! ```text
//! crm-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # Actor resolution, admin gate, role scoping
//! ├── store/         # Entity store and demo seed
//! ├── services/      # KPI aggregation, pipeline, ledger, reminders
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Time windows, logger
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::CurrentActor;
pub use core::{Config, Server, ServerState};
pub use store::{EntityStore, InvoiceMutation, Snapshot};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______                 __    ____            __
  / ____/___  ____ ______/ /_  / __ \___  _____/ /__
 / /   / __ \/ __ `/ ___/ __ \/ / / / _ \/ ___/ //_/
/ /___/ /_/ / /_/ / /__/ / / / /_/ /  __(__  ) ,<
\____/\____/\__,_/\___/_/ /_/_____/\___/____/_/|_|
    "#
    );
}
