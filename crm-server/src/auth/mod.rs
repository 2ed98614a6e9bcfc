//! Actor resolution and role-based visibility
//!
//! There is no credential verification in this service; the caller states
//! who it is via `X-Actor-Id` and the middleware resolves that against the
//! staff collection. Role decides what the actor can see and mutate.

pub mod actor;
pub mod middleware;
pub mod scope;

pub use actor::CurrentActor;
pub use middleware::{require_actor, require_admin};
pub use scope::{CoachScoped, in_scope, scope};
