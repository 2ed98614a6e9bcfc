//! Role-based visibility filter
//!
//! Admin sees everything; a coach sees only records assigned to them.
//! Records with no assigned coach are invisible to coaches.

use shared::models::{Client, Prospect, Session};

use crate::auth::CurrentActor;

/// Anything owned by (at most) one coach
pub trait CoachScoped {
    fn assigned_coach_id(&self) -> Option<i64>;
}

impl CoachScoped for Client {
    fn assigned_coach_id(&self) -> Option<i64> {
        Some(self.assigned_coach_id)
    }
}

impl CoachScoped for Prospect {
    fn assigned_coach_id(&self) -> Option<i64> {
        self.assigned_coach_id
    }
}

impl CoachScoped for Session {
    fn assigned_coach_id(&self) -> Option<i64> {
        self.assigned_coach_id
    }
}

/// Retain the records the actor is allowed to see.
///
/// Visibility violations are silent exclusions, never errors.
pub fn scope<T: CoachScoped>(actor: &CurrentActor, records: Vec<T>) -> Vec<T> {
    if actor.is_admin() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.assigned_coach_id() == Some(actor.id))
        .collect()
}

/// Whether a single record is visible to the actor (direct fetch)
pub fn in_scope<T: CoachScoped>(actor: &CurrentActor, record: &T) -> bool {
    actor.is_admin() || record.assigned_coach_id() == Some(actor.id)
}
