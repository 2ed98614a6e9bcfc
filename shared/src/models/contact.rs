//! Unified contact view over clients and prospects

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::prospect::Prospect;

/// A contact is either a signed client or a pipeline prospect.
///
/// Used by lookups that accept an id from either collection; clients win
/// when the same id exists in both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Contact {
    Client(Client),
    Prospect(Prospect),
}

impl Contact {
    pub fn id(&self) -> i64 {
        match self {
            Contact::Client(c) => c.id,
            Contact::Prospect(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Contact::Client(c) => &c.name,
            Contact::Prospect(p) => &p.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Contact::Client(c) => &c.email,
            Contact::Prospect(p) => &p.email,
        }
    }

    pub fn assigned_coach_id(&self) -> Option<i64> {
        match self {
            Contact::Client(c) => Some(c.assigned_coach_id),
            Contact::Prospect(p) => p.assigned_coach_id,
        }
    }
}
