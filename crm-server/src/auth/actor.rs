//! Actor context
//!
//! [`CurrentActor`] is injected into request extensions by
//! [`require_actor`](super::require_actor) and extracted by handlers.

use axum::extract::FromRequestParts;
use http::request::Parts;

use shared::models::{Role, User};
use shared::AppError;

use crate::core::ServerState;

/// The resolved actor of the current request
#[derive(Debug, Clone)]
pub struct CurrentActor {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl CurrentActor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for CurrentActor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

impl FromRequestParts<ServerState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware runs on every /api/ route, so the extension is
        // normally present already.
        parts
            .extensions
            .get::<CurrentActor>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
