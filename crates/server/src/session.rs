//! # Sessions
//!
//! A session is the one piece of per-visitor state: the id of the user created
//! by the User Details page. Clients carry the session id returned by that page
//! in the `x-session-id` header. Sessions live in memory only and are lost on
//! restart.

use crate::{errors::AppError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-id";

/// Session id to user id, kept in memory.
///
/// Sessions are never evicted; the map grows until the process restarts.
#[derive(Clone, Default)]
pub struct SessionStore {
    users: Arc<RwLock<HashMap<Uuid, i64>>>,
}

impl SessionStore {
    /// Opens a new session bound to `user_id` and returns its id.
    pub async fn start(&self, user_id: i64) -> Uuid {
        let session_id = Uuid::new_v4();
        self.users.write().await.insert(session_id, user_id);
        info!(%session_id, user_id, "Started session.");
        session_id
    }

    pub async fn user_id(&self, session_id: &Uuid) -> Option<i64> {
        self.users.read().await.get(session_id).copied()
    }
}

/// The request's session, resolved from the `x-session-id` header.
///
/// A request without the header, or with a session the server no longer
/// knows, has no current user.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionContext {
    pub session_id: Option<Uuid>,
    pub user_id: Option<i64>,
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(SESSION_HEADER) else {
            return Ok(Self::default());
        };

        let session_id = header
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid {SESSION_HEADER} header."))
            })?;

        let user_id = state.sessions.user_id(&session_id).await;
        if user_id.is_none() {
            debug!(%session_id, "Unknown session; treating request as anonymous.");
        }
        Ok(Self {
            session_id: Some(session_id),
            user_id,
        })
    }
}
