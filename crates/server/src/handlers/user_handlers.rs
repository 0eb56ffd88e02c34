//! # User Details Handlers
//!
//! Submitting the User Details form creates the user and the session that
//! attributes every later questionnaire answer, post, and comment.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams, Outcome, SessionContext};
use crate::types::DETAILS_REQUIRED;
use avethics::types::{NewUser, User};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedUser {
    pub user_id: i64,
    /// Send this back in the `x-session-id` header.
    pub session_id: Uuid,
}

pub async fn create_user_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    debug_params: Query<DebugParams>,
    Json(payload): Json<NewUser>,
) -> Result<Json<ApiResponse<Outcome<CreatedUser>>>, AppError> {
    if let Some(user_id) = session.user_id {
        info!(user_id, "Session already has a user; ignoring resubmission.");
        return Ok(wrap_response(
            Outcome::warning("Your details have already been submitted for this session."),
            debug_params,
            None,
        ));
    }

    let user_id = app_state.sqlite_provider.insert_user(payload).await?;
    let session_id = app_state.sessions.start(user_id).await;

    let debug_info = json!({ "user_id": user_id });
    Ok(wrap_response(
        Outcome::success(
            "Information saved!",
            CreatedUser {
                user_id,
                session_id,
            },
        ),
        debug_params,
        Some(debug_info),
    ))
}

/// Returns the user attached to the current session.
pub async fn current_user_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Outcome<User>>>, AppError> {
    let user = match session.user_id {
        Some(user_id) => app_state.sqlite_provider.get_user(user_id).await?,
        None => None,
    };
    let outcome = match user {
        Some(user) => Outcome::success("Current user.", user),
        None => Outcome::warning(DETAILS_REQUIRED),
    };
    Ok(wrap_response(outcome, debug_params, None))
}
