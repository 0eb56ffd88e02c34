//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `avethics-server`.
//! The handlers are split into sub-modules following the pages they serve.

// Sub-modules for different handler categories.
pub mod download_handlers;
pub mod forum_handlers;
pub mod general;
pub mod page_handlers;
pub mod questionnaire_handlers;
pub mod regulation_handlers;
pub mod user_handlers;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use download_handlers::*;
pub use forum_handlers::*;
pub use general::*;
pub use page_handlers::*;
pub use questionnaire_handlers::*;
pub use regulation_handlers::*;
pub use user_handlers::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    session::SessionContext,
    state::AppState,
    types::{ApiResponse, DebugParams, Outcome},
};
use axum::{extract::Query, Json};
use serde_json::Value;

/// A shared helper function to wrap a successful result in the standard `ApiResponse`
/// format, optionally including debug information if requested.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}
