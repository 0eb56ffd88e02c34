//! # Page Handlers
//!
//! Navigation: the list of pages and the rendering of a page by name.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams, SessionContext};
use crate::pages::{navigation, render_page, Page, PageLink, PageView};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;
use tracing::debug;

pub async fn list_pages_handler() -> Json<Vec<PageLink>> {
    Json(navigation())
}

pub async fn page_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(page_name): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<PageView>>, AppError> {
    let page: Page = page_name.parse().map_err(AppError::NotFound)?;
    debug!(%page, user_id = ?session.user_id, "Rendering page.");
    let view = render_page(&app_state, &session, page).await?;
    let debug_info = json!({ "session_id": session.session_id, "user_id": session.user_id });
    Ok(wrap_response(view, debug_params, Some(debug_info)))
}
