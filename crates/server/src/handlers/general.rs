//! # General Route Handlers
//!
//! The root and health check endpoints.

use super::{AppError, AppState};
use axum::{extract::State, Json};
use serde::Serialize;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "avethics server is running."
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tables: Vec<String>,
}

/// The handler for the health check (`/health`) endpoint.
///
/// Reports the tables present in the store, which also proves it is reachable.
pub async fn health_check(
    State(app_state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    let tables = app_state.sqlite_provider.table_names().await?;
    Ok(Json(HealthResponse {
        status: "OK",
        tables,
    }))
}
