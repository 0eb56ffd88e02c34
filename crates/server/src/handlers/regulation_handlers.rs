//! # Regulation Handlers
//!
//! Generation of ethical guidelines from the collected data, the history of
//! generated guidelines, and export of the latest one to a file.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams, Outcome};
use crate::types::INSUFFICIENT_DATA;
use avethics::{
    constants::RECENT_REGULATIONS_LIMIT, export::export_regulation,
    regulation::has_sufficient_data, types::Regulation,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Debug)]
pub struct GeneratedRegulation {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ExportedRegulation {
    pub path: String,
    pub regulation_id: i64,
}

/// Generates guidelines from every stored user and response.
///
/// Without at least one user and one response the external service is not
/// called and a warning is returned instead.
pub async fn generate_regulation_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Outcome<GeneratedRegulation>>>, AppError> {
    let provider = &app_state.sqlite_provider;
    let users = provider.get_users().await?;
    let responses = provider.get_all_responses().await?;

    if !has_sufficient_data(&users, &responses) {
        warn!(
            users = users.len(),
            responses = responses.len(),
            "Skipping regulation generation."
        );
        return Ok(wrap_response(
            Outcome::warning(INSUFFICIENT_DATA),
            debug_params,
            None,
        ));
    }

    let content = app_state
        .regulation_generator
        .generate(&users, &responses)
        .await?;

    let debug_info = json!({ "users": users.len(), "responses": responses.len() });
    Ok(wrap_response(
        Outcome::success(
            "Guidelines Generated Successfully!",
            GeneratedRegulation { content },
        ),
        debug_params,
        Some(debug_info),
    ))
}

/// The most recently generated guidelines, newest first.
pub async fn recent_regulations_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<Regulation>>>, AppError> {
    let regulations = app_state
        .sqlite_provider
        .get_recent_regulations(RECENT_REGULATIONS_LIMIT)
        .await?;
    Ok(wrap_response(regulations, debug_params, None))
}

/// Writes the latest guidelines to the configured export file.
pub async fn export_regulation_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Outcome<ExportedRegulation>>>, AppError> {
    let Some(latest) = app_state.sqlite_provider.get_latest_regulation().await? else {
        return Ok(wrap_response(
            Outcome::warning("No guidelines have been generated yet."),
            debug_params,
            None,
        ));
    };

    let path = app_state.config.export_path.clone();
    export_regulation(Path::new(&path), &latest.content).await?;
    info!(regulation_id = latest.id, %path, "Guidelines saved to file.");

    Ok(wrap_response(
        Outcome::success(
            format!("Guidelines saved to '{path}'"),
            ExportedRegulation {
                path,
                regulation_id: latest.id,
            },
        ),
        debug_params,
        None,
    ))
}
