//! # Download Data Handlers
//!
//! CSV exports of the collected survey data.

use super::{AppError, AppState};
use avethics::export::{responses_to_csv, users_to_csv};
use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

pub async fn download_users_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.sqlite_provider.get_users().await?;
    Ok(csv_attachment("users.csv", users_to_csv(&users)?))
}

pub async fn download_responses_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let responses = app_state.sqlite_provider.get_all_responses().await?;
    Ok(csv_attachment("responses.csv", responses_to_csv(&responses)?))
}
