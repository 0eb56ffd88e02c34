//! # Questionnaire Handlers

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams, Outcome, SessionContext};
use crate::types::DETAILS_REQUIRED;
use avethics::{questionnaire::find_question, EthicsError};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct QuestionnaireSubmission {
    /// Answers keyed by question label (`Q1`…`Q6`).
    pub responses: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SavedResponses {
    pub saved: usize,
}

/// Checks every answer against the questionnaire catalogue.
fn validate_submission(responses: &BTreeMap<String, String>) -> Result<(), EthicsError> {
    if responses.is_empty() {
        return Err(EthicsError::validation("No answers were submitted."));
    }
    for (label, answer) in responses {
        let question = find_question(label)
            .ok_or_else(|| EthicsError::validation(format!("Unknown question '{label}'.")))?;
        if !question.accepts(answer) {
            return Err(EthicsError::validation(format!(
                "'{answer}' is not an option for {label}."
            )));
        }
    }
    Ok(())
}

pub async fn submit_questionnaire_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    debug_params: Query<DebugParams>,
    Json(payload): Json<QuestionnaireSubmission>,
) -> Result<Json<ApiResponse<Outcome<SavedResponses>>>, AppError> {
    let Some(user_id) = session.user_id else {
        return Ok(wrap_response(
            Outcome::warning(DETAILS_REQUIRED),
            debug_params,
            None,
        ));
    };

    validate_submission(&payload.responses)?;
    let saved = app_state
        .sqlite_provider
        .insert_responses(user_id, &payload.responses)
        .await?;
    info!(user_id, saved, "Questionnaire submitted.");

    let labels: Vec<&String> = payload.responses.keys().collect();
    let debug_info = json!({ "user_id": user_id, "labels": labels });
    Ok(wrap_response(
        Outcome::success("Responses saved!", SavedResponses { saved }),
        debug_params,
        Some(debug_info),
    ))
}
