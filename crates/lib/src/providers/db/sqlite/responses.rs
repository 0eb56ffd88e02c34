//! Questionnaire responses.

use super::{sql, SqliteProvider};
use crate::{errors::EthicsError, types::SurveyResponse};
use std::collections::BTreeMap;
use tracing::{error, info};
use turso::{params, Connection, Row};

impl SqliteProvider {
    /// Inserts one response row per entry of `responses`, in map order.
    ///
    /// The whole submission is written in a single transaction: a blank label
    /// anywhere in the batch leaves no rows behind. Submitting again appends a
    /// second set of rows; nothing is deduplicated.
    pub async fn insert_responses(
        &self,
        user_id: i64,
        responses: &BTreeMap<String, String>,
    ) -> Result<usize, EthicsError> {
        if responses.is_empty() {
            return Ok(0);
        }

        let conn = self.connect()?;
        conn.execute("BEGIN TRANSACTION", ()).await?;
        if let Err(e) = insert_all(&conn, user_id, responses).await {
            error!(user_id, "Rolling back questionnaire submission: {e}");
            if let Err(rollback_err) = conn.execute("ROLLBACK", ()).await {
                error!(user_id, "Rollback failed: {rollback_err}");
            }
            return Err(e);
        }
        conn.execute("COMMIT", ()).await?;

        info!(user_id, count = responses.len(), "Inserted questionnaire responses.");
        Ok(responses.len())
    }

    pub async fn get_responses_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<SurveyResponse>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_RESPONSES_BY_USER, params![user_id])
            .await?;
        let mut responses = Vec::new();
        while let Some(row) = rows.next().await? {
            responses.push(response_from_row(&row)?);
        }
        Ok(responses)
    }

    /// Returns every stored response in insertion order.
    pub async fn get_all_responses(&self) -> Result<Vec<SurveyResponse>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql::SELECT_RESPONSES, ()).await?;
        let mut responses = Vec::new();
        while let Some(row) = rows.next().await? {
            responses.push(response_from_row(&row)?);
        }
        Ok(responses)
    }
}

async fn insert_all(
    conn: &Connection,
    user_id: i64,
    responses: &BTreeMap<String, String>,
) -> Result<(), EthicsError> {
    for (question, answer) in responses {
        if question.trim().is_empty() {
            return Err(EthicsError::validation("Question label cannot be empty."));
        }
        conn.execute(
            sql::INSERT_RESPONSE,
            params![user_id, question.clone(), answer.clone()],
        )
        .await?;
    }
    Ok(())
}

fn response_from_row(row: &Row) -> Result<SurveyResponse, EthicsError> {
    Ok(SurveyResponse {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
    })
}
