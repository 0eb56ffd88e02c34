//! # Data Export
//!
//! Writes the latest regulation to a plain text file and renders the collected
//! survey data as CSV for the Download Data page.

use crate::{
    errors::EthicsError,
    types::{SurveyResponse, User},
};
use std::path::Path;
use tracing::info;

/// Writes `content` verbatim to `path`, replacing any existing file.
pub async fn export_regulation(path: &Path, content: &str) -> Result<(), EthicsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    info!(path = %path.display(), "Exported regulation.");
    Ok(())
}

pub fn users_to_csv(users: &[User]) -> Result<String, EthicsError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "name", "age", "gender", "knows_autonomous", "created_at"])?;
    for user in users {
        writer.write_record([
            user.id.to_string(),
            user.name.clone(),
            user.age.to_string(),
            user.gender.to_string(),
            user.knows_autonomous.to_string(),
            user.created_at.clone(),
        ])?;
    }
    finish(writer)
}

pub fn responses_to_csv(responses: &[SurveyResponse]) -> Result<String, EthicsError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "user_id", "question", "response"])?;
    for response in responses {
        writer.write_record([
            response.id.to_string(),
            response.user_id.to_string(),
            response.question.clone(),
            response.answer.clone(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, EthicsError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| EthicsError::Export(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| EthicsError::Export(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
