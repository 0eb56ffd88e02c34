//! # Regulation Generator
//!
//! Summarizes the collected questionnaire data into an ethical-guideline
//! document through a single call to the text-generation service, then stores
//! the result.

use crate::{
    errors::EthicsError,
    prompts::regulation::build_regulation_prompt,
    providers::{ai::AiProvider, db::sqlite::SqliteProvider},
    types::{SurveyResponse, User},
};
use tracing::{error, info};

/// Generation needs at least one user profile and one response.
pub fn has_sufficient_data(users: &[User], responses: &[SurveyResponse]) -> bool {
    !users.is_empty() && !responses.is_empty()
}

#[derive(Clone, Debug)]
pub struct RegulationGenerator {
    ai_provider: Box<dyn AiProvider>,
    storage: SqliteProvider,
}

impl RegulationGenerator {
    pub fn new(ai_provider: Box<dyn AiProvider>, storage: SqliteProvider) -> Self {
        Self {
            ai_provider,
            storage,
        }
    }

    /// Builds the prompt, calls the provider once, and persists the text.
    ///
    /// On any provider failure the error is returned and nothing is stored.
    pub async fn generate(
        &self,
        users: &[User],
        responses: &[SurveyResponse],
    ) -> Result<String, EthicsError> {
        let prompt = build_regulation_prompt(users, responses);
        info!(
            users = users.len(),
            responses = responses.len(),
            "Requesting regulation generation."
        );

        let text = self.ai_provider.generate(&prompt).await.map_err(|e| {
            error!("Regulation generation failed: {e}");
            e
        })?;

        self.storage.store_regulation(&text).await?;
        Ok(text)
    }
}
