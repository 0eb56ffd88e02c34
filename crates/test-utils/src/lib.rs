use anyhow::Result;
use async_trait::async_trait;
use avethics::{
    providers::ai::AiProvider,
    types::{Gender, KnowsAutonomous, NewUser},
    EthicsError, SqliteProvider,
};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Test Setup ---

/// A helper struct to manage store creation for each test.
pub struct TestSetup {
    pub provider: SqliteProvider,
}

impl TestSetup {
    /// Creates a new, isolated in-memory store and initializes the schema.
    pub async fn new() -> Result<Self> {
        let provider = SqliteProvider::new(":memory:").await?;
        provider.initialize_schema().await?;
        Ok(Self { provider })
    }
}

/// Inserts a user with one answer per entry of `answers`.
pub async fn seed_respondent(
    provider: &SqliteProvider,
    name: &str,
    answers: &[(&str, &str)],
) -> Result<i64> {
    let user_id = provider.insert_user(new_user(name)).await?;
    let answers: BTreeMap<String, String> = answers
        .iter()
        .map(|(q, a)| (q.to_string(), a.to_string()))
        .collect();
    provider.insert_responses(user_id, &answers).await?;
    Ok(user_id)
}

pub fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        age: 30,
        gender: Gender::Female,
        knows_autonomous: KnowsAutonomous::Yes,
    }
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    response: Arc<Mutex<Result<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    /// A provider that answers every prompt with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(response.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with an API error.
    pub fn failing(message: &str) -> Self {
        let provider = Self::new("");
        provider.set_error(message);
        provider
    }

    pub fn set_response(&self, response: &str) {
        *self.response.lock().unwrap() = Ok(response.to_string());
    }

    pub fn set_error(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new("Mock guidelines.")
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, EthicsError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(EthicsError::AiApi)
    }
}
