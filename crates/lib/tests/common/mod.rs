#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the `avethics` integration tests: tracing setup, an
//! isolated in-memory store, seed data, and a scripted AI provider.

use async_trait::async_trait;
use avethics::{
    providers::ai::AiProvider,
    types::{Gender, KnowsAutonomous, NewUser},
    EthicsError, SqliteProvider,
};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

/// Creates an isolated in-memory store with the schema in place.
pub async fn test_provider() -> SqliteProvider {
    setup_tracing();
    let provider = SqliteProvider::new(":memory:")
        .await
        .expect("Failed to create SqliteProvider");
    provider
        .initialize_schema()
        .await
        .expect("Failed to initialize schema");
    provider
}

pub fn new_user(name: &str, age: i64) -> NewUser {
    NewUser {
        name: name.to_string(),
        age,
        gender: Gender::Other,
        knows_autonomous: KnowsAutonomous::Yes,
    }
}

pub async fn seed_user(provider: &SqliteProvider, name: &str) -> i64 {
    provider
        .insert_user(new_user(name, 30))
        .await
        .expect("Failed to insert user")
}

// --- Mock AI Provider for Logic Testing ---

/// Returns the queued responses in order and records every prompt it receives.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<String>>>,
    responses: Arc<RwLock<Vec<Result<String, String>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.call_history.read().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, EthicsError> {
        self.call_history.write().unwrap().push(prompt.to_string());
        match self.responses.write().unwrap().pop() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(EthicsError::AiApi(message)),
            None => Err(EthicsError::AiApi(
                "MockAiProvider: no more responses queued".to_string(),
            )),
        }
    }
}
