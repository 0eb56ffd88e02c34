//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The store is opened once here and shared by all
//! request handlers for the lifetime of the process.

use crate::{config::AppConfig, session::SessionStore};
use avethics::{
    AiProvider, GeminiProvider, GenerationParams, RegulationGenerator, SqliteProvider,
};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The single store for users, responses, the forum, and regulations.
    pub sqlite_provider: Arc<SqliteProvider>,
    pub regulation_generator: Arc<RegulationGenerator>,
    /// Session id to user id, held in memory only.
    pub sessions: SessionStore,
}

/// Builds the shared application state from the configuration, using the
/// Gemini provider for regulation generation.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let api_key = config.api_key()?.to_string();
    let ai_provider = GeminiProvider::new(
        config.gemini_api_url.clone(),
        api_key,
        GenerationParams {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        },
    )?;
    build_app_state_with_provider(config, Box::new(ai_provider)).await
}

/// Builds the shared application state around an already constructed AI provider.
///
/// Opens the store at `db_url`, creating its parent directory and the schema
/// when they are missing.
pub async fn build_app_state_with_provider(
    config: AppConfig,
    ai_provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    if let Some(parent) = std::path::Path::new(&config.db_url)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    tracing::info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema exists on startup.
    sqlite_provider.initialize_schema().await?;

    let regulation_generator = RegulationGenerator::new(ai_provider, sqlite_provider.clone());

    Ok(AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        regulation_generator: Arc::new(regulation_generator),
        sessions: SessionStore::default(),
    })
}
