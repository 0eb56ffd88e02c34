//! # Application Configuration
//!
//! This module defines the configuration structure for the `avethics-server`
//! and loads it from an optional `config.yml` file and environment variables.
//! The text-generation API key is mandatory: without it the server refuses to
//! start.

use avethics::constants::{
    DEFAULT_DB_FILE, DEFAULT_EXPORT_FILE, DEFAULT_GEMINI_API_URL, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE,
};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// The environment variable holding the text-generation API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
    /// The text-generation API key is absent or empty.
    MissingApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::MissingApiKey => write!(
                f,
                "Please provide a valid Gemini API Key (set {API_KEY_ENV} or gemini_api_key in config.yml)."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The text-generation API key. Loaded from `GEMINI_API_KEY` env var.
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// The text-generation endpoint. Loaded from `GEMINI_API_URL` env var.
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Where "Save Guidelines to File" writes. Loaded from `EXPORT_PATH` env var.
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl AppConfig {
    /// The API key, which `get_config` guarantees is present and non-empty.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

fn default_port() -> u16 {
    8501
}

fn default_db_url() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_gemini_api_url() -> String {
    DEFAULT_GEMINI_API_URL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - An explicit `config_path_override` must exist; otherwise `config.yml` next
///   to the crate manifest is used when present.
/// - Top-level keys like `port` and `db_url` are overridden by `PORT` and `DB_URL`.
/// - Any key can also be set through `AVETHICS_...` variables (e.g. `AVETHICS_EXPORT_PATH`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let main_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => {
            let user_config_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            let content = read_and_substitute(&user_config_path)?;
            if content.is_some() {
                info!("Loading user-defined configuration from '{user_config_path}'.");
            }
            content
        }
    };
    if let Some(content) = main_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("AVETHICS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // A key substituted from an unset variable arrives as an empty string.
    if config.api_key().is_err() {
        config.gemini_api_key = env::var(API_KEY_ENV).ok();
    }
    config.api_key()?;

    Ok(config)
}
