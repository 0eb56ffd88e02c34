use crate::{
    constants::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE},
    errors::EthicsError,
    providers::ai::AiProvider,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, error};

/// The header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    prompt: PromptText<'a>,
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct PromptText<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

/// Only the first candidate is read, so later ones may lack `output`
/// (e.g. a safety-filtered candidate).
#[derive(Deserialize, Debug)]
struct Candidate {
    output: Option<String>,
}

/// Sampling parameters sent with every request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini text-generation API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    params: GenerationParams,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        params: GenerationParams,
    ) -> Result<Self, EthicsError> {
        if api_key.trim().is_empty() {
            return Err(EthicsError::Configuration(
                "Gemini API key must not be empty".to_string(),
            ));
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(EthicsError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            params,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_url", &self.api_url)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, EthicsError> {
        let request_body = GeminiRequest {
            prompt: PromptText { text: prompt },
            temperature: self.params.temperature,
            max_output_tokens: self.params.max_output_tokens,
        };

        debug!(api_url = %self.api_url, prompt_len = prompt.len(), "--> Sending prompt to Gemini");
        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(EthicsError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Gemini API returned an error.");
            return Err(EthicsError::AiApi(format!("{status}: {error_text}")));
        }

        let body = response.text().await.map_err(EthicsError::AiRequest)?;
        parse_output(&body)
    }
}

/// Extracts `candidates[0].output` from a response body.
fn parse_output(body: &str) -> Result<String, EthicsError> {
    let gemini_response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| EthicsError::AiDeserialization(e.to_string()))?;

    let first = gemini_response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| EthicsError::AiDeserialization("response contained no candidates".into()))?;
    first.output.ok_or_else(|| {
        EthicsError::AiDeserialization("first candidate has no `output` field".into())
    })
}
