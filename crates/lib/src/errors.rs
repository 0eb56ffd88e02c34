use thiserror::Error;

/// Custom error types for the survey, forum, and regulation services.
#[derive(Error, Debug)]
pub enum EthicsError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("Storage connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(String),
    #[error("Failed to export regulation: {0}")]
    Export(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl EthicsError {
    /// Shorthand for building a `Validation` error from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        EthicsError::Validation(message.into())
    }

    /// True for failures of the external text-generation service.
    pub fn is_external_service(&self) -> bool {
        matches!(
            self,
            EthicsError::ReqwestClientBuild(_)
                | EthicsError::AiRequest(_)
                | EthicsError::AiApi(_)
                | EthicsError::AiDeserialization(_)
        )
    }
}

impl From<turso::Error> for EthicsError {
    fn from(err: turso::Error) -> Self {
        EthicsError::StorageOperationFailed(err.to_string())
    }
}
