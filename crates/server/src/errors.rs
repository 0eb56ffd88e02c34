use avethics::EthicsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the `avethics` library.
    Ethics(EthicsError),
    /// A malformed request that never reached the domain layer.
    BadRequest(String),
    /// An unknown page or resource.
    NotFound(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<EthicsError> for AppError {
    fn from(err: EthicsError) -> Self {
        AppError::Ethics(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Ethics(err) => {
                let status = match &err {
                    EthicsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    e if e.is_external_service() => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status == StatusCode::UNPROCESSABLE_ENTITY {
                    warn!("Validation failed: {err}");
                } else {
                    error!("EthicsError: {:?}", err);
                }
                (status, err.to_string())
            }
            AppError::BadRequest(message) => {
                warn!("Bad request: {message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
