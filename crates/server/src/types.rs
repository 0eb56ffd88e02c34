use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// The result of a form submission.
///
/// A `Warning` is a visible, non-fatal refusal (e.g. posting before submitting
/// user details); nothing is written when one is returned.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { message: String, data: T },
    Warning { message: String },
}

impl<T> Outcome<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Outcome::Success {
            message: message.into(),
            data,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Outcome::Warning {
            message: message.into(),
        }
    }
}

/// Warning shown when an action needs a session user that does not exist yet.
pub const DETAILS_REQUIRED: &str = "Please submit your details first.";
pub const DETAILS_REQUIRED_TO_POST: &str =
    "Please submit your details on the User Details page to post.";
pub const DETAILS_REQUIRED_TO_COMMENT: &str = "Please submit your details to comment.";
pub const INSUFFICIENT_DATA: &str = "Insufficient data to generate regulations.";
