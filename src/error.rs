use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the documents API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        /// `message` or `error` field of the JSON error body, if any.
        message: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Build a status error from a failed response body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .filter(|message| !message.trim().is_empty());
        ApiError::Status { status, message }
    }

    /// HTTP status of the failure, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode(_) => None,
        }
    }
}

/// Reduce any API failure to the text shown to the user.
///
/// The server's own message wins; otherwise the error's display text is used.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status {
            message: Some(message),
            ..
        } => message.clone(),
        other => other.to_string(),
    }
}
