//! Client error types and their user-facing messages

use serde_json::Value;
use thiserror::Error;

pub const MSG_BAD_REQUEST: &str = "Bad request - check your input";
pub const MSG_INVALID_API_KEY: &str = "Invalid API key";
pub const MSG_NOT_FOUND: &str = "Page not found";
pub const MSG_FILE_TOO_BIG: &str = "File too big (max 500KB)";
pub const MSG_SERVER_ERROR: &str = "Server error";
pub const MSG_UNKNOWN_STATUS: &str = "Something went wrong";
pub const MSG_NO_RESPONSE: &str = "Cannot connect to server. Check your internet.";
pub const MSG_UNKNOWN: &str = "Unknown error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("Server responded with status {status}")]
    Server {
        status: u16,
        /// The `error` field of the body, when there was one
        message: Option<String>,
        body: Value,
    },

    /// The request went out but no response came back
    #[error("No response from server: {0}")]
    Transport(String),

    /// The request could not be built or sent
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    pub(crate) fn server(status: u16, body: Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        ApiError::Server {
            status,
            message,
            body,
        }
    }

    /// Status code of a server error, `None` when no response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Fold any client failure into a message fit for an end user.
///
/// A server-supplied `error` string wins over the fixed per-status text.
pub fn handle_api_error(err: &ApiError) -> String {
    match err {
        ApiError::Server {
            status, message, ..
        } => {
            if let Some(message) = message {
                return message.clone();
            }

            match status {
                400 => MSG_BAD_REQUEST,
                401 => MSG_INVALID_API_KEY,
                404 => MSG_NOT_FOUND,
                413 => MSG_FILE_TOO_BIG,
                500 => MSG_SERVER_ERROR,
                _ => MSG_UNKNOWN_STATUS,
            }
            .to_string()
        }
        ApiError::Transport(_) => MSG_NO_RESPONSE.to_string(),
        ApiError::Request(message) if message.trim().is_empty() => MSG_UNKNOWN.to_string(),
        ApiError::Request(message) => message.clone(),
    }
}
