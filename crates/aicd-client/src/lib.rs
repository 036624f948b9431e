//! AICD API Client
//!
//! Thin HTTP client for the detection service:
//! - Every call attaches the API key and, when known, the session token
//! - Tokens echoed back by the server are persisted for later calls
//! - An unknown-session reply evicts the stored token
//! - Failures fold into a user-presentable message via [`handle_api_error`]

mod client;
mod config;
mod error;
mod hooks;
mod status;
mod upload;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{handle_api_error, ApiError};
pub use hooks::{
    RequestHook, ResponseHook, SessionHook, TracingHook, SESSION_NOT_FOUND, X_API_KEY,
    X_SESSION_ID,
};
pub use status::{check_backend_connection, BackendStatus};
pub use upload::{DocumentKind, Upload};

pub type Result<T> = std::result::Result<T, ApiError>;
