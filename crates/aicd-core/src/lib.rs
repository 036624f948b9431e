//! AICD Core
//!
//! Wires storage, session and the API client into a single [`Detector`]
//! and applies the same input limits the detection form enforces.

mod config;
mod detector;
mod error;
mod limits;

pub use config::Config;
pub use detector::Detector;
pub use error::{CoreError, InputError};
pub use limits::{check_text, check_upload, MAX_TEXT_CHARS, MAX_UPLOAD_BYTES};

// Re-export core components
pub use aicd_client::{
    check_backend_connection, handle_api_error, ApiClient, ApiError, BackendStatus, ClientConfig,
    DocumentKind, Upload,
};
pub use aicd_session::{SessionError, SessionStore, SessionToken};
pub use aicd_storage::{Database, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
