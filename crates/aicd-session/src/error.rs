//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] aicd_storage::StorageError),

    #[error("No storage backend configured")]
    NoBackends,

    #[error("Invalid session token: {0:?}")]
    InvalidToken(String),
}
