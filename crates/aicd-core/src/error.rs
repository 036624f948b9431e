//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] aicd_storage::StorageError),

    #[error(transparent)]
    Api(#[from] aicd_client::ApiError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Message suitable for showing to the person who made the request
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Api(e) => aicd_client::handle_api_error(e),
            other => other.to_string(),
        }
    }
}

/// Input rejected before anything is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter some text or attach a file")]
    Empty,

    #[error("Text is too long! Maximum is {max} characters.")]
    TextTooLong { max: usize },

    #[error("File is too big! Maximum size is {}KB.", .max / 1024)]
    FileTooBig { max: usize },

    #[error("Please choose a PDF, Word document, or text file.")]
    UnsupportedFile,
}
