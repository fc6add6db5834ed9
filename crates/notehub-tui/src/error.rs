// ABOUTME: Application-wide error types.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] notehub_client::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid note: {0}")]
    Validation(String),

    #[error("No API token configured\n\nRun 'notehub setup', set NOTEHUB_TOKEN, or pass --token.")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, AppError>;
