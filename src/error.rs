//! Error handling for crumbs

use thiserror::Error;

/// Main error type for crumbs operations
#[derive(Error, Debug)]
pub enum CookieError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Cookie store is unavailable")]
    Unavailable,
}

/// Result type alias for crumbs operations
pub type Result<T> = std::result::Result<T, CookieError>;
