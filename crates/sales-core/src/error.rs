//! Error types for the sales-core library.

use thiserror::Error;

/// Main error type for the sales library.
#[derive(Error, Debug)]
pub enum SalesError {
    /// The input could not be turned into lines.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised before extraction starts.
///
/// Extraction and resolution themselves never fail: an unmatched field is
/// `N/A` and an ambiguous name is settled by the resolver.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input contains no non-blank line.
    #[error("input contains no records")]
    Empty,

    /// The input is not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
}

/// Result type for the sales library.
pub type Result<T> = std::result::Result<T, SalesError>;
