//! Error types for comment-sieve

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for comment-sieve
#[derive(Debug, Error)]
pub enum SieveError {
    /// Missing credential or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input did not contain a recognizable video id
    #[error("Could not extract a video id from '{0}'")]
    Extraction(String),

    /// Network failure talking to the API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error (HTTP {status}, {reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    /// Response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API returned an empty result list
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SieveError>,
    },
}

impl SieveError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SieveError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SieveError::Config(_)
            | SieveError::Toml(_)
            | SieveError::Validation(_)
            | SieveError::FileNotFound(_) => 2,
            SieveError::Extraction(_) => 3,
            SieveError::Transport(_) | SieveError::Api { .. } => 4,
            SieveError::Decode(_) => 5,
            SieveError::NotFound(_) => 6,
            SieveError::Io(_) | SieveError::Csv(_) => 7,
            SieveError::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<toml::de::Error> for SieveError {
    fn from(err: toml::de::Error) -> Self {
        SieveError::Toml(err.to_string())
    }
}

/// Result type alias for comment-sieve
pub type Result<T> = std::result::Result<T, SieveError>;
