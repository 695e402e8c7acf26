//! Error types for cs-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for cs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cs-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (local scan or local write failures)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid exclude pattern
    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(String),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found (directory, container or object)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Unknown provider identifier
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPattern(_) => 2,        // UsageError
            Error::InvalidEndpoint(_) => 2,       // UsageError
            Error::UnsupportedProvider(_) => 2,   // UsageError
            Error::Network(_) => 3,               // NetworkError
            Error::Auth(_) => 4,                  // AuthError
            Error::NotFound(_) | Error::Io(_) => 5, // NotFound
            _ => 1,                               // GeneralError
        }
    }
}
