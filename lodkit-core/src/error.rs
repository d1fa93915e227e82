//! Error types for lodkit

use thiserror::Error;

/// Main error type for lodkit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Host operation failed: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for lodkit operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::InvalidArgument`]
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Shorthand for [`Error::Host`]
    pub fn host(message: impl Into<String>) -> Self {
        Error::Host(message.into())
    }
}
