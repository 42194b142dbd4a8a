//! Common error types for the results viewer

use thiserror::Error;

/// Common result type for results viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the library and the service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested run or run file not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A document that must be valid JSON could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}
