//! Transport error types.
//!
//! Every variant is fatal: a stream that cannot be read or written ends the
//! session. Malformed input is not a transport error.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The input stream failed.
    #[error("Failed to read from input stream: {0}")]
    Read(#[source] std::io::Error),

    /// The output stream failed.
    #[error("Failed to write to output stream: {0}")]
    Write(#[source] std::io::Error),

    /// A response could not be encoded.
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransportError {
    /// Create a read error.
    pub fn read(source: std::io::Error) -> Self {
        Self::Read(source)
    }

    /// Create a write error.
    pub fn write(source: std::io::Error) -> Self {
        Self::Write(source)
    }
}
