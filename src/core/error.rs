//! Error types and handling for the server.
//!
//! This module defines a unified error type for startup and session
//! failures. Per-request failures never reach it: they are turned into
//! error responses by the dispatcher.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// The input or output stream failed.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// A method name was registered twice.
    #[error("Method already registered: {0}")]
    DuplicateMethod(String),
}
