//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the server:
//! configuration, error handling, the JSON-RPC protocol layer, the line
//! transport and the request loop.

pub mod builder;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use builder::McpServer;
pub use config::Config;
pub use error::{Error, Result};
pub use server::{Server, ServerState};
pub use transport::{LineTransport, StdioTransport, TransportError};
