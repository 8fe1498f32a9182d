//! Line Tool Server Library
//!
//! A tool server speaking line-delimited JSON-RPC over a single byte stream
//! (stdin/stdout by default). Each input line is one request; each request
//! gets exactly one response line, in request order.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the protocol layer (request
//!   decoding, method dispatch, failure mapping), the line transport and the
//!   request loop
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Named tools listed with `tools/list` and run with `tools/call`
//!   - **resources**: Read-only documents served by `resources/*`
//!
//! # Example
//!
//! ```rust,no_run
//! use line_tool_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let mut server = McpServer::new(config)?.serve(StdioTransport::stdio())?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
