//! Transport layer for the server.
//!
//! A single bidirectional byte stream framed as one JSON object per line.
//! [`LineTransport`] works over any async buffered reader and writer;
//! [`StdioTransport`] binds it to the process standard streams.

mod error;
mod line;

pub use error::{TransportError, TransportResult};
pub use line::{LineTransport, StdioTransport};
