//! Line framing over a bidirectional byte stream.
//!
//! One request per input line, one response per output line. Every write is
//! flushed so the client sees the response immediately.

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tracing::trace;

use super::{TransportError, TransportResult};
use crate::core::protocol::Response;

/// Transport over process stdin/stdout.
pub type StdioTransport = LineTransport<BufReader<Stdin>, Stdout>;

/// Line-delimited transport over any buffered reader and writer.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
    buffer: Vec<u8>,
}

impl StdioTransport {
    /// Bind the process standard streams.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buffer: Vec::new(),
        }
    }

    /// Wait for the next request line.
    ///
    /// Returns the raw line without its terminator, or `None` once the input
    /// ends. Blank lines are returned as-is; every line is owed a response.
    pub async fn read_request_line(&mut self) -> TransportResult<Option<Vec<u8>>> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .await
            .map_err(TransportError::read)?;

        if read == 0 {
            return Ok(None);
        }

        while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
            self.buffer.pop();
        }

        trace!("Received line: {}", String::from_utf8_lossy(&self.buffer));
        Ok(Some(self.buffer.clone()))
    }

    /// Write one response line and flush it.
    pub async fn write_response_line(&mut self, response: &Response) -> TransportResult<()> {
        let mut encoded = serde_json::to_vec(response)?;
        encoded.push(b'\n');

        trace!("Sending line: {}", String::from_utf8_lossy(&encoded));
        self.writer
            .write_all(&encoded)
            .await
            .map_err(TransportError::write)?;
        self.writer.flush().await.map_err(TransportError::write)?;
        Ok(())
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
