//! Server orchestration.
//!
//! The server owns the transport and the dispatcher and runs the
//! read-dispatch-write loop on a single worker. A request's full cycle,
//! tool work included, completes and its response is flushed before the next
//! line is read, so responses come out in request order, one per line.

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use super::error::Result;
use super::protocol::{Dispatcher, Request, Response};
use super::transport::LineTransport;

/// Lifecycle of the request loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Serving requests.
    Running,
    /// Input ended or the transport failed. Terminal.
    Stopped,
}

/// The request loop.
pub struct Server<R, W> {
    transport: LineTransport<R, W>,
    dispatcher: Dispatcher,
    state: ServerState,
}

impl<R, W> Server<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a server ready to run.
    pub fn new(transport: LineTransport<R, W>, dispatcher: Dispatcher) -> Self {
        Self {
            transport,
            dispatcher,
            state: ServerState::Running,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run until the input ends.
    ///
    /// Returns `Ok` on end of input and the transport error if the stream
    /// fails. Either way the server is `Stopped` afterwards and will not read
    /// or write again.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Ready - serving {} methods over line-delimited JSON",
            self.dispatcher.methods().len()
        );

        while self.state == ServerState::Running {
            let line = match self.transport.read_request_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("End of input stream");
                    self.state = ServerState::Stopped;
                    break;
                }
                Err(e) => {
                    error!("Transport error: {}", e);
                    self.state = ServerState::Stopped;
                    return Err(e.into());
                }
            };

            let response = self.handle_line(&line).await;

            if let Err(e) = self.transport.write_response_line(&response).await {
                error!("Failed to send response: {}", e);
                self.state = ServerState::Stopped;
                return Err(e.into());
            }
        }

        info!("Server stopped");
        Ok(())
    }

    /// Produce the response for one raw input line.
    pub async fn handle_line(&self, line: &[u8]) -> Response {
        match Request::decode(line) {
            Ok(request) => {
                debug!(method = %request.method, id = %request.id, "Received request");
                self.dispatcher.route(request).await
            }
            Err(failure) => {
                warn!("Rejected input line: {}", failure.error.message);
                failure.into_response()
            }
        }
    }

    /// Give back the transport, e.g. to inspect what was written.
    pub fn into_transport(self) -> LineTransport<R, W> {
        self.transport
    }
}
