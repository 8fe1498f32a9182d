//! Method dispatcher.
//!
//! Maps method names to handlers. The table is filled once at startup and
//! only read while requests are served. Handler failures are typed
//! [`DispatchError`]s; the mapping from failure kind to wire code lives in
//! [`DispatchError::to_protocol_error`] and nowhere else.

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use super::{ProtocolError, Request, Response, methods};
use crate::core::error::{Error, Result};
use crate::domains::resources::ResourceError;
use crate::domains::tools::{ToolCatalog, ToolError};

/// Result type for method handlers.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

/// Typed failure raised by a method handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is registered under this method name.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// `tools/call` named a tool the catalog does not hold.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The handler rejected its params.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The handler or a tool failed. The detail stays in the logs.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wire representation of this failure.
    pub fn to_protocol_error(&self) -> ProtocolError {
        match self {
            Self::MethodNotFound(method) => ProtocolError::method_not_found(method),
            Self::ToolNotFound(name) => ProtocolError::tool_not_found(name),
            Self::InvalidParams(msg) => ProtocolError::invalid_params(msg.clone()),
            Self::Internal(_) => ProtocolError::internal(),
        }
    }
}

impl From<ToolError> for DispatchError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => Self::ToolNotFound(name),
            ToolError::InvalidArguments(msg) => Self::InvalidParams(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ResourceError> for DispatchError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(uri) => {
                Self::InvalidParams(format!("Resource not found: {}", uri))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serialization failed: {}", err))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// A handler for one method.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle the request params. The dispatcher never inspects them.
    async fn handle(&self, params: Option<Value>) -> DispatchResult<Value>;
}

/// Adapter turning an async closure into a [`MethodHandler`].
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> MethodHandler for FnHandler<F>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = DispatchResult<Value>> + Send,
{
    async fn handle(&self, params: Option<Value>) -> DispatchResult<Value> {
        (self.0)(params).await
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Routing table from method name to handler.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Arc<dyn MethodHandler>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher serving `tools/list` and `tools/call` from the
    /// given catalog.
    pub fn with_catalog(catalog: Arc<ToolCatalog>) -> Result<Self> {
        let mut dispatcher = Self::new();
        dispatcher.register("tools/list", methods::ListToolsMethod::new(catalog.clone()))?;
        dispatcher.register("tools/call", methods::CallToolMethod::new(catalog))?;
        Ok(dispatcher)
    }

    /// Register a handler. Registering the same method twice is an error.
    pub fn register(
        &mut self,
        method: impl Into<String>,
        handler: impl MethodHandler + 'static,
    ) -> Result<()> {
        self.register_arc(method, Arc::new(handler))
    }

    /// Register an already shared handler.
    pub fn register_arc(
        &mut self,
        method: impl Into<String>,
        handler: Arc<dyn MethodHandler>,
    ) -> Result<()> {
        let method = method.into();
        if self.handlers.contains_key(&method) {
            return Err(Error::DuplicateMethod(method));
        }
        debug!("Registering method: {}", method);
        self.handlers.insert(method, handler);
        Ok(())
    }

    /// Register an async closure as a handler.
    pub fn register_fn<F, Fut>(&mut self, method: impl Into<String>, f: F) -> Result<()>
    where
        F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DispatchResult<Value>> + Send + 'static,
    {
        self.register(method, FnHandler::new(f))
    }

    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Route a request to its handler and build the response.
    ///
    /// Always yields a response: unknown methods, handler errors and handler
    /// panics all become error responses carrying the request id.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn route(&self, request: Request) -> Response {
        let Request { id, method, params } = request;

        let Some(handler) = self.handlers.get(&method) else {
            warn!("Unknown method: {}", method);
            return Response::error(id, DispatchError::MethodNotFound(method).to_protocol_error());
        };

        match AssertUnwindSafe(handler.handle(params)).catch_unwind().await {
            Ok(Ok(result)) => Response::success(id, result),
            Ok(Err(err)) => {
                match &err {
                    DispatchError::Internal(detail) => error!("Handler failed: {}", detail),
                    other => warn!("Request rejected: {}", other),
                }
                Response::error(id, err.to_protocol_error())
            }
            Err(panic) => {
                error!("Handler panicked: {}", panic_message(panic.as_ref()));
                Response::error(id, ProtocolError::internal())
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}
