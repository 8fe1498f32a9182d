//! Server assembly.
//!
//! [`McpServer`] collects configuration, tools and extra methods, then
//! produces a [`Dispatcher`] with every built-in method registered. All
//! registration errors surface here, before the first line is read.

use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

use super::config::Config;
use super::error::Result;
use super::protocol::{
    DispatchResult, Dispatcher, InitializeMethod, ListResourcesMethod, MethodHandler,
    ReadResourceMethod,
};
use super::server::Server;
use super::transport::LineTransport;
use crate::domains::resources::build_resource_service;
use crate::domains::tools::{Tool, ToolCatalog, ToolDefinition, ToolExecutor, build_tool_catalog};

/// Builder for a fully wired server.
pub struct McpServer {
    config: Config,
    catalog: ToolCatalog,
    extensions: Vec<(String, Arc<dyn MethodHandler>)>,
}

impl McpServer {
    /// Create a builder holding the built-in tools.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = build_tool_catalog()?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a builder with no tools registered.
    pub fn empty(config: Config) -> Self {
        Self::with_catalog(config, ToolCatalog::new())
    }

    fn with_catalog(config: Config, catalog: ToolCatalog) -> Self {
        Self {
            config,
            catalog,
            extensions: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add a typed tool.
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Result<Self> {
        self.catalog.register_tool(tool)?;
        Ok(self)
    }

    /// Add a tool from an explicit definition and executor.
    pub fn with_executor(
        mut self,
        definition: ToolDefinition,
        executor: impl ToolExecutor + 'static,
    ) -> Result<Self> {
        self.catalog.register(definition, executor)?;
        Ok(self)
    }

    /// Add a method beyond the built-in set.
    ///
    /// Name clashes with built-in methods are reported by
    /// [`McpServer::build_dispatcher`].
    pub fn with_method(
        mut self,
        method: impl Into<String>,
        handler: impl MethodHandler + 'static,
    ) -> Self {
        self.extensions.push((method.into(), Arc::new(handler)));
        self
    }

    /// Build the routing table.
    pub fn build_dispatcher(self) -> Result<Dispatcher> {
        let resources = Arc::new(build_resource_service(&self.config, &self.catalog)?);
        let catalog = Arc::new(self.catalog);

        info!("Registered tools: {}", catalog.names().join(", "));

        let mut dispatcher = Dispatcher::with_catalog(catalog)?;
        dispatcher.register("initialize", InitializeMethod::new(self.config.server))?;
        dispatcher.register_fn("ping", empty_result)?;
        dispatcher.register_fn("notifications/initialized", empty_result)?;
        dispatcher.register("resources/list", ListResourcesMethod::new(resources.clone()))?;
        dispatcher.register("resources/read", ReadResourceMethod::new(resources))?;

        for (method, handler) in self.extensions {
            dispatcher.register_arc(method, handler)?;
        }

        Ok(dispatcher)
    }

    /// Build the dispatcher and bind it to a transport.
    pub fn serve<R, W>(self, transport: LineTransport<R, W>) -> Result<Server<R, W>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let dispatcher = self.build_dispatcher()?;
        Ok(Server::new(transport, dispatcher))
    }
}

async fn empty_result(_params: Option<Value>) -> DispatchResult<Value> {
    Ok(json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::protocol::{DispatchError, FnHandler, Request};
    use crate::domains::tools::ToolError;
    use crate::domains::tools::definitions::GetWeatherTool;

    #[test]
    fn test_builtin_methods_registered() {
        let dispatcher = McpServer::new(Config::default())
            .unwrap()
            .build_dispatcher()
            .unwrap();

        assert_eq!(
            dispatcher.methods(),
            vec![
                "initialize",
                "notifications/initialized",
                "ping",
                "resources/list",
                "resources/read",
                "tools/call",
                "tools/list",
            ]
        );
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let err = McpServer::new(Config::default())
            .unwrap()
            .with_tool(GetWeatherTool)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Tool(ToolError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_extension_clashing_with_builtin_rejected() {
        let err = McpServer::empty(Config::default())
            .with_method("ping", FnHandler::new(empty_result))
            .build_dispatcher()
            .err()
            .unwrap();
        assert!(matches!(err, Error::DuplicateMethod(ref m) if m == "ping"));
    }

    #[tokio::test]
    async fn test_extension_method_routed() {
        let dispatcher = McpServer::empty(Config::default())
            .with_method(
                "echo",
                FnHandler::new(|params: Option<Value>| async move {
                    params.ok_or_else(|| DispatchError::invalid_params("nothing to echo"))
                }),
            )
            .build_dispatcher()
            .unwrap();

        let request = Request::new(json!(7), "echo").with_params(json!({"a": 1}));
        let response = dispatcher.route(request).await;
        assert_eq!(response.result(), Some(&json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_empty_builder_lists_no_tools() {
        let dispatcher = McpServer::empty(Config::default())
            .build_dispatcher()
            .unwrap();
        let response = dispatcher.route(Request::new(json!(1), "tools/list")).await;
        assert_eq!(response.result(), Some(&json!({"tools": []})));
    }
}
