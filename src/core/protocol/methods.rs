//! Built-in method handlers.
//!
//! `tools/*` delegate to the [`ToolCatalog`], `resources/*` to the
//! [`ResourceService`]. `initialize` reports the server identity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::PROTOCOL_VERSION;
use super::dispatcher::{DispatchError, DispatchResult, MethodHandler};
use crate::core::config::ServerConfig;
use crate::domains::resources::{ResourceContents, ResourceDescriptor, ResourceService};
use crate::domains::tools::{ToolCatalog, ToolDefinition};

// ============================================================================
// tools/list, tools/call
// ============================================================================

#[derive(Serialize)]
struct ListToolsResult<'a> {
    tools: Vec<&'a ToolDefinition>,
}

/// `tools/list`: params are ignored.
pub struct ListToolsMethod {
    catalog: Arc<ToolCatalog>,
}

impl ListToolsMethod {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl MethodHandler for ListToolsMethod {
    async fn handle(&self, _params: Option<Value>) -> DispatchResult<Value> {
        let result = ListToolsResult {
            tools: self.catalog.list(),
        };
        Ok(serde_json::to_value(result)?)
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// `tools/call`: params `{"name", "arguments"}`.
pub struct CallToolMethod {
    catalog: Arc<ToolCatalog>,
}

impl CallToolMethod {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl MethodHandler for CallToolMethod {
    async fn handle(&self, params: Option<Value>) -> DispatchResult<Value> {
        let params = params.ok_or_else(|| DispatchError::invalid_params("Missing params"))?;
        if !params.is_object() {
            return Err(DispatchError::invalid_params("tools/call params must be an object"));
        }
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| DispatchError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        info!("Calling tool: {}", params.name);
        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        let result = self.catalog.invoke(&params.name, arguments).await?;

        Ok(serde_json::to_value(result)?)
    }
}

// ============================================================================
// initialize
// ============================================================================

/// `initialize`: reports protocol version, capabilities and server info.
///
/// Client params are accepted as-is; there is no version negotiation.
pub struct InitializeMethod {
    server: ServerConfig,
}

impl InitializeMethod {
    pub fn new(server: ServerConfig) -> Self {
        Self { server }
    }
}

#[async_trait]
impl MethodHandler for InitializeMethod {
    async fn handle(&self, _params: Option<Value>) -> DispatchResult<Value> {
        info!("Processing initialize request");

        let mut result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": self.server.name,
                "version": self.server.version
            }
        });

        if let Some(instructions) = &self.server.instructions {
            result["instructions"] = json!(instructions);
        }

        Ok(result)
    }
}

// ============================================================================
// resources/list, resources/read
// ============================================================================

#[derive(Serialize)]
struct ListResourcesResult<'a> {
    resources: Vec<&'a ResourceDescriptor>,
}

#[derive(Serialize)]
struct ReadResourceResult {
    contents: Vec<ResourceContents>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// `resources/list`: params are ignored.
pub struct ListResourcesMethod {
    service: Arc<ResourceService>,
}

impl ListResourcesMethod {
    pub fn new(service: Arc<ResourceService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MethodHandler for ListResourcesMethod {
    async fn handle(&self, _params: Option<Value>) -> DispatchResult<Value> {
        let result = ListResourcesResult {
            resources: self.service.list(),
        };
        Ok(serde_json::to_value(result)?)
    }
}

/// `resources/read`: params `{"uri"}`.
pub struct ReadResourceMethod {
    service: Arc<ResourceService>,
}

impl ReadResourceMethod {
    pub fn new(service: Arc<ResourceService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MethodHandler for ReadResourceMethod {
    async fn handle(&self, params: Option<Value>) -> DispatchResult<Value> {
        let params = params.ok_or_else(|| DispatchError::invalid_params("Missing params"))?;
        let params: ReadResourceParams = serde_json::from_value(params).map_err(|e| {
            DispatchError::invalid_params(format!("Invalid resources/read params: {}", e))
        })?;

        info!("Reading resource: {}", params.uri);
        let contents = self.service.read(&params.uri)?;

        Ok(serde_json::to_value(ReadResourceResult {
            contents: vec![contents],
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::resources::{ResourceDefinition, ResourceEntry};
    use crate::domains::tools::build_tool_catalog;

    fn catalog() -> Arc<ToolCatalog> {
        Arc::new(build_tool_catalog().unwrap())
    }

    #[tokio::test]
    async fn test_list_tools() {
        let result = ListToolsMethod::new(catalog()).handle(None).await.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], json!("get_weather"));
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_call_tool() {
        let params = json!({"name": "get_weather", "arguments": {"city": "osaka"}});
        let result = CallToolMethod::new(catalog())
            .handle(Some(params))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["type"], json!("text"));
        assert_eq!(result["content"][0]["text"], json!("osaka: 曇り, 23°C, 65%"));
    }

    #[tokio::test]
    async fn test_call_tool_missing_params() {
        let err = CallToolMethod::new(catalog()).handle(None).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_call_tool_missing_name() {
        let err = CallToolMethod::new(catalog())
            .handle(Some(json!({"arguments": {}})))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_call_tool_params_must_be_object() {
        let err = CallToolMethod::new(catalog())
            .handle(Some(json!(["get_weather", {"city": "tokyo"}])))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = CallToolMethod::new(catalog())
            .handle(Some(json!({"name": "teleport"})))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::ToolNotFound(ref name) if name == "teleport"));
    }

    #[tokio::test]
    async fn test_call_tool_without_arguments_uses_empty_object() {
        // get_weather requires a city, so an empty object is an argument error
        let err = CallToolMethod::new(catalog())
            .handle(Some(json!({"name": "get_weather"})))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_initialize() {
        let mut server = Config::default().server;
        server.instructions = Some("Ask about the weather".to_string());

        let result = InitializeMethod::new(server.clone())
            .handle(Some(json!({"protocolVersion": PROTOCOL_VERSION})))
            .await
            .unwrap();

        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!(server.name));
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["instructions"], json!("Ask about the weather"));
    }

    #[tokio::test]
    async fn test_initialize_without_instructions() {
        let result = InitializeMethod::new(Config::default().server)
            .handle(None)
            .await
            .unwrap();
        assert!(result.get("instructions").is_none());
    }

    struct ReadmeResource;

    impl ResourceDefinition for ReadmeResource {
        const URI: &'static str = "mcp://test/readme";
        const NAME: &'static str = "Readme";
        const DESCRIPTION: &'static str = "Test readme";
        const MIME_TYPE: &'static str = "text/markdown";
    }

    fn resources() -> Arc<ResourceService> {
        let mut service = ResourceService::new();
        service
            .register(ResourceEntry::from_definition::<ReadmeResource>(
                "# Hello".to_string(),
            ))
            .unwrap();
        Arc::new(service)
    }

    #[tokio::test]
    async fn test_list_resources() {
        let result = ListResourcesMethod::new(resources())
            .handle(None)
            .await
            .unwrap();
        assert_eq!(result["resources"][0]["uri"], json!("mcp://test/readme"));
        assert_eq!(result["resources"][0]["mimeType"], json!("text/markdown"));
    }

    #[tokio::test]
    async fn test_read_resource() {
        let result = ReadResourceMethod::new(resources())
            .handle(Some(json!({"uri": "mcp://test/readme"})))
            .await
            .unwrap();
        assert_eq!(result["contents"][0]["text"], json!("# Hello"));
    }

    #[tokio::test]
    async fn test_read_unknown_resource() {
        let err = ReadResourceMethod::new(resources())
            .handle(Some(json!({"uri": "mcp://test/nothing"})))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_protocol_error().message,
            "Resource not found: mcp://test/nothing"
        );
    }
}
