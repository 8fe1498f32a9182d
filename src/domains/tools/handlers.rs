//! Tool handler contracts.
//!
//! A tool is exposed to the catalog as a [`ToolDefinition`] plus a
//! [`ToolExecutor`]. Most tools implement the typed [`Tool`] trait instead,
//! which derives the input schema from a params struct and decodes the raw
//! arguments before the tool sees them.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ToolError, ToolResult};

// ============================================================================
// Definition and results
// ============================================================================

/// Metadata advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// JSON schema of the accepted arguments.
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// One item of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
        }
    }
}

/// Ordered content produced by one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    pub content: Vec<ToolContent>,

    /// Set when the tool reports a failure as content. The call still
    /// succeeds at the protocol level. Used by plugged-in executors.
    #[serde(rename = "isError", default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ToolInvocationResult {
    /// Create a successful tool result.
    pub fn success(content: Vec<ToolContent>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create a tool result flagged as a failure.
    pub fn error(content: Vec<ToolContent>) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Successful result with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![ToolContent::text(text)])
    }

    /// Text of the first content item, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ToolContent::as_text)
    }
}

// ============================================================================
// Executors
// ============================================================================

/// Executes a tool against raw JSON arguments.
///
/// Any mutable state a tool needs lives inside its executor.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, arguments: Value) -> ToolResult<ToolInvocationResult>;
}

/// A tool with typed parameters.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    /// Tool name as registered in the catalog.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send;

    /// Execute the tool logic.
    async fn call(&self, params: Self::Params) -> ToolResult<ToolInvocationResult>;

    /// Catalog metadata, with the schema derived from [`Tool::Params`].
    fn definition() -> ToolDefinition
    where
        Self: Sized,
    {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, schema_for_params::<Self::Params>())
    }
}

/// JSON schema for a params type, without the `$schema` meta member.
pub fn schema_for_params<P: JsonSchema>() -> Value {
    let mut schema = schemars::schema_for!(P).to_value();
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }
    schema
}

/// Adapts a [`Tool`] to the untyped [`ToolExecutor`] contract.
pub struct TypedExecutor<T>(T);

impl<T: Tool> TypedExecutor<T> {
    pub fn new(tool: T) -> Self {
        Self(tool)
    }
}

#[async_trait]
impl<T: Tool> ToolExecutor for TypedExecutor<T> {
    async fn execute(&self, arguments: Value) -> ToolResult<ToolInvocationResult> {
        let params: T::Params = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        self.0.call(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct GreetParams {
        /// Who to greet.
        name: String,
    }

    struct GreetTool;

    #[async_trait]
    impl Tool for GreetTool {
        const NAME: &'static str = "greet";
        const DESCRIPTION: &'static str = "Say hello";
        type Params = GreetParams;

        async fn call(&self, params: GreetParams) -> ToolResult<ToolInvocationResult> {
            Ok(ToolInvocationResult::text(format!("hello {}", params.name)))
        }
    }

    #[test]
    fn test_definition_derives_schema() {
        let definition = GreetTool::definition();
        assert_eq!(definition.name, "greet");
        assert_eq!(definition.input_schema["type"], json!("object"));
        assert!(definition.input_schema["properties"]["name"].is_object());
        assert_eq!(definition.input_schema["required"], json!(["name"]));
        assert!(definition.input_schema.get("$schema").is_none());
    }

    #[test]
    fn test_definition_serializes_camel_case() {
        let encoded = serde_json::to_value(GreetTool::definition()).unwrap();
        assert!(encoded.get("inputSchema").is_some());
        assert!(encoded.get("input_schema").is_none());
    }

    #[tokio::test]
    async fn test_typed_executor_decodes_arguments() {
        let executor = TypedExecutor::new(GreetTool);
        let result = executor.execute(json!({"name": "ada"})).await.unwrap();
        assert_eq!(result.first_text(), Some("hello ada"));
    }

    #[tokio::test]
    async fn test_typed_executor_rejects_bad_arguments() {
        let executor = TypedExecutor::new(GreetTool);
        let err = executor.execute(json!({"name": 42})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_result_wire_shape() {
        let encoded = serde_json::to_value(ToolInvocationResult::text("hi")).unwrap();
        assert_eq!(encoded, json!({"content": [{"type": "text", "text": "hi"}]}));

        let failed = ToolInvocationResult::error(vec![ToolContent::text("nope")]);
        let encoded = serde_json::to_value(failed).unwrap();
        assert_eq!(encoded["isError"], json!(true));
    }
}
