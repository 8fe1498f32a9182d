//! Tool Catalog - registration and name-keyed dispatch for tools.
//!
//! The catalog is filled once at startup and shared read-only afterwards.
//! It does not validate arguments; a tool's executor decides what it
//! accepts.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::error::{ToolError, ToolResult};
use super::handlers::{Tool, ToolDefinition, ToolExecutor, ToolInvocationResult, TypedExecutor};

struct ToolEntry {
    definition: ToolDefinition,
    executor: Box<dyn ToolExecutor>,
}

/// Registry of every tool the server exposes.
#[derive(Default)]
pub struct ToolCatalog {
    /// Entries in registration order.
    entries: Vec<ToolEntry>,

    /// Tool name to position in `entries`.
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `definition.name`.
    pub fn register(
        &mut self,
        definition: ToolDefinition,
        executor: impl ToolExecutor + 'static,
    ) -> ToolResult<()> {
        if self.index.contains_key(&definition.name) {
            return Err(ToolError::already_registered(definition.name));
        }

        info!("Registering tool: {}", definition.name);
        self.index
            .insert(definition.name.clone(), self.entries.len());
        self.entries.push(ToolEntry {
            definition,
            executor: Box::new(executor),
        });
        Ok(())
    }

    /// Register a typed tool, deriving its definition from its params.
    pub fn register_tool<T: Tool>(&mut self, tool: T) -> ToolResult<()> {
        self.register(T::definition(), TypedExecutor::new(tool))
    }

    /// All definitions, in registration order.
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.entries.iter().map(|entry| &entry.definition).collect()
    }

    /// Look up one definition by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position].definition)
    }

    /// Registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.definition.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the named tool with the given arguments.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolResult<ToolInvocationResult> {
        let Some(&position) = self.index.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        debug!("Invoking tool");
        self.entries[position].executor.execute(arguments).await
    }
}
