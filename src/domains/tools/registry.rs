//! Tool Registry - registration of the built-in tools.
//!
//! When adding a new tool:
//! 1. Create the tool file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `build_tool_catalog()`

use super::catalog::ToolCatalog;
use super::definitions::GetWeatherTool;
use super::error::ToolResult;

/// Build a catalog holding every built-in tool.
pub fn build_tool_catalog() -> ToolResult<ToolCatalog> {
    let mut catalog = ToolCatalog::new();
    catalog.register_tool(GetWeatherTool)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tools() {
        let catalog = build_tool_catalog().unwrap();
        assert_eq!(catalog.names(), vec!["get_weather"]);

        for definition in catalog.list() {
            assert!(!definition.name.is_empty());
            assert!(!definition.description.is_empty());
            assert!(definition.input_schema.is_object());
        }
    }
}
