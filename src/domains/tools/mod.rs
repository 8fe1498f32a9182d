//! Tools domain module.
//!
//! Tools are named capabilities that clients list with `tools/list` and run
//! with `tools/call`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - Tool, executor and result contracts
//! - `catalog.rs` - Name-keyed registry the dispatcher delegates to
//! - `registry.rs` - Built-in tool registration
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct deriving `Deserialize` + `JsonSchema`
//! 3. Implement the `Tool` trait
//! 4. Register it in `registry.rs`

mod catalog;
pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use catalog::ToolCatalog;
pub use error::{ToolError, ToolResult};
pub use handlers::*;
pub use registry::build_tool_catalog;
