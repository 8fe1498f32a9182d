//! Resources domain module.
//!
//! Resources are read-only documents addressed by URI, listed with
//! `resources/list` and fetched with `resources/read`.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::build_resource_service;
pub use service::{ResourceContents, ResourceDescriptor, ResourceEntry, ResourceService};
