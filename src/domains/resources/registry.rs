//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `build_resource_service()`

use chrono::Utc;

use super::definitions::ServerInfoResource;
use super::error::ResourceError;
use super::service::{ResourceEntry, ResourceService};
use crate::core::config::Config;
use crate::domains::tools::ToolCatalog;

/// Build the resource service with every registered resource.
pub fn build_resource_service(
    config: &Config,
    tools: &ToolCatalog,
) -> Result<ResourceService, ResourceError> {
    let mut service = ResourceService::new();

    let server_info = ServerInfoResource::render(&config.server, &tools.names(), Utc::now())?;
    service.register(ResourceEntry::from_definition::<ServerInfoResource>(
        server_info,
    ))?;

    Ok(service)
}
