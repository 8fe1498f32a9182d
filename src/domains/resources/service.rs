//! Resource service implementation.
//!
//! The ResourceService holds the resources registered at startup and
//! answers `resources/list` and `resources/read`. Like the tool catalog it
//! is never mutated once the server is running.

use serde::Serialize;
use tracing::info;

use super::definitions::ResourceDefinition;
use super::error::ResourceError;

/// Metadata advertised by `resources/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// Contents returned by `resources/read`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub descriptor: ResourceDescriptor,

    /// The text served on read.
    pub text: String,
}

impl ResourceEntry {
    /// Build an entry from a definition and its rendered text.
    pub fn from_definition<R: ResourceDefinition>(text: String) -> Self {
        Self {
            descriptor: ResourceDescriptor {
                uri: R::URI.to_string(),
                name: R::NAME.to_string(),
                description: R::DESCRIPTION.to_string(),
                mime_type: R::MIME_TYPE.to_string(),
            },
            text,
        }
    }
}

/// Service for listing and reading resources.
#[derive(Debug, Default)]
pub struct ResourceService {
    entries: Vec<ResourceEntry>,
}

impl ResourceService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource. URIs must be unique.
    pub fn register(&mut self, entry: ResourceEntry) -> Result<(), ResourceError> {
        if self
            .entries
            .iter()
            .any(|existing| existing.descriptor.uri == entry.descriptor.uri)
        {
            return Err(ResourceError::already_registered(entry.descriptor.uri));
        }

        info!("Registering resource: {}", entry.descriptor.uri);
        self.entries.push(entry);
        Ok(())
    }

    /// List all resources, in registration order.
    pub fn list(&self) -> Vec<&ResourceDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor).collect()
    }

    /// Read a resource by URI.
    pub fn read(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.descriptor.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        Ok(ResourceContents {
            uri: entry.descriptor.uri.clone(),
            mime_type: entry.descriptor.mime_type.clone(),
            text: entry.text.clone(),
        })
    }
}
