//! Server info resource definition.

use chrono::{DateTime, Utc};

use super::ResourceDefinition;
use crate::core::config::ServerConfig;
use crate::domains::resources::ResourceError;

/// Server information resource, rendered once at startup.
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "mcp://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Name, version and tools of this server";
    const MIME_TYPE: &'static str = "application/json";
}

impl ServerInfoResource {
    /// Render the resource body.
    pub fn render(
        server: &ServerConfig,
        tools: &[&str],
        started_at: DateTime<Utc>,
    ) -> Result<String, ResourceError> {
        let info = serde_json::json!({
            "name": server.name,
            "version": server.version,
            "tools": tools,
            "startedAt": started_at.to_rfc3339(),
        });

        serde_json::to_string_pretty(&info).map_err(|e| ResourceError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "mcp://server/info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_server_info_render() {
        let config = Config::default();
        let text = ServerInfoResource::render(&config.server, &["get_weather"], Utc::now()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["name"], serde_json::json!(config.server.name));
        assert_eq!(parsed["tools"], serde_json::json!(["get_weather"]));
        assert!(parsed["startedAt"].is_string());
    }
}
