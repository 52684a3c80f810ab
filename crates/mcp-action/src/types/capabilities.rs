//! MCP capability and initialization types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use mcp_action_core::{Feature, ServerConfig};

pub const MCP_VERSION: &str = "2024-11-05";

/// Tool calls a client may run at once. Advisory only.
pub const MAX_CONCURRENT_TOOL_CALLS: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ServerConfig> for Implementation {
    fn from(config: &ServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            version: config.version.clone(),
            description: Some(config.description.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptsCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingCapability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingCapability {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptsCapability {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesCapability {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub max_concurrent_calls: u32,
}

impl Default for ToolsCapability {
    fn default() -> Self {
        Self {
            max_concurrent_calls: MAX_CONCURRENT_TOOL_CALLS,
        }
    }
}

/// Client side of the handshake. Every field is optional; clients that send
/// a bare `initialize` are still served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializeParams {
    pub protocol_version: Option<String>,
    pub capabilities: ClientCapabilities,
    pub client_info: Option<Implementation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
}

impl ServerCapabilities {
    /// Advertise each enabled capability family plus logging.
    pub fn for_features(features: &[Feature]) -> Self {
        Self {
            tools: features
                .contains(&Feature::Tools)
                .then(ToolsCapability::default),
            resources: features
                .contains(&Feature::Resources)
                .then(ResourcesCapability::default),
            prompts: features
                .contains(&Feature::Prompts)
                .then(PromptsCapability::default),
            logging: Some(LoggingCapability {}),
        }
    }

    pub fn default_capabilities() -> Self {
        Self::for_features(&Feature::ALL)
    }
}

impl InitializeResult {
    pub fn new(config: &ServerConfig, capabilities: ServerCapabilities) -> Self {
        Self {
            protocol_version: MCP_VERSION.to_string(),
            capabilities,
            server_info: Implementation::from(config),
        }
    }

    pub fn default_result(config: &ServerConfig) -> Self {
        Self::new(config, ServerCapabilities::default_capabilities())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capabilities_shape() {
        let result = InitializeResult::default_result(&ServerConfig::new("demo", "Demo server"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["protocolVersion"], "2024-11-05");
        assert_eq!(value["capabilities"]["tools"]["maxConcurrentCalls"], 1);
        assert_eq!(value["capabilities"]["resources"], serde_json::json!({}));
        assert_eq!(value["capabilities"]["prompts"], serde_json::json!({}));
        assert_eq!(value["capabilities"]["logging"], serde_json::json!({}));
        assert_eq!(value["serverInfo"]["name"], "demo");
        assert_eq!(value["serverInfo"]["version"], "1.0.0");
        assert_eq!(value["serverInfo"]["description"], "Demo server");
    }

    #[test]
    fn test_disabled_feature_is_omitted() {
        let caps = ServerCapabilities::for_features(&[Feature::Tools]);
        let value = serde_json::to_value(&caps).unwrap();
        assert!(value.get("prompts").is_none());
        assert!(value.get("resources").is_none());
        assert!(value.get("tools").is_some());
    }
}
