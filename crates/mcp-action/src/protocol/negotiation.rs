//! The `initialize` handshake. Stateless: every call answers with the
//! server's own protocol version and capabilities.

use mcp_action_core::ServerConfig;

use crate::types::{InitializeParams, InitializeResult, ServerCapabilities, MCP_VERSION};

pub fn negotiate(
    params: Option<&InitializeParams>,
    config: &ServerConfig,
    capabilities: ServerCapabilities,
) -> InitializeResult {
    if let Some(params) = params {
        if let Some(requested) = params.protocol_version.as_deref() {
            if requested != MCP_VERSION {
                tracing::warn!(
                    "Client requested protocol version {requested}, server supports {MCP_VERSION}. Proceeding with server version."
                );
            }
        }
        if let Some(client) = &params.client_info {
            tracing::info!("Initialized with client: {} v{}", client.name, client.version);
        }
    }

    InitializeResult::new(config, capabilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_version_always_wins() {
        let params = InitializeParams {
            protocol_version: Some("2099-01-01".to_string()),
            ..InitializeParams::default()
        };
        let config = ServerConfig::default();
        let result = negotiate(
            Some(&params),
            &config,
            ServerCapabilities::default_capabilities(),
        );
        assert_eq!(result.protocol_version, MCP_VERSION);
        assert_eq!(result.server_info.name, config.name);
    }
}
