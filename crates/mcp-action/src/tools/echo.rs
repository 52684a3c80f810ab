//! Tool: echo. Replies with the message it was given.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{McpError, McpResult, ParameterSpec, ToolCallResult};

use super::registry::{Tool, ToolHandler};

const DEFAULT_MESSAGE: &str = "No message provided";

#[derive(Debug, Default, Deserialize)]
struct EchoParams {
    #[serde(default)]
    message: Option<String>,
}

impl EchoParams {
    /// An empty message counts as missing.
    fn message(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_MESSAGE,
        }
    }
}

pub struct Echo;

#[async_trait]
impl ToolHandler for Echo {
    async fn execute(&self, args: Value) -> McpResult<ToolCallResult> {
        let params: EchoParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        Ok(ToolCallResult::text(format!("Echo: {}", params.message())))
    }
}

pub fn tool() -> Tool {
    Tool::new(
        "echo",
        "A simple utility tool that echoes back the input message. Useful for testing connectivity, debugging, or confirming that the MCP server is responding correctly to requests.",
        Echo,
    )
    .param(
        "message",
        ParameterSpec::string(
            "The message you want to echo back - useful for testing and debugging",
        ),
    )
}
