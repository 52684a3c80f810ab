//! Stdio transport: newline-delimited JSON-RPC on stdin/stdout.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use mcp_action_core::ProjectOptions;

use crate::protocol::{decode, ProtocolHandler, RawBody};
use crate::types::{McpError, McpResult, RequestId};

use super::framing;

/// Runs every line through the same decoder and dispatcher as the action,
/// with a fresh registry per line.
pub struct StdioTransport {
    options: ProjectOptions,
}

impl StdioTransport {
    pub fn new(options: ProjectOptions) -> Self {
        Self { options }
    }

    /// Answer one line. `None` for notifications, which get no reply.
    pub async fn handle_line(&self, body: &RawBody) -> Option<Value> {
        let request = match decode(Some(body)) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Parse error: {e}");
                return serde_json::to_value(e.to_json_rpc_error(RequestId::Null)).ok();
            }
        };

        let handler = ProtocolHandler::from_options(&self.options);
        let reply = handler.dispatch(&request).await;
        if request.is_notification() {
            return None;
        }
        Some(reply.to_value())
    }

    /// Serve until EOF on `reader`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await.map_err(McpError::Io)? {
            let Some(body) = framing::read_line(&line) else {
                continue;
            };
            if let Some(response) = self.handle_line(&body).await {
                let framed = framing::frame_message(&response)?;
                writer
                    .write_all(framed.as_bytes())
                    .await
                    .map_err(McpError::Io)?;
                writer.flush().await.map_err(McpError::Io)?;
            }
        }

        tracing::info!("EOF on stdin, shutting down");
        Ok(())
    }

    /// Run the transport loop on the process's stdin and stdout.
    pub async fn run(&self) -> McpResult<()> {
        tracing::info!("Stdio transport started");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_skips_notifications() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
            "not json\n",
        );
        let mut output = Vec::new();
        StdioTransport::new(ProjectOptions::default())
            .serve(input.as_bytes(), &mut output)
            .await
            .unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 3);
        assert_eq!(lines[2]["error"]["code"], -32603);
        assert_eq!(lines[2]["id"], Value::Null);
    }
}
