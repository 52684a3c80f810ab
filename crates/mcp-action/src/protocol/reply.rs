//! Outcome of dispatching one request.

use serde_json::Value;

use crate::types::{JsonRpcResponse, McpError, RequestId};

#[derive(Debug)]
pub enum JsonRpcReply {
    Success(JsonRpcResponse),
    Failure { id: RequestId, error: McpError },
}

impl JsonRpcReply {
    pub fn success(id: RequestId, result: Value) -> Self {
        JsonRpcReply::Success(JsonRpcResponse::new(id, result))
    }

    pub fn failure(id: RequestId, error: McpError) -> Self {
        JsonRpcReply::Failure { id, error }
    }

    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcReply::Success(response) => &response.id,
            JsonRpcReply::Failure { id, .. } => id,
        }
    }

    pub fn error(&self) -> Option<&McpError> {
        match self {
            JsonRpcReply::Success(_) => None,
            JsonRpcReply::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JsonRpcReply::Success(_))
    }

    /// HTTP status the transport answers with.
    pub fn status(&self) -> u16 {
        match self {
            JsonRpcReply::Success(_) => crate::types::status_codes::OK,
            JsonRpcReply::Failure { error, .. } => error.http_status(),
        }
    }

    /// The JSON-RPC envelope.
    pub fn to_value(&self) -> Value {
        match self {
            JsonRpcReply::Success(response) => {
                serde_json::to_value(response).unwrap_or_default()
            }
            JsonRpcReply::Failure { id, error } => {
                serde_json::to_value(error.to_json_rpc_error(id.clone())).unwrap_or_default()
            }
        }
    }
}
