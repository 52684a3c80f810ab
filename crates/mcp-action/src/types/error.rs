//! Error types, JSON-RPC error codes and HTTP status mapping for the action.

use mcp_action_core::CoreError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// HTTP status codes the transport adapter answers with.
pub mod status_codes {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// All errors that can occur while handling an invocation.
///
/// The display text of each variant is the `message` sent on the wire.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Invalid Request - empty body")]
    EmptyBody,

    #[error("Invalid Request - {0}")]
    InvalidRequest(String),

    #[error("Internal server error: Failed to parse request body: {0}")]
    BodyParse(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("Prompt '{0}' not found")]
    PromptNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Error executing tool: {0}")]
    ToolExecution(String),

    /// Unknown JSON-RPC method. Answered with HTTP 200 so lenient clients keep going.
    #[error("Method '{0}' not found")]
    MethodNotFound(String),

    /// Unsupported HTTP verb.
    #[error("Method '{0}' not allowed")]
    MethodNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            McpError::EmptyBody | McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::ToolNotFound(_)
            | McpError::ResourceNotFound(_)
            | McpError::PromptNotFound(_)
            | McpError::MethodNotFound(_)
            | McpError::MethodNotAllowed(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::BodyParse(_)
            | McpError::ToolExecution(_)
            | McpError::Internal(_)
            | McpError::Transport(_)
            | McpError::Io(_)
            | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    pub fn http_status(&self) -> u16 {
        use status_codes::*;
        match self {
            McpError::EmptyBody | McpError::InvalidRequest(_) | McpError::InvalidParams(_) => {
                BAD_REQUEST
            }
            McpError::ToolNotFound(_)
            | McpError::ResourceNotFound(_)
            | McpError::PromptNotFound(_) => NOT_FOUND,
            McpError::MethodNotFound(_) => OK,
            McpError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED,
            McpError::BodyParse(_)
            | McpError::ToolExecution(_)
            | McpError::Internal(_)
            | McpError::Transport(_)
            | McpError::Io(_)
            | McpError::Json(_) => INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<CoreError> for McpError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidProjectName(msg) => McpError::InvalidParams(msg),
            other => McpError::ToolExecution(other.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
