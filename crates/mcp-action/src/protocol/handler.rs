//! Method dispatcher: routes one JSON-RPC request to its handler.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use mcp_action_core::{ProjectOptions, ServerConfig};

use crate::registry::CapabilityRegistry;
use crate::types::*;

use super::method::Method;
use super::negotiation::negotiate;
use super::reply::JsonRpcReply;
use super::validator::validate_request;

/// Dispatches requests against an injected, read-only capability registry.
pub struct ProtocolHandler {
    config: ServerConfig,
    registry: CapabilityRegistry,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn to_result<T: Serialize>(value: T) -> McpResult<Value> {
    serde_json::to_value(value).map_err(|e| McpError::Internal(e.to_string()))
}

/// Typed params for methods that cannot run without them.
fn required_params<T: DeserializeOwned>(params: Option<&Value>, what: &str) -> McpResult<T> {
    params
        .filter(|p| !p.is_null())
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams(format!("{what} params required")))
}

impl ProtocolHandler {
    pub fn new(config: ServerConfig, registry: CapabilityRegistry) -> Self {
        Self { config, registry }
    }

    /// Config and a fresh registry derived from project options.
    pub fn from_options(options: &ProjectOptions) -> Self {
        Self::new(
            ServerConfig::from_options(options),
            CapabilityRegistry::build(options),
        )
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Answer one request. Never panics: a panic inside a handler becomes an
    /// internal error echoing the request id.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcReply {
        let id = request.id.clone();

        if let Err(e) = validate_request(request) {
            return JsonRpcReply::failure(id, e);
        }

        let method = Method::from(request.method.as_str());
        tracing::info!(method = %method, id = %id, "Handling request");

        let outcome = AssertUnwindSafe(self.dispatch_method(&method, request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(McpError::Internal(panic_message(payload.as_ref())))
            });

        match outcome {
            Ok(result) => JsonRpcReply::success(id, result),
            Err(e) => {
                tracing::warn!(method = %method, code = e.code(), "Request failed: {e}");
                JsonRpcReply::failure(id, e)
            }
        }
    }

    async fn dispatch_method(&self, method: &Method, request: &JsonRpcRequest) -> McpResult<Value> {
        let params = request.params.as_ref();
        match method {
            Method::Initialize => self.handle_initialize(params),
            Method::Initialized => {
                tracing::info!("Client reported initialized");
                Ok(empty_object())
            }
            Method::ToolsList => self.handle_tools_list(),
            Method::ToolsCall => self.handle_tools_call(params).await,
            Method::ResourcesList => self.handle_resources_list(),
            Method::ResourcesRead => self.handle_resources_read(params),
            Method::PromptsList => self.handle_prompts_list(),
            Method::PromptsGet => self.handle_prompts_get(params),
            Method::Notification(name) => {
                tracing::debug!("Acknowledging notification {name}");
                Ok(empty_object())
            }
            Method::Unknown(name) => Err(McpError::MethodNotFound(name.clone())),
        }
    }

    fn handle_initialize(&self, params: Option<&Value>) -> McpResult<Value> {
        let init_params = match params.filter(|p| !p.is_null()) {
            Some(p) => match serde_json::from_value::<InitializeParams>(p.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!("Ignoring malformed initialize params: {e}");
                    None
                }
            },
            None => None,
        };

        to_result(negotiate(
            init_params.as_ref(),
            &self.config,
            self.registry.capabilities(),
        ))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let tools = self.registry.tools.list_tools();
        tracing::debug!("Listing {} tools", tools.len());
        to_result(ToolListResult { tools })
    }

    async fn handle_tools_call(&self, params: Option<&Value>) -> McpResult<Value> {
        let call: ToolCallParams = required_params(params, "Tool call")?;
        let result = self.registry.tools.call(&call.name, call.arguments).await?;
        to_result(result)
    }

    fn handle_resources_list(&self) -> McpResult<Value> {
        to_result(ResourceListResult {
            resources: self.registry.resources.list_resources(),
        })
    }

    fn handle_resources_read(&self, params: Option<&Value>) -> McpResult<Value> {
        let read: ResourceReadParams = required_params(params, "Resource read")?;
        to_result(self.registry.resources.read(&read.uri)?)
    }

    fn handle_prompts_list(&self) -> McpResult<Value> {
        to_result(PromptListResult {
            prompts: self.registry.prompts.list_prompts(),
        })
    }

    fn handle_prompts_get(&self, params: Option<&Value>) -> McpResult<Value> {
        let get: PromptGetParams = required_params(params, "Prompt get")?;
        to_result(
            self.registry
                .prompts
                .get_prompt(&get.name, get.arguments.as_ref())?,
        )
    }
}
