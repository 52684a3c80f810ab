//! The serverless action adapter: one event in, one `{statusCode, headers,
//! body}` out. GET is a health check, OPTIONS a CORS preflight, POST a
//! JSON-RPC call, anything else 405.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;

use chrono::{SecondsFormat, Utc};
use futures::FutureExt;
use serde_json::json;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Instrument, Level};

use mcp_action_core::{ProjectOptions, ServerConfig};

use crate::protocol::{decode, ProtocolHandler, RawBody};
use crate::types::{panic_message, status_codes, McpError, RequestId};

use super::event::{parse_log_level, ActionEvent, ActionResponse, Verb};

/// Builds the subscriber an invocation logs to when its event carries a
/// `LOG_LEVEL`.
pub type LogScope = fn(Level) -> Dispatch;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS, DELETE";
pub const ALLOW_HEADERS: &str =
    "Content-Type, Accept, Authorization, x-api-key, mcp-session-id, Last-Event-ID";
pub const EXPOSE_HEADERS: &str = "Content-Type, mcp-session-id, Last-Event-ID";
pub const MAX_AGE: &str = "86400";

/// Headers present on every response.
pub fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Access-Control-Allow-Origin", ALLOW_ORIGIN),
        ("Access-Control-Allow-Methods", ALLOW_METHODS),
        ("Access-Control-Allow-Headers", ALLOW_HEADERS),
        ("Access-Control-Expose-Headers", EXPOSE_HEADERS),
        ("Access-Control-Max-Age", MAX_AGE),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn json_headers() -> BTreeMap<String, String> {
    let mut headers = cors_headers();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

fn error_response(id: RequestId, error: McpError) -> ActionResponse {
    let status = error.http_status();
    let body = serde_json::to_value(error.to_json_rpc_error(id)).unwrap_or_default();
    ActionResponse::json(status, json_headers(), &body)
}

fn activation_id() -> String {
    std::env::var("__OW_ACTIVATION_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string())
}

/// Entry point for web-action events. Holds only the project options and an
/// optional log scope; the capability registry is rebuilt for every POST.
#[derive(Debug, Clone, Default)]
pub struct ActionHandler {
    options: ProjectOptions,
    log_scope: Option<LogScope>,
}

impl ActionHandler {
    pub fn new(options: ProjectOptions) -> Self {
        Self {
            options,
            log_scope: None,
        }
    }

    /// Honor each event's `LOG_LEVEL` by running the invocation under the
    /// subscriber `scope` builds. Without a scope the level is only recorded
    /// on the activation span.
    pub fn with_log_scope(mut self, scope: LogScope) -> Self {
        self.log_scope = Some(scope);
        self
    }

    /// Handle one event. Never panics and never returns an error: every
    /// failure becomes a JSON response.
    pub async fn handle(&self, event: ActionEvent) -> ActionResponse {
        let level = event.log_level.as_deref().map(parse_log_level);
        match (self.log_scope, level) {
            (Some(scope), Some(level)) => self.activate(event).with_subscriber(scope(level)).await,
            _ => self.activate(event).await,
        }
    }

    async fn activate(&self, event: ActionEvent) -> ActionResponse {
        let verb = event.verb();
        let span = tracing::info_span!(
            "activation",
            id = %activation_id(),
            verb = %verb,
            log_level = event.log_level.as_deref().unwrap_or("info")
        );

        async {
            tracing::info!(path = event.path.as_deref().unwrap_or(""), "Action invoked");
            let response = AssertUnwindSafe(self.route(&verb, &event))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    tracing::error!("Uncaught error in action: {message}");
                    error_response(RequestId::Null, McpError::Internal(message))
                });
            tracing::info!(status = response.status_code, "Action completed");
            response
        }
        .instrument(span)
        .await
    }

    async fn route(&self, verb: &Verb, event: &ActionEvent) -> ActionResponse {
        match verb {
            Verb::Get => self.health(),
            Verb::Options => {
                tracing::debug!("CORS preflight");
                ActionResponse::empty(status_codes::OK, cors_headers())
            }
            Verb::Post => self.rpc(event.body.as_ref()).await,
            Verb::Other(other) => {
                tracing::warn!("Method not allowed: {other}");
                error_response(RequestId::Null, McpError::MethodNotAllowed(other.clone()))
            }
        }
    }

    fn health(&self) -> ActionResponse {
        let config = ServerConfig::from_options(&self.options);
        let body = json!({
            "status": "healthy",
            "server": config.name,
            "version": config.version,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        ActionResponse::json(status_codes::OK, json_headers(), &body)
    }

    async fn rpc(&self, body: Option<&RawBody>) -> ActionResponse {
        let request = match decode(body) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("Could not decode request body: {e}");
                return error_response(RequestId::Null, e);
            }
        };

        let handler = ProtocolHandler::from_options(&self.options);
        let reply = handler.dispatch(&request).await;
        ActionResponse::json(reply.status(), json_headers(), &reply.to_value())
    }
}
