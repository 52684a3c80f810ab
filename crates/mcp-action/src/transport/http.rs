//! HTTP transport: every path and verb becomes an action event.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::protocol::RawBody;
use crate::types::{McpError, McpResult};

use super::action::ActionHandler;
use super::event::{ActionEvent, ActionResponse};

/// Local HTTP server in front of the action adapter.
pub struct HttpTransport {
    handler: Arc<ActionHandler>,
}

impl HttpTransport {
    pub fn new(handler: ActionHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn router(&self) -> Router {
        router(self.handler.clone())
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("HTTP transport listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| McpError::Transport(e.to_string()))
    }
}

pub fn router(handler: Arc<ActionHandler>) -> Router {
    Router::new()
        .fallback(handle)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(handler)
}

async fn handle(
    State(handler): State<Arc<ActionHandler>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = to_event(&method, &uri, &headers, &body);
    into_http(handler.handle(event).await)
}

fn to_event(method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) -> ActionEvent {
    let mut event = ActionEvent::new(&method.as_str().to_ascii_lowercase()).with_path(uri.path());

    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            event = event.with_header(name.as_str(), value);
        }
    }

    if !body.is_empty() {
        event = event.with_body(RawBody::Text(String::from_utf8_lossy(body).into_owned()));
    }
    event
}

fn into_http(response: ActionResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Dropping invalid response header {name}"),
        }
    }

    (status, headers, response.body).into_response()
}
