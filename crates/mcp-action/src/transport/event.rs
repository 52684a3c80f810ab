//! Serverless event and response envelopes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::RawBody;

/// One inbound web-action invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionEvent {
    #[serde(rename = "__ow_method", default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(rename = "__ow_headers", default)]
    pub headers: BTreeMap<String, String>,
    #[serde(rename = "__ow_path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "__ow_body", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RawBody>,
    #[serde(rename = "LOG_LEVEL", default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl ActionEvent {
    pub fn new(method: &str) -> Self {
        Self {
            method: Some(method.to_string()),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<RawBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn verb(&self) -> Verb {
        Verb::from(self.method.as_deref())
    }
}

/// HTTP verb of an event. Parsed case-insensitively; a missing verb is
/// `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Options,
    Other(String),
}

impl From<Option<&str>> for Verb {
    fn from(method: Option<&str>) -> Self {
        let method = method.unwrap_or_default();
        match method.to_ascii_lowercase().as_str() {
            "get" => Verb::Get,
            "post" => Verb::Post,
            "options" => Verb::Options,
            _ => Verb::Other(method.to_string()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => f.write_str("get"),
            Verb::Post => f.write_str("post"),
            Verb::Options => f.write_str("options"),
            Verb::Other(other) => f.write_str(other),
        }
    }
}

/// The action's reply: `{statusCode, headers, body}` with a string body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ActionResponse {
    pub fn json(status_code: u16, headers: BTreeMap<String, String>, body: &Value) -> Self {
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn empty(status_code: u16, headers: BTreeMap<String, String>) -> Self {
        Self {
            status_code,
            headers,
            body: String::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Map a `LOG_LEVEL` value to a tracing level. Unknown values are `INFO`.
pub fn parse_log_level(level: &str) -> tracing::Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
