//! Core data types shared by the action server.

use serde::{Deserialize, Serialize};

use crate::scaffold::ProjectOptions;

/// Version advertised by every generated server.
pub const SERVER_VERSION: &str = "1.0.0";

/// Identity of a generated MCP server. Set once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl ServerConfig {
    /// Create a config with the fixed server version.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: SERVER_VERSION.to_string(),
            description: description.into(),
        }
    }

    /// Build the server identity from the scaffolder's options, using the
    /// normalized project name.
    pub fn from_options(options: &ProjectOptions) -> Self {
        Self::new(options.normalized_name(), options.description.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_options(&ProjectOptions::default())
    }
}

/// Errors raised by the core library.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid expression")]
    InvalidExpression,

    #[error("{0}")]
    Syntax(String),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
