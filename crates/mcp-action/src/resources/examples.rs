//! Bundled example resources: plain text, markdown and JSON.

use serde_json::json;

use crate::types::McpResult;

use super::registry::{Resource, ResourceBody};

const RESOURCE1_TEXT: &str = "This is the content of example resource 1. It demonstrates how resources work in the MCP protocol. Resources can contain documentation, reference data, configuration files, or any static content your AI assistant might need.";

const API_DOCS: &str = r#"# API Documentation

## Overview
This is example API documentation that demonstrates how to provide structured information through MCP resources.

## Endpoints

### GET /api/users
Returns a list of users.

**Response:**
```json
{
  "users": [
    {"id": 1, "name": "John Doe", "email": "john@example.com"}
  ]
}
```

### POST /api/users
Creates a new user.

**Request Body:**
```json
{
  "name": "string",
  "email": "string"
}
```

CUSTOMIZE: Replace this with your actual API documentation, database schemas, or any reference material."#;

fn settings() -> McpResult<String> {
    let value = json!({
        "server": {
            "name": "my-mcp-server",
            "version": "1.0.0",
            "environment": "production"
        },
        "features": {
            "tools_enabled": true,
            "resources_enabled": true,
            "prompts_enabled": true
        },
        "limits": {
            "max_response_size": "1MB",
            "timeout": "30s"
        },
        "note": "CUSTOMIZE: Replace with your actual configuration schema"
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn all() -> Vec<Resource> {
    vec![
        Resource::new(
            "example://resource1",
            "Example Resource 1",
            "A sample text resource for demonstration purposes",
            "text/plain",
            ResourceBody::Static(RESOURCE1_TEXT.to_string()),
        ),
        Resource::new(
            "docs://api",
            "API Documentation",
            "Example API documentation resource",
            "text/markdown",
            ResourceBody::Static(API_DOCS.to_string()),
        ),
        Resource::new(
            "config://settings",
            "Configuration Settings",
            "Example configuration and settings reference",
            "application/json",
            ResourceBody::Rendered(settings),
        ),
    ]
}
