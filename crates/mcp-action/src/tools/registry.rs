//! Tool registration and dispatch.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::{json, Map, Value};

use crate::types::{
    panic_message, McpError, McpResult, ParameterSpec, ToolCallResult, ToolDefinition,
};

use super::{calculator, echo, weather};

/// Executes one tool. Arguments arrive as a JSON object, `{}` when the
/// client sent none.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn execute(&self, args: Value) -> McpResult<ToolCallResult>;
}

#[derive(Clone)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: Vec<(String, ParameterSpec)>,
    handler: Arc<dyn ToolHandler>,
}

impl Tool {
    pub fn new(name: &str, description: &str, handler: impl ToolHandler + 'static) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    pub fn param(mut self, name: &str, spec: ParameterSpec) -> Self {
        self.parameters.push((name.to_string(), spec));
        self
    }

    /// `inputSchema` never lists required parameters; handlers default
    /// whatever is missing.
    pub fn definition(&self) -> ToolDefinition {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, spec)| (name.clone(), json!(spec)))
            .collect();

        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": []
            }),
        }
    }
}

/// Tools in registration order with an exact-match name index.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled `echo`, `calculator` and `weather` tools.
    pub fn with_examples() -> Self {
        let mut registry = Self::new();
        registry.register(echo::tool());
        registry.register(calculator::tool());
        registry.register(weather::tool());
        registry
    }

    /// A second registration under the same name replaces the first in place.
    pub fn register(&mut self, tool: Tool) {
        match self.index.get(&tool.name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(tool.name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(Tool::definition).collect()
    }

    /// Run one tool to completion. Arguments that are neither an object nor
    /// absent are rejected before the handler runs. A panicking handler is
    /// reported as a tool execution error.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> McpResult<ToolCallResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        let args = match arguments {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(args @ Value::Object(_)) => args,
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "arguments must be an object".to_string(),
                ))
            }
        };

        tracing::info!(tool = %name, "Executing tool");
        match AssertUnwindSafe(tool.handler.execute(args))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(tool = %name, "Tool panicked: {message}");
                Err(McpError::ToolExecution(message))
            }
        }
    }
}
