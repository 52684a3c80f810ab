//! Prompt registration and expansion.

use std::collections::HashMap;

use serde_json::Value;

use mcp_action_core::template;

use crate::types::{
    McpError, McpResult, PromptArgument, PromptDefinition, PromptGetResult, PromptMessage,
    ToolContent,
};

use super::weather_info;

/// A named text template with `{argument}` placeholders.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
    pub template: String,
}

impl Prompt {
    pub fn new(name: &str, description: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            arguments: Vec::new(),
            template: template.to_string(),
        }
    }

    pub fn argument(mut self, name: &str, description: &str, required: bool) -> Self {
        self.arguments.push(PromptArgument {
            name: name.to_string(),
            description: description.to_string(),
            required,
        });
        self
    }

    pub fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            arguments: self.arguments.clone(),
        }
    }

    /// Substitute `arguments` into the template. Declared arguments that were
    /// not supplied render as empty text.
    pub fn render(&self, arguments: Option<&Value>) -> String {
        let declared: Vec<&str> = self.arguments.iter().map(|a| a.name.as_str()).collect();
        template::render(
            &self.template,
            &declared,
            &template::argument_values(arguments),
        )
    }

    pub fn expand(&self, arguments: Option<&Value>) -> PromptGetResult {
        PromptGetResult {
            description: self.description.clone(),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: ToolContent::Text {
                    text: self.render(arguments),
                },
            }],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    prompts: Vec<Prompt>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples() -> Self {
        let mut registry = Self::new();
        registry.register(weather_info::prompt());
        registry
    }

    pub fn register(&mut self, prompt: Prompt) {
        match self.index.get(&prompt.name) {
            Some(&slot) => self.prompts[slot] = prompt,
            None => {
                self.index.insert(prompt.name.clone(), self.prompts.len());
                self.prompts.push(prompt);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Prompt> {
        self.index.get(name).map(|&slot| &self.prompts[slot])
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(Prompt::definition).collect()
    }

    pub fn get_prompt(&self, name: &str, arguments: Option<&Value>) -> McpResult<PromptGetResult> {
        self.get(name)
            .map(|prompt| prompt.expand(arguments))
            .ok_or_else(|| McpError::PromptNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weather_info_with_city() {
        let registry = PromptRegistry::with_examples();
        let result = registry
            .get_prompt("weather_info", Some(&json!({"city": "Tokyo"})))
            .unwrap();
        let text = result.messages[0].content.as_text();
        assert!(text.contains("Example city: Tokyo"));
        assert!(!text.contains("{city}"));
        assert_eq!(result.messages[0].role, "user");
    }

    #[test]
    fn test_missing_argument_renders_empty() {
        let registry = PromptRegistry::with_examples();
        let result = registry.get_prompt("weather_info", None).unwrap();
        assert!(result.messages[0]
            .content
            .as_text()
            .contains("Example city: \n"));
    }

    #[test]
    fn test_unknown_prompt() {
        let registry = PromptRegistry::with_examples();
        let err = registry.get_prompt("weather-info", None).unwrap_err();
        assert!(matches!(err, McpError::PromptNotFound(_)));
    }

    #[test]
    fn test_list_shape() {
        let value = serde_json::to_value(PromptRegistry::with_examples().list_prompts()).unwrap();
        assert_eq!(
            value,
            json!([{
                "name": "weather_info",
                "description": "Simple prompt to explain the weather tool functionality",
                "arguments": [{
                    "name": "city",
                    "description": "City name to use in the example",
                    "required": false
                }]
            }])
        );
    }
}
