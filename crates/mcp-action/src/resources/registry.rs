//! Resource registration and reads.

use std::collections::HashMap;

use crate::types::{
    McpError, McpResult, ReadResourceResult, ResourceContent, ResourceDefinition,
};

use super::examples;

/// Where a resource's text comes from.
#[derive(Clone)]
pub enum ResourceBody {
    Static(String),
    Rendered(fn() -> McpResult<String>),
}

#[derive(Clone)]
pub struct Resource {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub body: ResourceBody,
}

impl Resource {
    pub fn new(uri: &str, name: &str, description: &str, mime_type: &str, body: ResourceBody) -> Self {
        Self {
            uri: uri.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            mime_type: mime_type.to_string(),
            body,
        }
    }

    pub fn definition(&self) -> ResourceDefinition {
        ResourceDefinition {
            uri: self.uri.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            mime_type: self.mime_type.clone(),
        }
    }

    pub fn text(&self) -> McpResult<String> {
        match &self.body {
            ResourceBody::Static(text) => Ok(text.clone()),
            ResourceBody::Rendered(render) => render(),
        }
    }
}

/// Resources keyed by URI, listed in registration order.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples() -> Self {
        let mut registry = Self::new();
        for resource in examples::all() {
            registry.register(resource);
        }
        registry
    }

    pub fn register(&mut self, resource: Resource) {
        match self.index.get(&resource.uri) {
            Some(&slot) => self.resources[slot] = resource,
            None => {
                self.index.insert(resource.uri.clone(), self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    pub fn get(&self, uri: &str) -> Option<&Resource> {
        self.index.get(uri).map(|&slot| &self.resources[slot])
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.resources.iter().map(Resource::definition).collect()
    }

    pub fn read(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let resource = self
            .get(uri)
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text: resource.text()?,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_examples() {
        let registry = ResourceRegistry::with_examples();
        let uris: Vec<String> = registry
            .list_resources()
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(
            uris,
            vec!["example://resource1", "docs://api", "config://settings"]
        );
    }

    #[test]
    fn test_read_static() {
        let registry = ResourceRegistry::with_examples();
        let result = registry.read("docs://api").unwrap();
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].mime_type, "text/markdown");
        assert!(result.contents[0].text.starts_with("# API Documentation"));
    }

    #[test]
    fn test_read_rendered_json() {
        let registry = ResourceRegistry::with_examples();
        let text = registry.read("config://settings").unwrap().contents[0]
            .text
            .clone();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["server"]["name"], "my-mcp-server");
        assert_eq!(value["limits"]["timeout"], "30s");
        assert!(text.contains("\n  \"features\""));
    }

    #[test]
    fn test_unknown_uri() {
        let registry = ResourceRegistry::with_examples();
        let err = registry.read("example://nope").unwrap_err();
        assert_eq!(err.to_string(), "Resource 'example://nope' not found");
        assert_eq!(err.http_status(), 404);
    }
}
