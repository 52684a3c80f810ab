//! The capability registry: tools, resources and prompts for one invocation.

use mcp_action_core::{Feature, ProjectOptions};

use crate::prompts::PromptRegistry;
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;
use crate::types::ServerCapabilities;

/// Everything a client can list, call, read or expand. Built fresh for each
/// invocation and never mutated while a request is served.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    pub tools: ToolRegistry,
    pub resources: ResourceRegistry,
    pub prompts: PromptRegistry,
    features: Vec<Feature>,
}

impl CapabilityRegistry {
    /// Register the bundled examples for each enabled feature family.
    /// With `include_examples` off every family starts empty.
    pub fn build(options: &ProjectOptions) -> Self {
        let examples = options.include_examples;
        let enabled = |feature| examples && options.has_feature(feature);

        let registry = Self {
            tools: if enabled(Feature::Tools) {
                ToolRegistry::with_examples()
            } else {
                ToolRegistry::new()
            },
            resources: if enabled(Feature::Resources) {
                ResourceRegistry::with_examples()
            } else {
                ResourceRegistry::new()
            },
            prompts: if enabled(Feature::Prompts) {
                PromptRegistry::with_examples()
            } else {
                PromptRegistry::new()
            },
            features: options.features.clone(),
        };

        tracing::debug!(
            tools = ?registry.tools.names(),
            resources = registry.resources.len(),
            prompts = registry.prompts.len(),
            "Capability registry built"
        );
        registry
    }

    pub fn with_examples() -> Self {
        Self::build(&ProjectOptions::default())
    }

    /// What `initialize` advertises.
    pub fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities::for_features(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_example() {
        let registry = CapabilityRegistry::with_examples();
        assert_eq!(registry.tools.len(), 3);
        assert_eq!(registry.resources.len(), 3);
        assert_eq!(registry.prompts.len(), 1);
        assert!(registry.capabilities().tools.is_some());
    }

    #[test]
    fn test_disabled_family_is_empty() {
        let options = ProjectOptions {
            features: vec![Feature::Tools],
            ..ProjectOptions::default()
        };
        let registry = CapabilityRegistry::build(&options);
        assert_eq!(registry.tools.len(), 3);
        assert!(registry.resources.is_empty());
        assert!(registry.prompts.is_empty());
        assert!(registry.capabilities().resources.is_none());
    }

    #[test]
    fn test_skeleton_without_examples() {
        let options = ProjectOptions {
            include_examples: false,
            ..ProjectOptions::default()
        };
        let registry = CapabilityRegistry::build(&options);
        assert!(registry.tools.is_empty());
        assert!(registry.resources.is_empty());
        assert!(registry.prompts.is_empty());
        assert!(registry.capabilities().prompts.is_some());
    }
}
