//! Project options handed from the scaffolder to the generated server.

use serde::{Deserialize, Serialize};

use crate::types::{CoreError, CoreResult};

pub const DEFAULT_PROJECT_NAME: &str = "my-mcp-server";
pub const DEFAULT_DESCRIPTION: &str = "Model Context Protocol server for serverless runtimes";
pub const DEFAULT_AUTHOR: &str = "Your Name";

/// A family of MCP capabilities that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Tools,
    Resources,
    Prompts,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Tools, Feature::Resources, Feature::Prompts];
}

/// The scaffolder's configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectOptions {
    pub project_name: String,
    pub description: String,
    pub author: String,
    pub features: Vec<Feature>,
    pub include_examples: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            features: Feature::ALL.to_vec(),
            include_examples: true,
        }
    }
}

impl ProjectOptions {
    pub fn normalized_name(&self) -> String {
        normalize_project_name(&self.project_name)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Check that the normalized name is usable as a package name.
    pub fn validate(&self) -> CoreResult<()> {
        validate_project_name(&self.normalized_name())
    }
}

/// Lowercase, map anything outside `[a-z0-9-]` to `-`, collapse dash runs
/// and strip leading/trailing dashes.
pub fn normalize_project_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

pub fn validate_project_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidProjectName(
            "Project name is required".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::InvalidProjectName(
            "Project name should only contain lowercase letters, numbers, and hyphens".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_case_and_spaces() {
        assert_eq!(normalize_project_name("My Cool Server"), "my-cool-server");
    }

    #[test]
    fn test_normalize_collapses_and_trims_dashes() {
        assert_eq!(normalize_project_name("--Weather__API!!--"), "weather-api");
        assert_eq!(normalize_project_name("a---b"), "a-b");
    }

    #[test]
    fn test_normalize_non_ascii() {
        assert_eq!(normalize_project_name("café-server"), "caf-server");
    }

    #[test]
    fn test_validate_rejects_empty_and_uppercase() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("   ").is_err());
        assert!(validate_project_name("Server").is_err());
        assert!(validate_project_name("my-server-2").is_ok());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: ProjectOptions =
            serde_json::from_str(r#"{"projectName": "Demo App", "features": ["tools"]}"#).unwrap();
        assert_eq!(opts.normalized_name(), "demo-app");
        assert_eq!(opts.description, DEFAULT_DESCRIPTION);
        assert!(opts.has_feature(Feature::Tools));
        assert!(!opts.has_feature(Feature::Prompts));
        assert!(opts.include_examples);
    }

    #[test]
    fn test_server_config_from_options() {
        let opts = ProjectOptions {
            project_name: "Weather Bot".to_string(),
            description: "Weather helper".to_string(),
            ..Default::default()
        };
        let config = crate::ServerConfig::from_options(&opts);
        assert_eq!(config.name, "weather-bot");
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.description, "Weather helper");
    }
}
