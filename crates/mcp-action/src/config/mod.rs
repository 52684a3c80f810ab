//! Configuration loading and resolution.

use std::path::{Path, PathBuf};

use mcp_action_core::ProjectOptions;

use crate::types::{McpError, McpResult};

/// Environment variable naming an options file.
pub const CONFIG_ENV: &str = "MCP_ACTION_CONFIG";

/// Options file picked up from the working directory.
pub const CONFIG_FILE: &str = "mcp-action.json";

/// Resolve the options file: explicit path, then `MCP_ACTION_CONFIG`, then
/// `./mcp-action.json` if it exists. `None` means built-in defaults.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE);
    cwd_config.exists().then_some(cwd_config)
}

pub fn load_options(path: &Path) -> McpResult<ProjectOptions> {
    let text = std::fs::read_to_string(path)?;
    let options: ProjectOptions = serde_json::from_str(&text)?;
    tracing::debug!("Loaded project options from {}", path.display());
    Ok(options)
}

/// Command-line values that win over the options file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut options: ProjectOptions) -> ProjectOptions {
        if let Some(name) = &self.name {
            options.project_name = name.clone();
        }
        if let Some(description) = &self.description {
            options.description = description.clone();
        }
        if let Some(author) = &self.author {
            options.author = author.clone();
        }
        options
    }
}

/// Load, override and validate the project options.
pub fn resolve_options(explicit: Option<&str>, overrides: &Overrides) -> McpResult<ProjectOptions> {
    let options = match resolve_config_path(explicit) {
        Some(path) => load_options(&path).map_err(|e| {
            McpError::Internal(format!("Failed to load {}: {e}", path.display()))
        })?,
        None => ProjectOptions::default(),
    };

    let options = overrides.apply(options);
    options.validate()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_action_core::Feature;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"projectName": "Weather Bot", "features": ["tools"]}}"#
        )
        .unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.project_name, "Weather Bot");
        assert_eq!(options.normalized_name(), "weather-bot");
        assert_eq!(options.features, vec![Feature::Tools]);
        assert!(options.include_examples);
    }

    #[test]
    fn test_explicit_path_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"projectName": "from-file", "author": "A"}"#).unwrap();

        let overrides = Overrides {
            name: Some("from-flag".to_string()),
            ..Overrides::default()
        };
        let options = resolve_options(path.to_str(), &overrides).unwrap();
        assert_eq!(options.project_name, "from-flag");
        assert_eq!(options.author, "A");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(resolve_options(path.to_str(), &Overrides::default()).is_err());
    }

    #[test]
    fn test_unusable_name_rejected() {
        let overrides = Overrides {
            name: Some("!!!".to_string()),
            ..Overrides::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "{}").unwrap();
        let err = resolve_options(path.to_str(), &overrides).unwrap_err();
        assert_eq!(err.code(), -32602);
    }
}
