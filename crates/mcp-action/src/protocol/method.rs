//! The closed set of JSON-RPC methods the server answers.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Initialized,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
    /// Any other `notifications/*` method. Acknowledged, never acted on.
    Notification(String),
    Unknown(String),
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        match name {
            "initialize" => Method::Initialize,
            "notifications/initialized" => Method::Initialized,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            "resources/list" => Method::ResourcesList,
            "resources/read" => Method::ResourcesRead,
            "prompts/list" => Method::PromptsList,
            "prompts/get" => Method::PromptsGet,
            other if other.starts_with("notifications/") => {
                Method::Notification(other.to_string())
            }
            other => Method::Unknown(other.to_string()),
        }
    }
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Initialize => "initialize",
            Method::Initialized => "notifications/initialized",
            Method::ToolsList => "tools/list",
            Method::ToolsCall => "tools/call",
            Method::ResourcesList => "resources/list",
            Method::ResourcesRead => "resources/read",
            Method::PromptsList => "prompts/list",
            Method::PromptsGet => "prompts/get",
            Method::Notification(name) | Method::Unknown(name) => name,
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Method::Initialized | Method::Notification(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_case_sensitive_names() {
        assert_eq!(Method::from("tools/call"), Method::ToolsCall);
        assert_eq!(
            Method::from("Tools/Call"),
            Method::Unknown("Tools/Call".to_string())
        );
        assert_eq!(Method::from("ping"), Method::Unknown("ping".to_string()));
    }

    #[test]
    fn test_notifications() {
        assert_eq!(Method::from("notifications/initialized"), Method::Initialized);
        let cancelled = Method::from("notifications/cancelled");
        assert!(cancelled.is_notification());
        assert_eq!(cancelled.as_str(), "notifications/cancelled");
        assert!(!Method::ToolsList.is_notification());
    }
}
