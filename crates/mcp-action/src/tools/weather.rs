//! Tool: weather. Mock conditions for a city, clearly labeled as example data.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use mcp_action_core::WeatherReport;

use crate::types::{McpError, McpResult, ParameterSpec, ToolCallResult};

use super::registry::{Tool, ToolHandler};

const DEFAULT_CITY: &str = "Unknown City";

#[derive(Debug, Default, Deserialize)]
struct WeatherParams {
    #[serde(default)]
    city: Option<String>,
}

impl WeatherParams {
    fn city(&self) -> &str {
        match self.city.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CITY,
        }
    }
}

pub struct Weather;

#[async_trait]
impl ToolHandler for Weather {
    async fn execute(&self, args: Value) -> McpResult<ToolCallResult> {
        let params: WeatherParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        let city = params.city();

        tracing::info!("Weather request for {city}");

        let report = WeatherReport::generate(city, &mut rand::thread_rng(), Utc::now());
        Ok(ToolCallResult::text(report.render_text()).with_metadata(report.metadata()))
    }
}

pub fn tool() -> Tool {
    Tool::new(
        "weather",
        "Get current weather information for any city. This tool demonstrates how to integrate with external APIs and handle real-time data.",
        Weather,
    )
    .param(
        "city",
        ParameterSpec::string(
            "Name of the city to get weather for (e.g., \"San Francisco\", \"New York\", \"London\")",
        ),
    )
}
