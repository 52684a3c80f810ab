//! Prompt: weather_info. Explains the weather tool around an example city.

use super::registry::Prompt;

const TEMPLATE: &str = "Explain how the weather tool works in this MCP server.

Example city: {city}

The weather tool:
- Takes a city name as input
- Returns current weather information
- Shows temperature, conditions, humidity, wind, and other details
- Currently uses mock/example data for demonstration
- Can be replaced with real weather API calls for production use

Note: This is a demonstration tool that shows how to build weather functionality in an MCP server.";

pub fn prompt() -> Prompt {
    Prompt::new(
        "weather_info",
        "Simple prompt to explain the weather tool functionality",
        TEMPLATE,
    )
    .argument("city", "City name to use in the example", false)
}
