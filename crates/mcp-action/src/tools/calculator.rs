//! Tool: calculator. Evaluates arithmetic with the safe parser from core.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use mcp_action_core::{calculator, NumberFormat};

use crate::types::{McpError, McpResult, ParameterSpec, ToolCallResult};

use super::registry::{Tool, ToolHandler};

#[derive(Debug, Default, Deserialize)]
struct CalculatorParams {
    #[serde(default)]
    expression: String,
    /// Any name other than `scientific` or `fraction` renders as decimal.
    #[serde(default)]
    format: Option<String>,
}

pub struct Calculator;

#[async_trait]
impl ToolHandler for Calculator {
    async fn execute(&self, args: Value) -> McpResult<ToolCallResult> {
        let params: CalculatorParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;
        let format = NumberFormat::from_name(params.format.as_deref().unwrap_or_default());
        let expression = params.expression;

        tracing::info!("Calculator called with expression: {expression}");

        match calculator::evaluate(&expression) {
            Ok(value) => Ok(ToolCallResult::text(format!(
                "🧮 Calculation Result:\n\nExpression: {expression}\nResult: {}",
                format.render(value)
            ))),
            Err(e) => {
                tracing::warn!("Calculation failed: {e}");
                Ok(ToolCallResult::error(format!(
                    "❌ Calculation Error:\n\nExpression: {expression}\nError: {e}\n\nPlease check your expression and try again."
                )))
            }
        }
    }
}

pub fn tool() -> Tool {
    Tool::new(
        "calculator",
        "Perform basic mathematical calculations. Supports +, -, *, / and parentheses.",
        Calculator,
    )
    .param(
        "expression",
        ParameterSpec::string(
            "Arithmetic expression to evaluate (e.g., \"2 + 3 * 4\", \"(1 + 2) / -4\")",
        ),
    )
    .param(
        "format",
        ParameterSpec::string("Number format for the result (default: decimal)")
            .one_of(&NumberFormat::NAMES),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(args: Value) -> (String, Option<bool>) {
        let result = tokio_test::block_on(Calculator.execute(args)).unwrap();
        (result.content[0].as_text().to_string(), result.is_error)
    }

    #[test]
    fn test_formats_render_same_value() {
        let (decimal, _) = text(json!({"expression": "2 + 3 * 4"}));
        assert!(decimal.ends_with("Result: 14"));
        let (scientific, _) = text(json!({"expression": "2 + 3 * 4", "format": "scientific"}));
        assert!(scientific.ends_with("Result: 1.400000e+1"));
        let (fraction, _) = text(json!({"expression": "2 + 3 * 4", "format": "fraction"}));
        assert!(fraction.ends_with("Result: ≈ 14.000000"));
    }

    #[test]
    fn test_bad_expression_is_tool_level_error() {
        let (body, is_error) = text(json!({"expression": "hello"}));
        assert!(body.starts_with("❌ Calculation Error:"));
        assert!(body.contains("Error: Invalid expression"));
        assert_eq!(is_error, Some(true));
    }

    #[test]
    fn test_missing_expression() {
        let (body, is_error) = text(json!({}));
        assert!(body.contains("Expression: \n"));
        assert_eq!(is_error, Some(true));
    }

    #[test]
    fn test_deep_nesting_is_tool_level_error() {
        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let (body, is_error) = text(json!({ "expression": deep }));
        assert!(body.contains("Error: Expression nested too deeply"));
        assert_eq!(is_error, Some(true));

        let signs = format!("{}7", "-".repeat(100_000));
        let (body, is_error) = text(json!({ "expression": signs }));
        assert!(body.ends_with("Result: 7"));
        assert!(is_error.is_none());
    }

    #[test]
    fn test_description_promises_only_arithmetic() {
        let definition = tool().definition();
        assert!(!definition.description.contains("functions"));
        let example = definition.input_schema["properties"]["expression"]["description"]
            .as_str()
            .unwrap();
        assert!(!example.contains("sin("));
    }

    #[test]
    fn test_unknown_format_falls_back_to_decimal() {
        let (body, _) = text(json!({"expression": "1/4", "format": "roman"}));
        assert!(body.ends_with("Result: 0.25"));
    }
}
