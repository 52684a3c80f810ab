//! Newline-delimited JSON framing for the stdio transport.

use serde_json::Value;

use crate::protocol::RawBody;
use crate::types::{McpError, McpResult};

/// One input line as a raw body. Blank lines are `None`.
pub fn read_line(line: &str) -> Option<RawBody> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| RawBody::from(trimmed))
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_lines_skipped() {
        assert!(read_line("   \n").is_none());
        assert_eq!(
            read_line("{\"method\":\"x\"}\n"),
            Some(RawBody::Text("{\"method\":\"x\"}".to_string()))
        );
    }

    #[test]
    fn test_frame_has_single_newline() {
        let framed = frame_message(&json!({"a": 1})).unwrap();
        assert_eq!(framed, "{\"a\":1}\n");
    }
}
