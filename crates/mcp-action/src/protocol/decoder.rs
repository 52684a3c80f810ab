//! Request decoding: raw body (string, base64 string, or JSON value) to a
//! structured JSON-RPC request.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult};

use super::validator::validate_shape;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A body as the runtime hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBody {
    Text(String),
    Json(Value),
}

impl From<&str> for RawBody {
    fn from(s: &str) -> Self {
        RawBody::Text(s.to_string())
    }
}

impl From<Value> for RawBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawBody::Text(s),
            other => RawBody::Json(other),
        }
    }
}

fn looks_base64(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

fn try_base64_json(text: &str) -> Option<Value> {
    let bytes = match LENIENT_BASE64.decode(text) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Body is not base64 ({e}), parsing as JSON");
            return None;
        }
    };
    let decoded = String::from_utf8(bytes).ok()?;
    match serde_json::from_str(&decoded) {
        Ok(value) => {
            tracing::debug!("Decoded base64 body");
            Some(value)
        }
        Err(e) => {
            tracing::debug!("Base64 body is not JSON ({e}), parsing original text");
            None
        }
    }
}

fn parse_text(text: &str) -> McpResult<Value> {
    if text.is_empty() {
        return Err(McpError::EmptyBody);
    }
    if looks_base64(text) {
        if let Some(value) = try_base64_json(text) {
            return Ok(value);
        }
    }
    serde_json::from_str(text).map_err(|e| McpError::BodyParse(e.to_string()))
}

/// Decode a raw body into a request.
///
/// No body, an empty string or JSON `null` is [`McpError::EmptyBody`]. Text
/// in the base64 alphabet is tried as base64-encoded JSON first and, failing
/// that, parsed as JSON directly. Unparsable text is [`McpError::BodyParse`];
/// parsed JSON without an object shape and a string `method` is
/// [`McpError::InvalidRequest`].
pub fn decode(body: Option<&RawBody>) -> McpResult<JsonRpcRequest> {
    let value = match body {
        None => return Err(McpError::EmptyBody),
        Some(RawBody::Text(text)) => parse_text(text)?,
        Some(RawBody::Json(value)) => value.clone(),
    };

    if value.is_null() {
        return Err(McpError::EmptyBody);
    }
    validate_shape(&value)?;

    serde_json::from_value(value).map_err(|e| McpError::InvalidRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
    use serde_json::json;

    use crate::types::RequestId;

    fn text(s: &str) -> Option<RawBody> {
        Some(RawBody::from(s))
    }

    #[test]
    fn test_plain_json() {
        let request = decode(text(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).as_ref())
            .unwrap();
        assert_eq!(request.method, "tools/list");
        assert_eq!(request.id, RequestId::from(1));
    }

    #[test]
    fn test_base64_matches_plain() {
        let raw = r#"{"jsonrpc":"2.0","id":"a","method":"prompts/get","params":{"name":"weather_info"}}"#;
        let plain = decode(text(raw).as_ref()).unwrap();
        let padded = decode(text(&STANDARD.encode(raw)).as_ref()).unwrap();
        let unpadded = decode(text(&STANDARD_NO_PAD.encode(raw)).as_ref()).unwrap();
        assert_eq!(plain, padded);
        assert_eq!(plain, unpadded);
    }

    #[test]
    fn test_object_used_as_is() {
        let body = RawBody::from(json!({"jsonrpc": "2.0", "id": null, "method": "initialize"}));
        let request = decode(Some(&body)).unwrap();
        assert_eq!(request.method, "initialize");
        assert_eq!(request.id, RequestId::Null);
    }

    #[test]
    fn test_empty_bodies() {
        assert!(matches!(decode(None), Err(McpError::EmptyBody)));
        assert!(matches!(decode(text("").as_ref()), Err(McpError::EmptyBody)));
        assert!(matches!(
            decode(Some(&RawBody::Json(Value::Null))),
            Err(McpError::EmptyBody)
        ));
        assert!(matches!(decode(text("null").as_ref()), Err(McpError::EmptyBody)));
    }

    #[test]
    fn test_not_json() {
        let err = decode(text("not json").as_ref()).unwrap_err();
        assert!(matches!(err, McpError::BodyParse(_)));
        assert_eq!(err.code(), -32603);
    }

    #[test]
    fn test_base64_alphabet_but_not_base64_json() {
        // "abcd" decodes as base64 but not to JSON, and is not JSON itself.
        let err = decode(text("abcd").as_ref()).unwrap_err();
        assert!(matches!(err, McpError::BodyParse(_)));
    }

    #[test]
    fn test_base64_alphabet_falls_back_to_literal_json() {
        // "1400" is valid base64 for UTF-8 text that is not JSON.
        let decoded = LENIENT_BASE64.decode("1400").unwrap();
        assert!(String::from_utf8(decoded).is_ok());
        assert_eq!(parse_text("1400").unwrap(), json!(1400));
        assert_eq!(parse_text("true").unwrap(), json!(true));

        let err = decode(text("1400").as_ref()).unwrap_err();
        assert!(matches!(err, McpError::InvalidRequest(_)));
    }

    #[test]
    fn test_parsed_but_not_a_request() {
        let err = decode(text("[1,2,3]").as_ref()).unwrap_err();
        assert!(matches!(err, McpError::InvalidRequest(_)));
        let err = decode(text(r#"{"id":3}"#).as_ref()).unwrap_err();
        assert_eq!(err.http_status(), 400);
    }
}
