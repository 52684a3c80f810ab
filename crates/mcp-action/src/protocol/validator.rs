//! JSON-RPC envelope checks applied before dispatch.

use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// A decoded body must be an object carrying a string `method` and, when
/// present, a string, number or null `id`.
pub fn validate_shape(value: &Value) -> McpResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| McpError::InvalidRequest("body must be a JSON object".to_string()))?;

    if let Some(Value::Array(_) | Value::Object(_) | Value::Bool(_)) = object.get("id") {
        return Err(McpError::InvalidRequest(
            "id must be a string, number or null".to_string(),
        ));
    }

    match object.get("method") {
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(McpError::InvalidRequest(
            "method must be a string".to_string(),
        )),
        None => Err(McpError::InvalidRequest("missing method".to_string())),
    }
}

pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "expected jsonrpc \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(McpError::InvalidRequest(
            "method must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape() {
        assert!(validate_shape(&json!({"method": "tools/list"})).is_ok());
        assert!(validate_shape(&json!([1, 2])).is_err());
        assert!(validate_shape(&json!({"id": 1})).is_err());
        assert!(validate_shape(&json!({"method": 7})).is_err());
    }

    #[test]
    fn test_id_kinds() {
        for id in [json!(1.5), json!(u64::MAX), json!("x"), Value::Null] {
            assert!(validate_shape(&json!({"id": id, "method": "ping"})).is_ok());
        }
        let err = validate_shape(&json!({"id": [1], "method": "ping"})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Request - id must be a string, number or null");
    }

    #[test]
    fn test_version_and_method() {
        let mut request = JsonRpcRequest::new(1, "tools/list", None);
        assert!(validate_request(&request).is_ok());
        request.jsonrpc = "1.0".to_string();
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err.code(), -32600);
        let request = JsonRpcRequest::new(1, "", None);
        assert!(validate_request(&request).is_err());
    }
}
