//! リクエストボディの解釈

use fixture_api_common::error::{FixtureApiError, FixtureResult};
use serde_json::{Map, Value};

/// ボディをJSONとして読む（空ボディは `{}`）
pub fn parse_json(bytes: &[u8]) -> FixtureResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|err| FixtureApiError::InvalidBody(err.to_string()))
}

/// ボディをJSONオブジェクトとして読む
pub fn parse_object(bytes: &[u8]) -> FixtureResult<Map<String, Value>> {
    match parse_json(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(FixtureApiError::InvalidBody(
            "request body must be a JSON object".to_string(),
        )),
    }
}
