//! Response body decoding.
//!
//! The local bridge sits behind nginx and does not always send a
//! `Content-Length`, so bodies are always read as text first and then parsed
//! according to the `Content-Type` header.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::CONTENT_TYPE_JSON;
use crate::error::{HueError, HueResult};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Body parsed from a JSON content type.
    Json(serde_json::Value),
    /// Raw body text, either a non-JSON content type or unparseable JSON.
    Text(String),
}

impl ResponseData {
    /// Decode a body by content type.
    ///
    /// A JSON content type whose body fails to parse (an empty body
    /// included) is kept as raw text instead of failing.
    pub fn decode(content_type: Option<&str>, text: String) -> Self {
        let is_json = content_type
            .map(|ct| ct.starts_with(CONTENT_TYPE_JSON))
            .unwrap_or(false);

        if is_json {
            if let Ok(value) = serde_json::from_str(&text) {
                return ResponseData::Json(value);
            }
        }
        ResponseData::Text(text)
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(v) => Some(v),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(s) => Some(s),
            ResponseData::Json(_) => None,
        }
    }

    /// Whether the body carries a meaningful value: non-empty text, or JSON
    /// other than `null`, `false`, `0` and `""`.
    pub fn is_truthy(&self) -> bool {
        match self {
            ResponseData::Text(s) => !s.is_empty(),
            ResponseData::Json(v) => match v {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
                serde_json::Value::String(s) => !s.is_empty(),
                _ => true,
            },
        }
    }

    /// Serialize as JSON text; raw text becomes a JSON string literal.
    pub fn to_json_string(&self) -> String {
        match self {
            ResponseData::Json(v) => v.to_string(),
            ResponseData::Text(s) => serde_json::Value::String(s.clone()).to_string(),
        }
    }

    /// Deserialize a JSON body into a typed value.
    pub fn into_typed<T: DeserializeOwned>(self) -> HueResult<T> {
        match self {
            ResponseData::Json(v) => Ok(serde_json::from_value(v)?),
            ResponseData::Text(s) => Err(HueError::Serialization(format!(
                "expected a JSON body, got text: {s:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json() {
        let data = ResponseData::decode(
            Some("application/json; charset=utf-8"),
            r#"{"bridgeid":"001788fffe000000"}"#.into(),
        );
        assert_eq!(data, ResponseData::Json(json!({"bridgeid": "001788fffe000000"})));
    }

    #[test]
    fn test_decode_empty_json_body_is_text() {
        let data = ResponseData::decode(Some("application/json"), String::new());
        assert_eq!(data, ResponseData::Text(String::new()));
        assert!(!data.is_truthy());
    }

    #[test]
    fn test_decode_malformed_json_falls_back_to_text() {
        let data = ResponseData::decode(Some("application/json"), "<html>".into());
        assert_eq!(data.as_text(), Some("<html>"));
    }

    #[test]
    fn test_decode_non_json_content_type() {
        let data = ResponseData::decode(Some("text/plain"), "[1,2]".into());
        assert_eq!(data.as_text(), Some("[1,2]"));

        let data = ResponseData::decode(None, "{}".into());
        assert_eq!(data.as_text(), Some("{}"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!ResponseData::Json(json!(null)).is_truthy());
        assert!(!ResponseData::Json(json!(0)).is_truthy());
        assert!(!ResponseData::Json(json!("")).is_truthy());
        assert!(ResponseData::Json(json!([])).is_truthy());
        assert!(ResponseData::Text("x".into()).is_truthy());
    }

    #[test]
    fn test_into_typed_rejects_text() {
        let data = ResponseData::Text("nope".into());
        assert!(data.into_typed::<serde_json::Value>().is_err());
    }
}
