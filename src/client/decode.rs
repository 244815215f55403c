//! Response Decoding
//!
//! Turns a normalized response [`Body`] into typed entities.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::Body;

/// Why a body could not be turned into the requested type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A list endpoint answered with something other than a JSON array
    #[error("expected a JSON array, got {found}")]
    NotAList { found: &'static str },

    /// An object endpoint answered with plain text
    #[error("expected JSON, got plain text")]
    NotJson,

    /// JSON of the wrong shape
    #[error("{0}")]
    Shape(String),
}

/// Decode a list body element by element
pub fn list<T: DeserializeOwned>(body: &Body) -> Result<Vec<T>, DecodeError> {
    match body {
        Body::Json(Value::Array(items)) => items
            .iter()
            .cloned()
            .map(|item| serde_json::from_value(item).map_err(|e| DecodeError::Shape(e.to_string())))
            .collect(),
        Body::Json(other) => Err(DecodeError::NotAList {
            found: kind_of(other),
        }),
        Body::Text(_) => Err(DecodeError::NotAList { found: "text" }),
    }
}

/// Decode a single JSON object
pub fn object<T: DeserializeOwned>(body: &Body) -> Result<T, DecodeError> {
    match body {
        Body::Json(value) => {
            serde_json::from_value(value.clone()).map_err(|e| DecodeError::Shape(e.to_string()))
        }
        Body::Text(_) => Err(DecodeError::NotJson),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
