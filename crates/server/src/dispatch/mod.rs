//! Operation-name dispatch onto the scoped backends.
//!
//! Each service maps an operation name plus a raw JSON body to one backend
//! method: decode the body into the typed wire request, invoke, encode the
//! typed wire response back to JSON. Store errors pass through 1:1 as wire
//! errors.

pub mod mesh;
pub mod transfer;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::WireError;

fn decode<T: DeserializeOwned>(operation: &str, body: Value) -> Result<T, WireError> {
    serde_json::from_value(body)
        .map_err(|e| WireError::validation(format!("malformed {operation} request: {e}")))
}

fn encode<T: Serialize>(response: &T) -> Result<Value, WireError> {
    serde_json::to_value(response)
        .map_err(|e| WireError::internal(format!("failed to encode response: {e}")))
}

fn empty() -> Value {
    Value::Object(serde_json::Map::new())
}
