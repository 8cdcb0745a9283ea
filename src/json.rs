//! JSON conversion helpers.
//!
//! Thin wrappers over `serde_json` for turning values into JSON text, generic
//! maps, or other serde types. Each conversion has two forms: one returning
//! [`JsonError`], and an `_opt` form that logs the failure through the
//! [global handle](crate::global) under the `JsonProcessingException` label and
//! returns `None`.
//!
//! [`Json`] lets any serializable value be passed as a log argument:
//!
//! ```
//! use tracing_labeled_logs::{info, json::Json};
//! use std::collections::BTreeMap;
//!
//! let mut order = BTreeMap::new();
//! order.insert("id", 42);
//!
//! info!("order created: {}", Json(&order));
//! ```

use crate::global;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A JSON object with string keys.
pub type JsonMap = Map<String, Value>;

/// Errors from JSON conversion.
#[derive(Debug)]
pub enum JsonError {
    /// The value could not be serialized
    Serialize(serde_json::Error),
    /// The JSON did not match the target type
    Deserialize(serde_json::Error),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Serialize(e) => write!(f, "serialization failed: {}", e),
            JsonError::Deserialize(e) => write!(f, "deserialization failed: {}", e),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonError::Serialize(e) | JsonError::Deserialize(e) => Some(e),
        }
    }
}

/// Serialize a value to JSON text.
pub fn to_string<T>(value: &T) -> Result<String, JsonError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(JsonError::Serialize)
}

/// Parse JSON text into `T`.
pub fn parse<T>(json: &str) -> Result<T, JsonError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json).map_err(JsonError::Deserialize)
}

/// Convert a value into another serde type by way of its JSON form.
pub fn convert<T, U>(value: &U) -> Result<T, JsonError>
where
    T: DeserializeOwned,
    U: Serialize + ?Sized,
{
    let intermediate = serde_json::to_value(value).map_err(JsonError::Serialize)?;
    serde_json::from_value(intermediate).map_err(JsonError::Deserialize)
}

/// Convert a value into a JSON object.
pub fn to_map<U>(value: &U) -> Result<JsonMap, JsonError>
where
    U: Serialize + ?Sized,
{
    convert(value)
}

/// Convert a list of values into a list of JSON objects.
pub fn to_list_map<U>(values: &[U]) -> Result<Vec<JsonMap>, JsonError>
where
    U: Serialize,
{
    convert(values)
}

/// Like [`to_string`], logging the failure instead of returning it.
pub fn to_string_opt<T>(value: &T) -> Option<String>
where
    T: Serialize + ?Sized,
{
    report("to_string", to_string(value))
}

/// Like [`parse`], logging the failure instead of returning it.
pub fn parse_opt<T>(json: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    report("parse", parse(json))
}

/// Like [`convert`], logging the failure instead of returning it.
pub fn convert_opt<T, U>(value: &U) -> Option<T>
where
    T: DeserializeOwned,
    U: Serialize + ?Sized,
{
    report("convert", convert(value))
}

/// Like [`to_map`], logging the failure instead of returning it.
pub fn to_map_opt<U>(value: &U) -> Option<JsonMap>
where
    U: Serialize + ?Sized,
{
    report("to_map", to_map(value))
}

/// Like [`to_list_map`], logging the failure instead of returning it.
pub fn to_list_map_opt<U>(values: &[U]) -> Option<Vec<JsonMap>>
where
    U: Serialize,
{
    report("to_list_map", to_list_map(values))
}

fn report<T>(method: &str, result: Result<T, JsonError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            global::labels(["JsonProcessingException"])
                .error("{} method failed, message : {}", &[&method, &e]);
            None
        }
    }
}

/// Displays a serializable value as compact JSON.
///
/// # Panics
/// Formatting panics (like any failing `Display`) if the value cannot be
/// serialized, e.g. a map with non-string keys.
#[derive(Debug, Clone, Copy)]
pub struct Json<'a, T: ?Sized>(pub &'a T);

impl<T> fmt::Display for Json<'_, T>
where
    T: Serialize + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
