//! Typed accessors over a tool call's JSON argument payload.

use crate::error::TangentError;

/// Parsed tool arguments with typed getters.
///
/// Wraps the JSON value that already passed schema validation; getters
/// fail with [`TangentError::InvalidArgument`] on missing or mistyped
/// fields so handler code can use `?` freely.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// The raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Required string field.
    pub fn get_str(&self, name: &str) -> Result<&str, TangentError> {
        self.value
            .get(name)
            .and_then(|v| v.as_str())
            .ok_or_else(|| missing(name, "string"))
    }

    /// Required integer field.
    pub fn get_i64(&self, name: &str) -> Result<i64, TangentError> {
        self.value
            .get(name)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| missing(name, "integer"))
    }

    /// Required number field.
    pub fn get_f64(&self, name: &str) -> Result<f64, TangentError> {
        self.value
            .get(name)
            .and_then(|v| v.as_f64())
            .ok_or_else(|| missing(name, "number"))
    }

    /// Required boolean field.
    pub fn get_bool(&self, name: &str) -> Result<bool, TangentError> {
        self.value
            .get(name)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| missing(name, "boolean"))
    }

    /// Optional string field.
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.value.get(name).and_then(|v| v.as_str())
    }

    /// Optional integer field.
    pub fn opt_i64(&self, name: &str) -> Option<i64> {
        self.value.get(name).and_then(|v| v.as_i64())
    }

    /// Optional number field.
    pub fn opt_f64(&self, name: &str) -> Option<f64> {
        self.value.get(name).and_then(|v| v.as_f64())
    }

    /// Deserialize the whole payload into a typed struct.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, TangentError> {
        serde_json::from_value(self.value.clone()).map_err(TangentError::from)
    }
}

fn missing(name: &str, expected: &str) -> TangentError {
    TangentError::InvalidArgument(format!("missing or non-{expected} field '{name}'"))
}
