//! Optional-chaining reads over loosely shaped JSON documents
//!
//! Backend documents (remote configuration, Hermes responses, error bodies) are
//! read through [`JsonPath`]. Each step returns another `JsonPath`, so a missing
//! key or a value of the wrong type anywhere along the way yields `None` at the
//! end instead of an error. A field only becomes fatal when the caller decides
//! it is required.

use serde_json::Value;
use url::Url;

/// A cursor into a JSON document that may point at nothing
#[derive(Debug, Clone, Copy)]
pub struct JsonPath<'a> {
    value: Option<&'a Value>,
}

impl<'a> JsonPath<'a> {
    /// Start at the root of a document
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// Step into an object key
    pub fn key(self, key: &str) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(key)),
        }
    }

    /// Step into an array element
    pub fn index(self, index: usize) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(index)),
        }
    }

    /// Step into the first element of an array
    pub fn first(self) -> Self {
        self.index(0)
    }

    /// The value at this position, if any
    pub fn value(self) -> Option<&'a Value> {
        self.value
    }

    /// True when the position holds a JSON value (including `null`)
    pub fn exists(self) -> bool {
        self.value.is_some()
    }

    /// String value, if the position holds a string
    pub fn as_str(self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// Non-empty string value
    pub fn as_non_empty_str(self) -> Option<&'a str> {
        self.as_str().filter(|s| !s.is_empty())
    }

    /// Boolean value, if the position holds a boolean
    pub fn as_bool(self) -> Option<bool> {
        self.value.and_then(Value::as_bool)
    }

    /// True only for a literal JSON `true`
    pub fn is_true(self) -> bool {
        self.as_bool() == Some(true)
    }

    /// Array value, if the position holds an array
    pub fn as_array(self) -> Option<&'a Vec<Value>> {
        self.value.and_then(Value::as_array)
    }

    /// Absolute URL parsed from a string value
    pub fn as_url(self) -> Option<Url> {
        self.as_non_empty_str().and_then(|s| Url::parse(s).ok())
    }
}

impl<'a> From<&'a Value> for JsonPath<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}
