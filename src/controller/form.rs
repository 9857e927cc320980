use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::EmailAddress;
use crate::error::{FieldError, RestError};
use crate::store::Document;

/// Read a request body form out of a JSON object.
///
/// Bodies are extracted as `Document` first so that arrays and scalars never
/// reach a form, serde would otherwise fill struct fields by position.
pub fn from_object<T: DeserializeOwned>(document: Document) -> Result<T, RestError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| RestError::Validation(vec![FieldError::whole_body(e.to_string())]))
}

/// `deserialize_with` for form fields: an explicit `null` stays `Some(Value::Null)`,
/// only an absent field (with `#[serde(default)]`) is `None`
pub fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Collects every field failure of a request body before giving up
#[derive(Debug, Default)]
pub struct FormParser {
    errors: Vec<FieldError>,
}

impl FormParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A string that must be present, `null` is not a string
    pub fn required(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        match value {
            None => {
                self.errors.push(FieldError::body(field, "Field required"));
                None
            }
            Some(value) => self.string(field, value),
        }
    }

    /// A string that may be missing or null
    pub fn optional(&mut self, field: &str, value: Option<Value>) -> Option<String> {
        value
            .filter(|value| !value.is_null())
            .and_then(|value| self.string(field, value))
    }

    /// A required, syntactically valid email address
    pub fn email(&mut self, field: &str, value: Option<Value>) -> Option<EmailAddress> {
        let value = self.required(field, value)?;
        match value.parse() {
            Ok(email) => Some(email),
            Err(msg) => {
                self.errors.push(FieldError::body(
                    field,
                    format!("value is not a valid email address: {}", msg),
                ));
                None
            }
        }
    }

    /// Build the parsed value, or fail with every collected field error
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, RestError> {
        match build() {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(RestError::Validation(self.errors)),
        }
    }

    fn string(&mut self, field: &str, value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            _ => {
                self.errors
                    .push(FieldError::body(field, "Input should be a valid string"));
                None
            }
        }
    }
}
