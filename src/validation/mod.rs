pub mod transaction;
pub mod user;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::error::{FieldError, ValidationError};

/// Field name used when the body itself is not a JSON object
const BODY: &str = "body";

/// Reads a JSON object body one field at a time
///
/// A value of the wrong type is recorded against its own field, so one bad field
/// does not hide the problems in the others.
struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Value) -> Self {
        let object = body.as_object();
        let errors = match object {
            Some(_) => Vec::new(),
            None => vec![FieldError::new(BODY, "must be a JSON object")],
        };
        Self { object, errors }
    }

    /// Absent and null both read as None
    fn read<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        let value = self.object?.get(field).filter(|value| !value.is_null())?;

        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.errors
                    .push(FieldError::new(field, format!("has an invalid value: {}", e)));
                None
            }
        }
    }

    fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// True once the field (or the whole body) already has an error recorded
fn has_error(errors: &[FieldError], field: &str) -> bool {
    errors
        .iter()
        .any(|error| error.field == field || error.field == BODY)
}

/// Record a "required" error unless the field was already rejected for its type
fn missing(field: &str, errors: &mut Vec<FieldError>) {
    if !has_error(errors, field) {
        errors.push(FieldError::new(field, "is required"));
    }
}

/// Turn collected field errors into a result
fn finish<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(ValidationError::InvalidFields(errors))
    }
}

/// Trimmed, non-empty text or a "required" error
fn required_text(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> String {
    match value.map(|text| text.trim().to_string()) {
        Some(text) if !text.is_empty() => text,
        _ => {
            missing(field, errors);
            String::new()
        }
    }
}

/// Trimmed text, with blank strings treated as absent
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
