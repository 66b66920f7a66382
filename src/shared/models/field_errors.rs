use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";

/// Validation messages keyed by the name of the offending input field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// `deserialize_with` target that keeps an explicit `null` as `Some(Value::Null)`.
/// Pair it with `#[serde(default)]` so a missing field is still `None`.
pub fn keep_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Reads an optional JSON string. An absent field stays `None`; `null` and
/// non-string values are recorded under `field`.
pub fn string_field(value: Option<Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Null => {
            errors.add(field, NULL);
            None
        }
        _ => {
            errors.add(field, INVALID_STRING);
            None
        }
    }
}

/// Reads an optional JSON boolean, with the same rules as [`string_field`].
pub fn bool_field(value: Option<Value>, field: &str, errors: &mut FieldErrors) -> Option<bool> {
    match value? {
        Value::Bool(flag) => Some(flag),
        Value::Null => {
            errors.add(field, NULL);
            None
        }
        _ => {
            errors.add(field, INVALID_BOOLEAN);
            None
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_field_map() {
        let mut errors = FieldErrors::single("title", BLANK);
        errors.add("title", "Ensure this field has no more than 200 characters.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": ["This field may not be blank.", "Ensure this field has no more than 200 characters."]
            })
        );
    }

    #[test]
    fn json_fields_reject_null_and_wrong_types() {
        let mut errors = FieldErrors::new();

        assert_eq!(string_field(None, "title", &mut errors), None);
        assert_eq!(string_field(Some(json!("ok")), "title", &mut errors).as_deref(), Some("ok"));
        assert_eq!(bool_field(Some(json!(false)), "is_completed", &mut errors), Some(false));
        assert!(errors.is_empty());

        assert_eq!(string_field(Some(Value::Null), "title", &mut errors), None);
        assert_eq!(string_field(Some(json!(42)), "description", &mut errors), None);
        assert_eq!(bool_field(Some(json!("yes")), "is_completed", &mut errors), None);
        assert_eq!(errors.get("title"), [NULL.to_string()]);
        assert_eq!(errors.get("description"), [INVALID_STRING.to_string()]);
        assert_eq!(errors.get("is_completed"), [INVALID_BOOLEAN.to_string()]);
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("username", REQUIRED).into_result().is_err());
    }
}
