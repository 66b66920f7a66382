use serde::Deserialize;
use serde_json::Value;

use crate::{
    field_errors::{keep_null, string_field, FieldErrors, BLANK, REQUIRED},
    task::NewTask,
};

pub const TITLE_MAX_CHARS: usize = 200;

/// Body of `POST /api/`. Read-only fields (`id`, `owner`, `created_at`,
/// `is_completed`) are accepted and ignored. Fields stay raw JSON so type
/// errors are reported per field.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, deserialize_with = "keep_null")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "keep_null")]
    pub description: Option<Value>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<NewTask, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.is_none() {
            errors.add("title", REQUIRED);
        }
        let title = string_field(self.title, "title", &mut errors)
            .and_then(|title| validate_title(&title, &mut errors));
        let description = string_field(self.description, "description", &mut errors);
        errors.into_result()?;

        Ok(NewTask {
            title: title.unwrap_or_default(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
        })
    }
}

/// Trims `raw` and checks it is a usable title, recording failures under `title`.
pub fn validate_title(raw: &str, errors: &mut FieldErrors) -> Option<String> {
    let title = raw.trim();
    if title.is_empty() {
        errors.add("title", BLANK);
        return None;
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
        );
        return None;
    }
    Some(title.to_string())
}
