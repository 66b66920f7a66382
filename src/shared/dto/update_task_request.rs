use serde::Deserialize;
use serde_json::Value;

use crate::{
    create_task_request::validate_title,
    field_errors::{bool_field, keep_null, string_field, FieldErrors, REQUIRED},
    task::TaskChanges,
};

/// Body of `PUT`/`PATCH /api/<id>/`. Unknown and read-only fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "keep_null")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "keep_null")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "keep_null")]
    pub is_completed: Option<Value>,
}

impl UpdateTaskRequest {
    /// `partial` is false for PUT, where `title` must be present.
    pub fn validate(self, partial: bool) -> Result<TaskChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.is_none() && !partial {
            errors.add("title", REQUIRED);
        }
        let title = string_field(self.title, "title", &mut errors)
            .and_then(|title| validate_title(&title, &mut errors));
        let description = string_field(self.description, "description", &mut errors);
        let is_completed = bool_field(self.is_completed, "is_completed", &mut errors);
        errors.into_result()?;

        Ok(TaskChanges {
            title,
            description: description.map(|d| d.trim().to_string()),
            is_completed,
        })
    }
}
