use serde::Deserialize;

/// Query string of `GET /api/`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaskListQuery {
    pub created_at_after: Option<String>,
    pub created_at_before: Option<String>,
    pub search: Option<String>,
}
