use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task_response::TaskResponse;

/// A to-do item. `owner` and `created_at` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

/// Validated field changes for an existing task. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl Task {
    pub fn new(owner: Uuid, new_task: NewTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title: new_task.title,
            description: new_task.description,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(is_completed) = changes.is_completed {
            self.is_completed = is_completed;
        }
    }

    pub fn to_response(&self, owner_username: &str) -> TaskResponse {
        TaskResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            is_completed: self.is_completed,
            created_at: self.created_at,
            owner: owner_username.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(
            Uuid::new_v4(),
            NewTask {
                title: "Write report".to_string(),
                description: "Quarterly numbers".to_string(),
            },
        )
    }

    #[test]
    fn new_task_starts_pending() {
        let task = sample();
        assert!(!task.is_completed);
        assert_eq!(task.title, "Write report");
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut task = sample();
        let before = task.clone();

        task.apply(&TaskChanges {
            is_completed: Some(true),
            ..TaskChanges::default()
        });

        assert!(task.is_completed);
        assert_eq!(task.title, before.title);
        assert_eq!(task.description, before.description);
        assert_eq!(task.owner, before.owner);
        assert_eq!(task.created_at, before.created_at);
    }

    #[test]
    fn postcard_round_trip_keeps_timestamp() {
        let task = sample();
        let bytes = postcard::to_allocvec(&task).unwrap();
        let decoded: Task = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, task);
    }
}
