use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Accounts created through signup get staff access so they can use the API.
    pub fn new_staff(username: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash,
            is_staff: true,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }

    pub fn new_superuser(username: impl Into<String>, password_hash: String) -> Self {
        Self {
            is_superuser: true,
            ..User::new_staff(username, password_hash)
        }
    }

    /// Where the browser goes after a successful login.
    pub fn landing_page(&self) -> &'static str {
        if self.is_superuser {
            "/admin/"
        } else {
            "/tasks/"
        }
    }
}
