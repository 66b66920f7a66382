use serde::Deserialize;

/// Query string of the admin task listing.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AdminTaskQuery {
    /// Matched against title, description and owner username.
    pub q: Option<String>,
    pub is_completed: Option<String>,
    pub owner: Option<String>,
}
