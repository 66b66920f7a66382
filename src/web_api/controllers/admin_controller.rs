use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use uuid::Uuid;

use crate::{
    admin_task_query::AdminTaskQuery,
    api_error::ApiError,
    app_state::SharedState,
    data_access::{data_error::DataError, task_filter::AdminTaskFilter},
    pages::{self, AdminRow},
    task::Task,
    user::User,
};

pub struct AdminController {}

impl AdminController {
    /// All tasks across owners, newest first. Superusers only.
    pub async fn index(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Query(query): Query<AdminTaskQuery>,
    ) -> Response {
        if !user.is_superuser {
            tracing::warn!(actor = %user.username, "non-superuser denied admin listing");
            return (StatusCode::FORBIDDEN, pages::forbidden()).into_response();
        }

        let filter = AdminTaskFilter::from_query(&query);
        match Self::load(&state, &filter) {
            Ok((tasks, usernames)) => {
                let rows: Vec<AdminRow<'_>> = tasks
                    .iter()
                    .map(|task| AdminRow {
                        task,
                        owner: usernames.get(&task.owner).map(String::as_str).unwrap_or("?"),
                    })
                    .collect();
                pages::admin_listing(&user, &rows, query.q.as_deref().unwrap_or(""), &filter).into_response()
            }
            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn load(
        state: &SharedState,
        filter: &AdminTaskFilter,
    ) -> Result<(Vec<Task>, HashMap<Uuid, String>), DataError> {
        let usernames: HashMap<_, _> = state
            .data_context
            .list_users()?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();
        let tasks = state
            .data_context
            .list_tasks()?
            .into_iter()
            .filter(|task| {
                let owner = usernames.get(&task.owner).map(String::as_str).unwrap_or("");
                filter.matches(task, owner)
            })
            .collect();
        Ok((tasks, usernames))
    }
}
