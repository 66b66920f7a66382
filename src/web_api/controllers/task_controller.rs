use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    api_error::ApiError, app_state::SharedState, create_task_request::CreateTaskRequest,
    data_access::task_filter::TaskFilter, task_list_query::TaskListQuery, task_response::TaskResponse,
    update_task_request::UpdateTaskRequest, user::User,
};

pub struct TaskController {}

impl TaskController {
    pub async fn list(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        query: Result<Query<TaskListQuery>, QueryRejection>,
    ) -> Result<Json<Vec<TaskResponse>>, ApiError> {
        let Query(query) = query?;
        let filter = TaskFilter::from_query(&query)?;
        let tasks = state.data_context.tasks_owned_by(&user).list(&filter)?;
        Ok(Json(tasks.iter().map(|task| task.to_response(&user.username)).collect()))
    }

    pub async fn create(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        payload: Result<Json<CreateTaskRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
        let Json(payload) = payload?;
        let new_task = payload.validate()?;
        let task = state.data_context.tasks_owned_by(&user).create(new_task)?;

        tracing::info!(actor = %user.username, task_id = %task.id, title = %task.title, "task created");
        Ok((StatusCode::CREATED, Json(task.to_response(&user.username))))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let id = parse_task_id(&id)?;
        let task = state
            .data_context
            .tasks_owned_by(&user)
            .get(id)?
            .ok_or(ApiError::NotFound)?;
        Ok(Json(task.to_response(&user.username)))
    }

    /// PUT: `title` must be supplied.
    pub async fn update(
        state: State<SharedState>,
        user: Extension<User>,
        id: Path<String>,
        payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        Self::apply_update(state, user, id, payload, false).await
    }

    /// PATCH: any subset of the mutable fields.
    pub async fn partial_update(
        state: State<SharedState>,
        user: Extension<User>,
        id: Path<String>,
        payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        Self::apply_update(state, user, id, payload, true).await
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        let id = parse_task_id(&id)?;
        let task = state
            .data_context
            .tasks_owned_by(&user)
            .delete(id)?
            .ok_or(ApiError::NotFound)?;

        tracing::warn!(actor = %user.username, task_id = %task.id, title = %task.title, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    }

    async fn apply_update(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
        payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
        partial: bool,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let id = parse_task_id(&id)?;
        let scope = state.data_context.tasks_owned_by(&user);
        // Foreign and missing ids are rejected before the body is validated.
        if scope.get(id)?.is_none() {
            return Err(ApiError::NotFound);
        }

        let Json(payload) = payload?;
        let changes = payload.validate(partial)?;
        let task = scope.update(id, &changes)?.ok_or(ApiError::NotFound)?;

        if let Some(is_completed) = changes.is_completed {
            let status = if is_completed { "completed" } else { "pending" };
            tracing::info!(actor = %user.username, task_id = %task.id, title = %task.title, status, "task status changed");
        }
        Ok(Json(task.to_response(&user.username)))
    }
}

/// Ids that are not UUIDs cannot name any task.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
