use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension,
};

use crate::{api_error::ApiError, app_state::SharedState, authentication::auth, pages, user::User};

pub struct PageController {}

impl PageController {
    pub async fn home(State(state): State<SharedState>, headers: HeaderMap) -> Response {
        match auth::session_user(&state, &headers) {
            Ok(user) => pages::home(user.as_ref()).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }

    /// Shell only; the page script fetches tasks from the API.
    pub async fn task_interface(State(state): State<SharedState>, Extension(user): Extension<User>) -> Response {
        pages::task_interface(&user, &state.settings.api_prefix).into_response()
    }
}
