use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use cookie::Cookie;

use crate::{
    api_error::ApiError,
    app_state::SharedState,
    authentication::{
        auth::{self, LOGIN_PATH},
        signup_form::{self, SignupError},
    },
    field_errors::FieldErrors,
    login_request::LoginRequest,
    pages,
    signup_request::SignupRequest,
};

const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn login_form() -> Response {
        pages::login(None, "").into_response()
    }

    /// Superusers land on the admin listing, everyone else on the task page.
    pub async fn login(State(state): State<SharedState>, Form(payload): Form<LoginRequest>) -> Response {
        let user = match auth::authenticate(&state.data_context, payload.username.trim(), &payload.password) {
            Ok(Some(user)) => user,
            Ok(None) => return pages::login(Some(INVALID_LOGIN), &payload.username).into_response(),
            Err(e) => return ApiError::from(e).into_response(),
        };

        let cookie = match auth::start_session(&state, &user) {
            Ok(cookie) => cookie,
            Err(e) => return ApiError::from(e).into_response(),
        };

        let destination = user.landing_page();
        if user.is_superuser {
            tracing::info!(actor = %user.username, destination, "superuser logged in");
        } else {
            tracing::info!(actor = %user.username, destination, "user logged in");
        }
        redirect_with_cookie(destination, cookie)
    }

    pub async fn signup_form() -> Response {
        pages::signup(&FieldErrors::new(), "").into_response()
    }

    pub async fn signup(State(state): State<SharedState>, Form(payload): Form<SignupRequest>) -> Response {
        let user = match signup_form::register(&state.data_context, &payload) {
            Ok(user) => user,
            Err(SignupError::Invalid(errors)) => {
                return (StatusCode::BAD_REQUEST, pages::signup(&errors, &payload.username)).into_response();
            }
            Err(SignupError::Data(e)) => return ApiError::from(e).into_response(),
        };

        let cookie = match auth::start_session(&state, &user) {
            Ok(cookie) => cookie,
            Err(e) => return ApiError::from(e).into_response(),
        };

        tracing::info!(actor = %user.username, user_id = %user.id, "user signed up");
        redirect_with_cookie("/tasks/", cookie)
    }

    pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
        match auth::end_session(&state, &headers) {
            Ok(cookie) => redirect_with_cookie(LOGIN_PATH, cookie),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}

fn redirect_with_cookie(location: &str, cookie: Cookie<'static>) -> Response {
    ([(header::SET_COOKIE, cookie.to_string())], Redirect::to(location)).into_response()
}
