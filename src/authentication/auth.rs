use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};

use crate::{
    api_error::ApiError,
    app_state::SharedState,
    data_access::{data_context::DataContext, data_error::DataError},
    session::Session,
    settings::Settings,
    user::User,
};

pub const LOGIN_PATH: &str = "/login/";

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Returns the user when `username` exists and `password` matches.
pub fn authenticate(
    data_context: &DataContext,
    username: &str,
    password: &str,
) -> Result<Option<User>, DataError> {
    Ok(data_context
        .get_user_by_username(username)?
        .filter(|user| verify_password(password, &user.password_hash)))
}

/// Persists a new session for `user` and returns the cookie that carries it.
pub fn start_session(state: &SharedState, user: &User) -> Result<Cookie<'static>, DataError> {
    let session = Session::new(user.id, Duration::minutes(state.settings.session_ttl()));
    state.data_context.create_session(&session)?;
    Ok(session_cookie(&state.settings, session.token))
}

/// Drops the server-side session named by the request cookie, if any, and
/// returns a cookie that clears it in the browser.
pub fn end_session(state: &SharedState, headers: &HeaderMap) -> Result<Cookie<'static>, DataError> {
    if let Some(token) = session_token(&state.settings, headers) {
        state.data_context.delete_session(&token)?;
    }
    let mut cookie = Cookie::build((state.settings.session_cookie_name.clone(), ""))
        .path("/")
        .build();
    cookie.make_removal();
    Ok(cookie)
}

/// Resolves the user behind the request's session cookie.
/// Expired sessions are deleted and treated as absent.
pub fn session_user(state: &SharedState, headers: &HeaderMap) -> Result<Option<User>, DataError> {
    let Some(token) = session_token(&state.settings, headers) else {
        return Ok(None);
    };
    let Some(session) = state.data_context.get_session(&token)? else {
        return Ok(None);
    };
    if session.is_expired_at(Utc::now()) {
        state.data_context.delete_session(&token)?;
        return Ok(None);
    }
    state.data_context.get_user(session.user_id)
}

fn session_cookie(settings: &Settings, token: String) -> Cookie<'static> {
    Cookie::build((settings.session_cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::minutes(settings.session_ttl()))
        .build()
}

fn session_token(settings: &Settings, headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == settings.session_cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Guards the JSON API: requests without a live session are refused with 403
/// before any handler runs. The caller is exposed as `Extension<User>`.
pub async fn api_auth_middleware(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = session_user(&state, request.headers())?.ok_or(ApiError::NotAuthenticated)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Guards HTML pages: visitors without a session are sent to the login page.
pub async fn page_auth_middleware(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match session_user(&state, request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
