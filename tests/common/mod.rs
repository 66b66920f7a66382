#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tasklist_server::{
    app_state::{AppState, SharedState},
    authentication::auth::{hash_password, start_session},
    data_access::data_context::DataContext,
    map_routes,
    settings::Settings,
    user::User,
};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: SharedState,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.redb");
        let path = path.to_str().unwrap();
        let state = AppState::new(DataContext::new(path).unwrap(), Settings::for_database(path));
        let router = map_routes(state.clone());
        TestApp {
            router,
            state,
            _dir: dir,
        }
    }

    /// Stores a user without a usable password; sign in through `cookie_for`.
    pub fn user(&self, username: &str) -> User {
        let user = User::new_staff(username, String::new());
        self.state.data_context.create_user(&user).unwrap();
        user
    }

    pub fn user_with_password(&self, username: &str, password: &str, superuser: bool) -> User {
        let hash = hash_password(password).unwrap();
        let user = if superuser {
            User::new_superuser(username, hash)
        } else {
            User::new_staff(username, hash)
        };
        self.state.data_context.create_user(&user).unwrap();
        user
    }

    /// `Cookie` header value for a fresh session of `user`.
    pub fn cookie_for(&self, user: &User) -> String {
        let cookie = start_session(&self.state, user).unwrap();
        format!("{}={}", cookie.name(), cookie.value())
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.json_text(method, uri, cookie, body.map(|body| body.to_string()))
            .await
    }

    /// Like `json`, but sends `body` verbatim so it need not be valid JSON.
    pub async fn json_text(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Formatted log output collected while a `capture_logs` guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Captured lines containing `needle`.
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes INFO and above on the current thread into the returned buffer
/// until the guard is dropped.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
