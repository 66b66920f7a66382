use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::SharedState, authentication_controller::AuthenticationController};

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route("/signup/", get(AuthenticationController::signup_form).post(AuthenticationController::signup))
        .route("/login/", get(AuthenticationController::login_form).post(AuthenticationController::login))
        .route("/admin/login/", get(AuthenticationController::login_form).post(AuthenticationController::login))
        .route("/logout/", post(AuthenticationController::logout))
        .with_state(app_state)
}
