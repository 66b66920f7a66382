use axum::{middleware, routing::get, Router};

use crate::{admin_controller::AdminController, app_state::SharedState, authentication::auth::page_auth_middleware};

pub const ROUTER_PATH: &str = "/admin";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(format!("{}/", ROUTER_PATH).as_str(), get(AdminController::index))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), page_auth_middleware))
        .with_state(app_state)
}
