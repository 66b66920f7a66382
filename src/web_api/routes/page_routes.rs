use axum::{middleware, routing::get, Router};

use crate::{app_state::SharedState, authentication::auth::page_auth_middleware, page_controller::PageController};

pub fn get_router(app_state: SharedState) -> Router {
    let public = Router::new().route("/", get(PageController::home));
    let protected = Router::new()
        .route("/tasks/", get(PageController::task_interface))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), page_auth_middleware));

    public.merge(protected).with_state(app_state)
}
