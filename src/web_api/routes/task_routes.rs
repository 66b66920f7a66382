use axum::{middleware, routing::get, Router};

use crate::{app_state::SharedState, authentication::auth::api_auth_middleware, task_controller::TaskController};

pub fn get_router(app_state: SharedState) -> Router {
    let router_path = app_state.settings.api_prefix.clone();
    Router::new()
        .route(
            format!("{}/", router_path).as_str(),
            get(TaskController::list).post(TaskController::create),
        )
        .route(
            format!("{}/:id/", router_path).as_str(),
            get(TaskController::get)
                .put(TaskController::update)
                .patch(TaskController::partial_update)
                .delete(TaskController::delete),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), api_auth_middleware))
        .with_state(app_state)
}
