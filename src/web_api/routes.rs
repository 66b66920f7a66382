pub mod admin_routes;
pub mod authentication_routes;
pub mod page_routes;
pub mod task_routes;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::app_state::SharedState;

pub fn map_routes(app_state: SharedState) -> Router {
    let static_dir = ServeDir::new(&app_state.settings.static_dir);
    Router::new()
        .merge(page_routes::get_router(app_state.clone()))
        .merge(authentication_routes::get_router(app_state.clone()))
        .merge(admin_routes::get_router(app_state.clone()))
        .merge(task_routes::get_router(app_state))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
}
