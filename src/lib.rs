//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod api_error;
    pub mod pages;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
pub use web_api::{api_error, pages};
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
    pub mod signup_form;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod data_error;
    pub mod owned_tasks;
    pub mod task_filter;
}
//---------------------------------------
