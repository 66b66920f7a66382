pub mod app_state;
pub mod field_errors;
pub mod session;
pub mod settings;
pub mod task;
pub mod user;
