pub mod admin_controller;
pub mod authentication_controller;
pub mod page_controller;
pub mod task_controller;
