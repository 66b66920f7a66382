// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod task_list_query;
pub mod admin_task_query;
pub mod login_request;
pub mod signup_request;

// Responses
pub mod task_response;
pub mod error_response;
