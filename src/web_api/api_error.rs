use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{data_access::data_error::DataError, error_response::ErrorResponse, field_errors::FieldErrors};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// Also used for rows owned by someone else.
    #[error("Not found.")]
    NotFound,

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("storage failure: {0}")]
    Data(#[from] DataError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            Self::Data(e) => {
                tracing::error!(error = %e, "request failed on storage");
                (status, Json(ErrorResponse::new("A server error occurred."))).into_response()
            }
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}
