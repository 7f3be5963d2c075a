//! HTTP error type with status code mapping.

use crate::app::ServiceError;
use crate::domain::search::SearchError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected search, filter, or polygon input
    #[error("{0}")]
    BadRequest(#[from] SearchError),

    /// Path id is not an integer
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("not found")]
    NotFound,

    /// Storage failure; details are logged, not returned
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Search(e) => ApiError::BadRequest(e),
            other => {
                error!(error = %other, "request failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            success: false,
            data: None,
            error: Some(self.to_string()),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_are_client_errors() {
        let err: ApiError = ServiceError::Search(SearchError::EmptySearch).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Search condition not found");
    }

    #[test]
    fn storage_errors_are_hidden() {
        let err: ApiError = ServiceError::Storage(sqlx::Error::RowNotFound).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal server error");
    }
}
