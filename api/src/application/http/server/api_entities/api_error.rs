use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use diasense_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{message}")]
    Validation {
        message: String,
        raw_response: String,
    },
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub detail: String,
    /// Upstream text that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Unauthorized(message) => ApiError::Unauthorized(message),
            CoreError::InvalidInput(message) => ApiError::BadRequest(message),
            e @ CoreError::FileTooLarge { .. } => ApiError::BadRequest(e.to_string()),
            CoreError::Validation {
                message,
                raw_response,
            } => ApiError::Validation {
                message: format!("Validation error: {}", message),
                raw_response,
            },
            e @ (CoreError::ExternalServiceError(_) | CoreError::NotConfigured(_)) => {
                ApiError::InternalServerError(e.to_string())
            }
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError(_) | ApiError::Validation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        }

        let body = match self {
            ApiError::Validation {
                message,
                raw_response,
            } => ApiErrorResponse {
                detail: message,
                raw_response: Some(raw_response),
            },
            other => ApiErrorResponse {
                detail: other.to_string(),
                raw_response: None,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
