use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use validator::ValidationErrors;

use pv_core::errors::SendError;
use pv_shared::types::ApiResponse;

/// Extra detail attached to delivery failures
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryFailureDetail {
    /// Whether the stored code can still be verified
    pub entry_retained: bool,
}

/// Errors returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Send(e) => e.code(),
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        ApiError::Validation(format!("Invalid request data: {}", fields.join(", ")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Send(SendError::EmptyIdentifier) => StatusCode::BAD_REQUEST,
            ApiError::Send(SendError::Storage { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Send(SendError::Delivery { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "Request rejected");
        }

        match self {
            ApiError::Send(SendError::Delivery { entry_retained, .. }) => {
                HttpResponse::build(status).json(
                    ApiResponse::error(self.code(), self.to_string()).with_data(
                        DeliveryFailureDetail {
                            entry_retained: *entry_retained,
                        },
                    ),
                )
            }
            // Storage details stay in the logs
            ApiError::Send(SendError::Storage { .. }) => HttpResponse::build(status).json(
                ApiResponse::<()>::error(self.code(), "Failed to issue one-time code"),
            ),
            _ => HttpResponse::build(status)
                .json(ApiResponse::<()>::error(self.code(), self.to_string())),
        }
    }
}
