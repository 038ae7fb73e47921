// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use holdyard_core::HoldError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic message surfaced for unexpected failures
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Plain confirmation message, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handler error: a hold-domain error rendered as status + ErrorResponse
#[derive(Debug)]
pub struct ApiError(pub HoldError);

impl From<HoldError> for ApiError {
    fn from(err: HoldError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HoldError::InvalidInput(_)
            | HoldError::DuplicateActiveHold(_)
            | HoldError::NoActiveHold(_) => StatusCode::BAD_REQUEST,
            HoldError::NotFound(_) => StatusCode::NOT_FOUND,
            HoldError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_client_error() {
            tracing::debug!(error = %self.0, ?status, "Request rejected");
            self.0.to_string()
        } else {
            tracing::error!("Request failed: {:#}", self.0);
            SERVER_ERROR_MESSAGE.to_string()
        };
        ErrorResponse::new(message).into_response(status).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (HoldError::invalid_input("Hold type is required"), StatusCode::BAD_REQUEST),
            (HoldError::DuplicateActiveHold("A".into()), StatusCode::BAD_REQUEST),
            (HoldError::NoActiveHold("A".into()), StatusCode::BAD_REQUEST),
            (HoldError::not_found("x"), StatusCode::NOT_FOUND),
            (HoldError::Internal(anyhow!("db down")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Invalid token.")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Invalid token."}));
    }
}
