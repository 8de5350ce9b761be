use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;

/// Wire-level error surface: a stable machine-readable code plus a
/// human-readable message, and nothing else.
#[derive(Debug)]
pub struct WireError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl WireError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationException", message)
    }

    pub fn unknown_operation(operation: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "UnknownOperationException",
            format!("unknown operation {operation}"),
        )
    }

    pub fn unknown_service(service: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "UnknownOperationException",
            format!("unknown service {service}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalFailure", message)
    }
}

impl From<ServiceError> for WireError {
    fn from(err: ServiceError) -> Self {
        let (status, code) = match &err {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "ResourceNotFoundException"),
            ServiceError::AlreadyExists(_) => (StatusCode::CONFLICT, "ConflictException"),
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                (StatusCode::BAD_REQUEST, "ValidationException")
            }
            ServiceError::InvalidToken(_) => {
                (StatusCode::BAD_REQUEST, "InvalidNextTokenException")
            }
        };
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for WireError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"code": self.code, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}
