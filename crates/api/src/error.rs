use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::repositories::RepositoryError;
use domain::services::PairingError;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {} invalid field(s)", .0.len())]
    InvalidFields(Vec<ValidationDetail>),

    /// The identity provider refused the request.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg, None)
            }
            ApiError::InvalidFields(details) => {
                let message = match details.as_slice() {
                    [only] => only.message.clone(),
                    _ => format!("{} validation errors", details.len()),
                };
                (StatusCode::BAD_REQUEST, "validation_error", message, Some(details))
            }
            ApiError::AuthFailed(msg) => (StatusCode::BAD_REQUEST, "auth_failed", msg, None),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests. Please try again later.".into(),
                None,
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                None,
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(path) => ApiError::NotFound(format!("Document not found: {}", path)),
            RepositoryError::Conflict(path) => {
                ApiError::Conflict(format!("Document already exists: {}", path))
            }
            RepositoryError::Serialization(e) => ApiError::Internal(format!("Serialization error: {}", e)),
            RepositoryError::Backend(msg) => ApiError::Internal(format!("Storage error: {}", msg)),
        }
    }
}

impl From<PairingError> for ApiError {
    fn from(err: PairingError) -> Self {
        match err {
            PairingError::PetNotFound(_) | PairingError::NotOwner(_) => {
                ApiError::NotFound("Pet not found".into())
            }
            PairingError::Repository(e) => e.into(),
        }
    }
}

/// Flattens nested struct and list errors into dotted field paths.
fn collect_details(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationDetail>) {
    for (field, kind) in errors.errors() {
        let path = match (prefix, *field) {
            ("", "__all__") => "request".to_string(),
            (_, "__all__") => prefix.to_string(),
            ("", name) => name.to_string(),
            (_, name) => format!("{}.{}", prefix, name),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| ValidationDetail {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_details(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_details(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_details("", &errors, &mut details);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::InvalidFields(details)
    }
}
