use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub type DbId = i64;

/// Failures raised by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A field was present but its value breaks a business rule.
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ServiceError`] and the request-shape rejections produced by axum
/// extractors, and renders all of them as `{ "detail": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body was not valid JSON, or a required field was missing or mistyped.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match &self {
            AppError::Service(ServiceError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            AppError::Service(ServiceError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Service(ServiceError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Json(rejection) => classify_json_rejection(rejection),
            AppError::Path(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PATH",
                rejection.body_text(),
            ),
        };

        let body = json!({
            "detail": detail,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Anything wrong with the shape of the body is a 422, kept apart from the
/// 400 used for business-rule failures. A missing content type stays 415.
fn classify_json_rejection(rejection: &JsonRejection) -> (StatusCode, &'static str, String) {
    match rejection {
        JsonRejection::JsonDataError(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNPROCESSABLE_ENTITY",
            rejection.body_text(),
        ),
        JsonRejection::JsonSyntaxError(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "MALFORMED_JSON",
            rejection.body_text(),
        ),
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_MEDIA_TYPE",
            rejection.body_text(),
        ),
        other => (other.status(), "BAD_REQUEST", other.body_text()),
    }
}
