use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use catalog_core::validation::FieldErrors;
use serde_json::json;

/// Message sent alongside every 422 field map.
pub const INVALID_DATA_MESSAGE: &str = "The given data was invalid.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// `{"error": .., "code": ..}`, plus `"errors"` (field -> messages) on 422.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be decoded as the expected JSON shape.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// A path segment could not be parsed (e.g. a non-numeric id).
    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),

    /// No route matches the request path.
    #[error("No route for {0}")]
    UnknownRoute(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Core(CoreError::InvalidFields(errors))
    }
}

/// Resolved pieces of an error response.
struct ErrorParts {
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Option<FieldErrors>,
}

impl ErrorParts {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            errors: None,
        }
    }

    fn invalid(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "VALIDATION_ERROR",
            message: INVALID_DATA_MESSAGE.to_string(),
            errors: Some(errors),
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorParts::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidFields(errors) => ErrorParts::invalid(errors),
                CoreError::Conflict(msg) => ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", msg),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- Extractor rejections ---
            AppError::Json(rejection) => {
                tracing::debug!(error = %rejection, "Rejected JSON body");
                ErrorParts::invalid(FieldErrors::single("body", rejection.body_text()))
            }
            AppError::Path(rejection) => {
                ErrorParts::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::UnknownRoute(path) => ErrorParts::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
        };

        let mut body = json!({
            "error": parts.message,
            "code": parts.code,
        });
        if let Some(errors) = parts.errors {
            body["errors"] = json!(errors);
        }

        (parts.status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into response parts.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 422 on `category_id`, the only reference
///   a client supplies.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => {
            ErrorParts::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return ErrorParts::new(
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // PostgreSQL foreign key violation
                Some("23503") => {
                    tracing::debug!(error = %db_err, "Foreign key violation");
                    return ErrorParts::invalid(FieldErrors::single(
                        "category_id",
                        "The selected category id is invalid.",
                    ));
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            ErrorParts::internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorParts::internal()
        }
    }
}
