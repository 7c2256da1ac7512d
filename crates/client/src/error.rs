use catalog_core::validation::FieldErrors;
use serde::Deserialize;

/// Errors returned by [`CatalogClient`](crate::CatalogClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the payload (422) with per-field messages.
    #[error("Invalid fields: {}", .0.field_names().join(", "))]
    Validation(FieldErrors),

    /// The addressed record does not exist (404).
    #[error("Not found")]
    NotFound,

    /// Any other non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport or decode failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The server's error envelope: `{"error", "code", "errors"?}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    errors: Option<FieldErrors>,
}

impl ClientError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 404 {
            return ClientError::NotFound;
        }
        match serde_json::from_str::<ErrorBody>(body).ok() {
            Some(ErrorBody {
                errors: Some(errors),
                ..
            }) if status == 422 => ClientError::Validation(errors),
            Some(ErrorBody {
                error: Some(message),
                ..
            }) => ClientError::Api { status, message },
            _ => ClientError::Api {
                status,
                message: body.to_string(),
            },
        }
    }
}
