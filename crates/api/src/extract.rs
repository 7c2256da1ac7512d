//! Extractors whose rejections go through [`AppError`].
//!
//! Plain `axum::Json` / `axum::extract::Path` reply with text bodies on
//! failure; these wrappers keep every error response in the JSON envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json<T>` whose decode failures become 422 `VALIDATION_ERROR` responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` whose parse failures become 400 `BAD_REQUEST` responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
