//! Request body extractor that reports malformed JSON through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] on request bodies.
///
/// Unknown enum variants, wrong JSON types and syntax errors come back as the
/// same `{error, code}` envelope as every other validation failure instead of
/// axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
