//! HTTP route handlers.

pub mod health;
pub mod house;
pub mod item;
pub mod price;

use axum::http::Uri;
use newsstand_core::RequestParams;

use crate::error::AppError;
use crate::format::Format;

/// Response format from the suffix of the last path segment.
pub(crate) fn format_of(uri: &Uri) -> Result<Format, AppError> {
    let last = uri.path().rsplit('/').next().unwrap_or_default();
    Format::split(last).map(|(_, format)| format)
}

/// Query-string pairs as request parameters, in query-string order.
pub(crate) fn request_params(pairs: Vec<(String, String)>) -> RequestParams {
    pairs.into_iter().collect()
}
