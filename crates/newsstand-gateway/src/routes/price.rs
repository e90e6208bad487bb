//! Price summary endpoint.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};

use super::request_params;
use crate::error::AppError;
use crate::format::Format;
use crate::markup;
use crate::AppState;

/// Price routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/price/:id", get(handle_price))
}

/// Price summaries of one item across the houses selected by the query string.
async fn handle_price(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let (item, format) = Format::split(&segment)?;
    let rows = state
        .market
        .price_summary(item, &request_params(pairs))
        .await?;

    Ok(format.respond(rows.as_slice(), |rows| markup::price_summary(item, rows)))
}
