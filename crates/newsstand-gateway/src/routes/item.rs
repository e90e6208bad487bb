//! Item definition endpoints.

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Response,
    routing::get,
    Router,
};

use super::format_of;
use crate::error::AppError;
use crate::format::Format;
use crate::markup;
use crate::AppState;

/// Item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(handle_items))
        .route("/items.json", get(handle_items))
        .route("/items.xml", get(handle_items))
        .route("/item/:id", get(handle_item))
}

/// All auctionable item definitions.
async fn handle_items(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let format = format_of(&uri)?;
    let items = state.market.auctionable_items().await?;
    Ok(format.respond(items.as_slice(), markup::items))
}

/// One item definition.
async fn handle_item(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, AppError> {
    let (id, format) = Format::split(&segment)?;
    let items = state.market.item(id).await?;
    Ok(format.respond(items.as_slice(), markup::items))
}
