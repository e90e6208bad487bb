//! House resolution endpoint.

use axum::{
    extract::{Query, State},
    http::Uri,
    response::Response,
    routing::get,
    Router,
};

use super::{format_of, request_params};
use crate::error::AppError;
use crate::markup;
use crate::AppState;

/// House routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/house", get(handle_houses))
        .route("/house.json", get(handle_houses))
        .route("/house.xml", get(handle_houses))
}

/// Resolve the houses of a realm (`realmId`, `region`, `realm`, `house`).
async fn handle_houses(
    State(state): State<AppState>,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let format = format_of(&uri)?;
    let houses = state.market.houses(&request_params(pairs)).await?;
    Ok(format.respond(houses.as_slice(), markup::houses))
}
