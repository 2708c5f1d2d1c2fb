//! REST route tree.

pub mod auth;
pub mod auth_extractor;
pub mod command;
pub mod config;
pub mod status;

use axum::Router;
use axum::routing::get;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::state::AppState;

use self::auth::ApiError;

/// Build the full route tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(auth::router())
        .merge(status::router())
        .merge(command::router())
        .merge(config::router())
}

/// Liveness banner; the operator app probes it to check reachability.
async fn root() -> &'static str {
    "Ampere power-control server is running"
}

/// Decode a JSON body into a concrete request type, surfacing malformed or
/// incomplete input as a 400 with a diagnostic instead of axum's default
/// 422 rejection.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::bad_request(format!("invalid payload: {e}")))
}
