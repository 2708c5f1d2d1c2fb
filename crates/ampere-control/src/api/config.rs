//! Device configuration endpoints.
//!
//! GET  /config — device fetches its saved settings (no auth)
//! POST /config — operator saves settings for a device

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::auth::ApiError;
use crate::api::auth_extractor::AuthOperator;
use crate::api::command::DeviceQuery;
use crate::api::parse_body;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(get_config).post(save_config))
}

// ── Get Config ──────────────────────────────────────────────────────

async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<Value>, ApiError> {
    let device_id = query
        .device_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("deviceId required"))?;

    // A fresh unit with nothing saved yet gets an empty object, not an
    // error.
    match state.configs().get(&device_id) {
        Some(config) => {
            tracing::debug!(device_id = %device_id, "config served");
            Ok(Json(Value::Object(config)))
        }
        None => {
            tracing::debug!(device_id = %device_id, "no config saved");
            Ok(Json(serde_json::json!({})))
        }
    }
}

// ── Save Config ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigRequest {
    pub device_id: String,
    /// Must be a JSON object; the contents are opaque to the server.
    pub config: Map<String, Value>,
}

async fn save_config(
    State(state): State<AppState>,
    operator: AuthOperator,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: SaveConfigRequest = parse_body(body)?;
    if req.device_id.is_empty() {
        return Err(ApiError::bad_request("deviceId required"));
    }

    state.configs().save(&req.device_id, req.config);

    tracing::info!(device_id = %req.device_id, operator = %operator.username, "config saved");

    Ok(Json(serde_json::json!({ "result": "saved" })))
}
