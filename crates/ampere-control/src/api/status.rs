//! Telemetry endpoints.
//!
//! POST /status            — device reports its latest readings (no auth)
//! GET  /status/{deviceId} — operator reads a device's last report

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};

use ampere_common::models::StatusRecord;

use crate::api::auth::ApiError;
use crate::api::auth_extractor::AuthOperator;
use crate::api::parse_body;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", post(report_status))
        .route("/status/{device_id}", get(get_status))
}

// ── Report Status ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusRequest {
    pub device_id: String,
    /// Measured current draw in amperes. Anything but a JSON number is
    /// rejected.
    pub current: f64,
    /// Remaining fields are open telemetry, stored verbatim.
    #[serde(flatten)]
    pub relay_data: Map<String, Value>,
}

async fn report_status(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: ReportStatusRequest = parse_body(body)?;
    if req.device_id.is_empty() {
        return Err(ApiError::bad_request("deviceId required"));
    }

    let record = state
        .status()
        .report(&req.device_id, req.current, req.relay_data);

    tracing::info!(
        device_id = %req.device_id,
        current = record.current,
        "status report ingested"
    );

    Ok(Json(serde_json::json!({ "result": "ok" })))
}

// ── Get Status ──────────────────────────────────────────────────────

async fn get_status(
    State(state): State<AppState>,
    operator: AuthOperator,
    Path(device_id): Path<String>,
) -> Result<Json<StatusRecord>, ApiError> {
    let record = state
        .status()
        .get(&device_id)
        .ok_or_else(|| ApiError::not_found("device not found"))?;

    tracing::debug!(device_id = %device_id, operator = %operator.username, "status read");

    Ok(Json(record))
}
