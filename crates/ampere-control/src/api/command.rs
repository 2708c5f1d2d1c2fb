//! Command queue endpoints.
//!
//! POST /command — operator queues a command for a device
//! GET  /command — device polls for (and consumes) its pending command

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use ampere_common::models::PendingCommand;

use crate::api::auth::ApiError;
use crate::api::auth_extractor::AuthOperator;
use crate::api::parse_body;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/command", get(poll_command).post(queue_command))
}

// ── Queue Command ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueCommandRequest {
    pub device_id: String,
    pub command: String,
    pub relay: String,
    #[serde(default)]
    pub schedule_time: Option<Value>,
}

async fn queue_command(
    State(state): State<AppState>,
    operator: AuthOperator,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: QueueCommandRequest = parse_body(body)?;
    if req.device_id.is_empty() || req.command.is_empty() || req.relay.is_empty() {
        return Err(ApiError::bad_request("deviceId, command and relay are required"));
    }

    let replaced = state.commands().enqueue(
        &req.device_id,
        PendingCommand {
            command: req.command.clone(),
            relay: req.relay.clone(),
            schedule_time: req.schedule_time,
        },
    );
    if let Some(prev) = replaced {
        tracing::debug!(
            device_id = %req.device_id,
            discarded = %prev.command,
            "undelivered command replaced"
        );
    }

    tracing::info!(
        device_id = %req.device_id,
        relay = %req.relay,
        command = %req.command,
        operator = %operator.username,
        "command queued"
    );

    Ok(Json(serde_json::json!({ "result": "queued" })))
}

// ── Poll Command ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuery {
    pub device_id: Option<String>,
}

async fn poll_command(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<Value>, ApiError> {
    let device_id = query
        .device_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("deviceId required"))?;

    match state.commands().take(&device_id) {
        Some(cmd) => {
            tracing::info!(
                device_id = %device_id,
                relay = %cmd.relay,
                command = %cmd.command,
                "command delivered"
            );
            let payload =
                serde_json::to_value(&cmd).map_err(|e| ApiError::internal(e.to_string()))?;
            Ok(Json(payload))
        }
        None => {
            tracing::debug!(device_id = %device_id, "nothing pending");
            Ok(Json(serde_json::json!({})))
        }
    }
}
