//! Data models for the Ampere platform.
//!
//! These types are shared between the control server (which stores them) and
//! the clients on both sides of it: poll-only power-control units and the
//! operator application. Wire field names are camelCase to match the device
//! firmware and the operator app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Status ──────────────────────────────────────────────────────────

/// Latest telemetry snapshot self-reported by a power-control unit.
///
/// Only `current` has a fixed meaning. Everything else a device sends
/// (per-relay states, voltage, power, energy, ...) lands in `relay_data`,
/// stored and returned verbatim. The server never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Measured current draw in amperes.
    pub current: f64,
    #[serde(flatten)]
    pub relay_data: Map<String, Value>,
    /// Server-assigned ingestion time. Never supplied by the device.
    pub timestamp: DateTime<Utc>,
}

// ── Command ─────────────────────────────────────────────────────────

/// A one-shot control instruction waiting to be picked up by its device.
///
/// At most one exists per device at any instant; queueing a new one
/// replaces an undelivered predecessor, and delivery removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCommand {
    /// Action name, e.g. "ON" or "OFF".
    pub command: String,
    /// Target relay/SSR channel.
    pub relay: String,
    /// Execution time used by some firmware dialects; passed through
    /// verbatim when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<Value>,
}

// ── Configuration ───────────────────────────────────────────────────

/// A device's last-saved settings (e.g. per-relay thresholds), opaque to
/// the server.
pub type ConfigBlob = Map<String, Value>;
