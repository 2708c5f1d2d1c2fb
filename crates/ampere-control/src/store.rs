//! The in-memory device stores: status registry, command mediator, and
//! configuration store.
//!
//! These three maps are the only shared mutable state in the process, and
//! all of it is intentionally volatile: it lives for the process lifetime
//! and is rebuilt from device reports after a restart. Entries for different
//! devices are fully independent; operations on the same device are
//! serialized by `DashMap`'s sharded per-key locking, so no store operation
//! blocks on unrelated traffic.

use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};

use ampere_common::models::{ConfigBlob, PendingCommand, StatusRecord};

// ── Status Registry ─────────────────────────────────────────────────

/// Latest reported status per device.
#[derive(Default)]
pub struct StatusRegistry {
    records: DashMap<String, StatusRecord>,
}

impl StatusRegistry {
    /// Store a fresh report, stamping it with the ingestion time. Any prior
    /// record for the device is replaced wholesale, never merged.
    pub fn report(
        &self,
        device_id: &str,
        current: f64,
        relay_data: Map<String, Value>,
    ) -> StatusRecord {
        let record = StatusRecord {
            current,
            relay_data,
            timestamp: Utc::now(),
        };
        self.records.insert(device_id.to_string(), record.clone());
        record
    }

    /// Point-in-time snapshot of a device's last report, however old.
    /// Staleness interpretation is left to the caller.
    pub fn get(&self, device_id: &str) -> Option<StatusRecord> {
        self.records.get(device_id).map(|r| r.value().clone())
    }
}

// ── Command Mediator ────────────────────────────────────────────────

/// Single-slot pending command per device.
///
/// Absence of an entry is the `Empty` state; a stored entry is `Pending`.
/// The machine cycles `Empty ⇄ Pending` for the life of the process.
#[derive(Default)]
pub struct CommandMediator {
    pending: DashMap<String, PendingCommand>,
}

impl CommandMediator {
    /// Queue a command for the device's next poll. A command already waiting
    /// is replaced and returned; it was never delivered and never will be.
    pub fn enqueue(&self, device_id: &str, cmd: PendingCommand) -> Option<PendingCommand> {
        self.pending.insert(device_id.to_string(), cmd)
    }

    /// Atomically remove and return the pending command, if any.
    ///
    /// This is a single map removal rather than a get followed by a delete,
    /// so two concurrent polls for the same device cannot both receive the
    /// command. `None` is the steady state for a device with nothing to do.
    pub fn take(&self, device_id: &str) -> Option<PendingCommand> {
        self.pending.remove(device_id).map(|(_, cmd)| cmd)
    }
}

// ── Config Store ────────────────────────────────────────────────────

/// Last-saved configuration per device. No expiry; a blob survives until
/// the next save or process restart.
#[derive(Default)]
pub struct ConfigStore {
    blobs: DashMap<String, ConfigBlob>,
}

impl ConfigStore {
    /// Overwrite the stored blob for the device.
    pub fn save(&self, device_id: &str, config: ConfigBlob) {
        self.blobs.insert(device_id.to_string(), config);
    }

    /// The stored blob, or `None` for a device that has never saved one,
    /// which is a normal condition for a freshly booted unit.
    pub fn get(&self, device_id: &str) -> Option<ConfigBlob> {
        self.blobs.get(device_id).map(|c| c.value().clone())
    }
}
