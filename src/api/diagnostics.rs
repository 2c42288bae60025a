use serde::{Deserialize, Serialize};

use crate::core::ChartId;
use crate::error::{SyncError, SyncResult};

pub const SYNC_DIAGNOSTICS_JSON_SCHEMA_V1: u32 = 1;

/// Counters kept by a hover controller since it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverSyncDiagnostics {
    pub hovers_received: u64,
    pub hovers_without_points: u64,
    pub unhovers_received: u64,
    pub hover_instructions: u64,
    pub clear_instructions: u64,
    pub stale_followers: u64,
    pub callback_failures: u64,
    pub programmatic_ignored: u64,
}

/// Counters kept by a relayout controller since it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayoutSyncDiagnostics {
    pub relayouts_received: u64,
    pub ranges_applied: u64,
    pub autoranges_applied: u64,
    pub skipped_already_autorange: u64,
    pub skipped_same_bounds: u64,
    pub skipped_missing_bounds: u64,
    pub stale_followers: u64,
    pub programmatic_ignored: u64,
}

/// Point-in-time view of one sync group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncGroupDiagnostics {
    pub primary: ChartId,
    pub followers: Vec<ChartId>,
    pub attached: bool,
    pub hover: HoverSyncDiagnostics,
    pub relayout: RelayoutSyncDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncGroupDiagnosticsJsonContractV1 {
    pub schema_version: u32,
    pub diagnostics: SyncGroupDiagnostics,
}

impl SyncGroupDiagnostics {
    pub fn to_json_pretty(&self) -> SyncResult<String> {
        let payload = SyncGroupDiagnosticsJsonContractV1 {
            schema_version: SYNC_DIAGNOSTICS_JSON_SCHEMA_V1,
            diagnostics: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SyncError::InvalidData(format!("failed to serialize sync diagnostics: {e}"))
        })
    }
}
