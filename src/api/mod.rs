mod behavior;
mod dashboard_sync;
mod diagnostics;
mod hover_sync_controller;
mod relayout_decision;
mod relayout_sync_controller;
mod subscription;
mod sync_group;
mod sync_group_config;
mod validation;

pub use behavior::{HoverSyncBehavior, RelayoutSyncBehavior};
pub use dashboard_sync::DashboardSync;
pub use diagnostics::{
    HoverSyncDiagnostics, RelayoutSyncDiagnostics, SYNC_DIAGNOSTICS_JSON_SCHEMA_V1,
    SyncGroupDiagnostics, SyncGroupDiagnosticsJsonContractV1,
};
pub use hover_sync_controller::{HoverPropagation, HoverSyncController};
pub use relayout_decision::RelayoutDecision;
pub use relayout_sync_controller::{RelayoutPropagation, RelayoutSyncController};
pub use subscription::{Attached, Subscription};
pub use sync_group::SyncGroup;
pub use sync_group_config::{DashboardSyncConfig, SyncGroupConfig};
