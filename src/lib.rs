//! chart-sync: hover and x-axis synchronization for chart groups.
//!
//! Charts plotted against one shared x-domain (distance along a track) are
//! bound into [`SyncGroup`]s: hovers and zoom/pan on a primary chart are
//! mirrored onto its followers, one direction per event, with a value guard
//! that keeps self-reporting charts from ping-ponging relayouts.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod surface;
pub mod telemetry;

pub use api::{DashboardSync, SyncGroup, SyncGroupConfig};
pub use error::{SyncError, SyncResult};
