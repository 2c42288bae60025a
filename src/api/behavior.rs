use serde::{Deserialize, Serialize};

use crate::interaction::NotificationOrigin;

/// Hover propagation policy of a sync group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HoverSyncBehavior {
    /// Clears follower highlights when the pointer leaves the primary.
    /// Off by default: followers keep their last highlighted point.
    #[serde(default)]
    pub clear_on_unhover: bool,
    /// Drops hover notifications tagged as programmatic.
    #[serde(default)]
    pub ignore_programmatic: bool,
}

/// X-axis propagation policy of a sync group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RelayoutSyncBehavior {
    /// Drops relayout notifications tagged as programmatic before the value
    /// guard runs. Only useful when the chart echoes its origin back.
    #[serde(default)]
    pub ignore_programmatic: bool,
}

pub(crate) fn accepts_origin(ignore_programmatic: bool, origin: NotificationOrigin) -> bool {
    !(ignore_programmatic && origin == NotificationOrigin::Programmatic)
}
