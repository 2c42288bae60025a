use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, RelayoutPatch};

/// What a relayout patch does to one follower axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RelayoutDecision {
    /// Leave autorange and show exactly `low..high`.
    Apply { low: f64, high: f64 },
    /// Follow a reset of the primary.
    ApplyAutorange,
    SkipAlreadyAutorange,
    SkipSameBounds,
    /// The patch carries no complete, finite range (for example it only
    /// switches autorange off). Nothing is applied.
    SkipMissingBounds,
}

impl RelayoutDecision {
    /// Evaluates the skip rules against the follower's current axis.
    ///
    /// A reset is a no-op on an autoranged follower. Otherwise bounds exactly
    /// equal to the follower's are a no-op, even when they ride along with a
    /// reset. A patch without complete bounds and without a reset is a no-op.
    /// Anything else is applied.
    #[must_use]
    pub fn evaluate(patch: RelayoutPatch, current: AxisRange) -> Self {
        if patch.requests_autorange() {
            if current.autorange {
                return Self::SkipAlreadyAutorange;
            }
            // A reset that also reports the follower's exact bounds changes nothing.
            if let Some((low, high)) = patch.bounds() {
                if current.has_bounds(low, high) {
                    return Self::SkipSameBounds;
                }
            }
            return Self::ApplyAutorange;
        }
        let Some((low, high)) = patch.bounds() else {
            return Self::SkipMissingBounds;
        };
        if current.has_bounds(low, high) {
            return Self::SkipSameBounds;
        }
        Self::Apply { low, high }
    }

    #[must_use]
    pub fn is_skip(self) -> bool {
        !matches!(self, Self::Apply { .. } | Self::ApplyAutorange)
    }
}
