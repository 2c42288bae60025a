use serde::{Deserialize, Serialize};

/// Visible extent of a chart's x-axis.
///
/// With `autorange = true` the chart computes its own bounds and `low`/`high`
/// only mirror the last computed extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
    pub autorange: bool,
}

impl AxisRange {
    /// Creates an explicit range (autorange off).
    #[must_use]
    pub fn fixed(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            autorange: false,
        }
    }

    /// Creates an autoranged axis whose last computed extent is `low..high`.
    #[must_use]
    pub fn auto(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            autorange: true,
        }
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Exact comparison; no tolerance is applied.
    #[must_use]
    pub fn has_bounds(self, low: f64, high: f64) -> bool {
        self.low == low && self.high == high
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::auto(0.0, 1.0)
    }
}
