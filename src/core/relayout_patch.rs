use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SyncError, SyncResult};

const RANGE_KEY: &str = "xaxis.range";
const RANGE_LOW_KEY: &str = "xaxis.range[0]";
const RANGE_HIGH_KEY: &str = "xaxis.range[1]";
const AUTORANGE_KEY: &str = "xaxis.autorange";

/// Sparse x-axis change reported by a chart after zoom, pan or reset.
///
/// Only the fields that changed are present. A patch is never a full axis
/// snapshot: missing bounds mean "not reported", not "unchanged at zero".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<bool>,
}

impl RelayoutPatch {
    /// Patch emitted by a zoom or pan: explicit bounds, autorange untouched.
    #[must_use]
    pub fn range(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
            autorange: None,
        }
    }

    /// Patch emitted by an axis reset.
    #[must_use]
    pub fn autorange() -> Self {
        Self {
            low: None,
            high: None,
            autorange: Some(true),
        }
    }

    #[must_use]
    pub fn with_autorange(mut self, autorange: bool) -> Self {
        self.autorange = Some(autorange);
        self
    }

    #[must_use]
    pub fn requests_autorange(self) -> bool {
        self.autorange == Some(true)
    }

    /// Returns both bounds when the patch carries a complete, finite range.
    #[must_use]
    pub fn bounds(self) -> Option<(f64, f64)> {
        match (self.low, self.high) {
            (Some(low), Some(high)) if low.is_finite() && high.is_finite() => Some((low, high)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.low.is_none() && self.high.is_none() && self.autorange.is_none()
    }

    /// Decodes a Plotly-style relayout payload (`{"xaxis.range[0]": 10, ...}`).
    pub fn from_plotly_json(input: &str) -> SyncResult<Self> {
        let fields: Map<String, Value> = serde_json::from_str(input).map_err(|e| {
            SyncError::InvalidData(format!("failed to parse relayout payload: {e}"))
        })?;
        Self::from_plotly_fields(&fields)
    }

    /// Extracts x-axis fields from a Plotly-style relayout field map.
    ///
    /// `xaxis.range` (two-element array) and the indexed `xaxis.range[i]` keys
    /// are both accepted; indexed keys win when both are present. Keys for
    /// other axes are ignored.
    pub fn from_plotly_fields(fields: &Map<String, Value>) -> SyncResult<Self> {
        let mut patch = Self::default();

        if let Some(value) = fields.get(RANGE_KEY) {
            let bounds = value
                .as_array()
                .filter(|bounds| bounds.len() == 2)
                .ok_or_else(|| {
                    SyncError::InvalidData(format!("`{RANGE_KEY}` must be a two-element array"))
                })?;
            patch.low = Some(number_field(RANGE_KEY, &bounds[0])?);
            patch.high = Some(number_field(RANGE_KEY, &bounds[1])?);
        }
        if let Some(value) = fields.get(RANGE_LOW_KEY) {
            patch.low = Some(number_field(RANGE_LOW_KEY, value)?);
        }
        if let Some(value) = fields.get(RANGE_HIGH_KEY) {
            patch.high = Some(number_field(RANGE_HIGH_KEY, value)?);
        }
        if let Some(value) = fields.get(AUTORANGE_KEY) {
            let autorange = value.as_bool().ok_or_else(|| {
                SyncError::InvalidData(format!("`{AUTORANGE_KEY}` must be a boolean"))
            })?;
            patch.autorange = Some(autorange);
        }

        Ok(patch)
    }
}

fn number_field(key: &str, value: &Value) -> SyncResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| SyncError::InvalidData(format!("`{key}` must be a number, got {value}")))
}
