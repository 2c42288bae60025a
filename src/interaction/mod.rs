use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HoverPoint, RelayoutPatch};
use crate::error::{SyncError, SyncResult};

/// Notification families a chart can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Hover,
    Unhover,
    Relayout,
}

/// Who caused a notification.
///
/// Charts that re-report programmatic updates as events can tag them
/// `Programmatic` so controllers filter by origin instead of by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationOrigin {
    #[default]
    User,
    Programmatic,
}

/// Pointer hover reported by a chart.
///
/// Several co-located points may be reported; only the first one drives
/// synchronization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverEvent {
    pub points: SmallVec<[HoverPoint; 4]>,
}

impl HoverEvent {
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = HoverPoint>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn single(x_value: f64, point_index: usize) -> Self {
        Self::new([HoverPoint::new(x_value, point_index)])
    }

    #[must_use]
    pub fn primary_point(&self) -> Option<HoverPoint> {
        self.points.first().copied()
    }

    /// Decodes a Plotly-style hover payload.
    ///
    /// The x-value under the pointer (`xvals[0]`) takes precedence over each
    /// point's own `x`. Only the first point must carry an x-value; later
    /// points without one are dropped.
    pub fn from_plotly_json(input: &str) -> SyncResult<Self> {
        let payload: PlotlyHoverPayload = serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidData(format!("failed to parse hover payload: {e}")))?;
        let pointer_x = payload.xvals.first().copied();

        let mut points = SmallVec::with_capacity(payload.points.len());
        for (position, point) in payload.points.into_iter().enumerate() {
            match pointer_x.or(point.x) {
                Some(x_value) => points.push(HoverPoint::new(x_value, point.point_index)),
                None if position == 0 => {
                    return Err(SyncError::InvalidData(format!(
                        "hover point {} carries no x-value",
                        point.point_index
                    )));
                }
                None => {}
            }
        }
        Ok(Self { points })
    }
}

#[derive(Debug, Deserialize)]
struct PlotlyHoverPayload {
    #[serde(default)]
    points: Vec<PlotlyHoverPoint>,
    #[serde(default)]
    xvals: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct PlotlyHoverPoint {
    #[serde(default)]
    x: Option<f64>,
    #[serde(rename = "pointIndex")]
    point_index: usize,
}

/// Event payload carried by a [`ChartNotification`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Hover(HoverEvent),
    Unhover,
    Relayout(RelayoutPatch),
}

/// One notification emitted by a chart's event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartNotification {
    #[serde(default)]
    pub origin: NotificationOrigin,
    pub event: ChartEvent,
}

impl ChartNotification {
    #[must_use]
    pub fn user(event: ChartEvent) -> Self {
        Self {
            origin: NotificationOrigin::User,
            event,
        }
    }

    #[must_use]
    pub fn programmatic(event: ChartEvent) -> Self {
        Self {
            origin: NotificationOrigin::Programmatic,
            event,
        }
    }

    #[must_use]
    pub fn hover(x_value: f64, point_index: usize) -> Self {
        Self::user(ChartEvent::Hover(HoverEvent::single(x_value, point_index)))
    }

    #[must_use]
    pub fn unhover() -> Self {
        Self::user(ChartEvent::Unhover)
    }

    #[must_use]
    pub fn relayout(patch: RelayoutPatch) -> Self {
        Self::user(ChartEvent::Relayout(patch))
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self.event {
            ChartEvent::Hover(_) => NotificationKind::Hover,
            ChartEvent::Unhover => NotificationKind::Unhover,
            ChartEvent::Relayout(_) => NotificationKind::Relayout,
        }
    }
}
