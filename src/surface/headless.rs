use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, ChartId, RelayoutPatch, SeriesId};
use crate::error::{SyncError, SyncResult};
use crate::interaction::{ChartEvent, ChartNotification, HoverEvent, NotificationOrigin};

use super::{ChartSurface, NotificationQueue};

/// Programmatic instruction received by a [`HeadlessChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceInstruction {
    ShowHover { x_value: f64, series: Vec<SeriesId> },
    ClearHover,
    SetRange { low: f64, high: f64 },
    SetAutorange,
}

/// Hover highlight currently drawn on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverHighlight {
    pub x_value: f64,
    pub series: Vec<SeriesId>,
}

/// In-memory chart used by tests, benches and headless hosts.
///
/// It keeps axis and hover state, logs every programmatic instruction, and
/// can optionally re-report programmatic relayouts as notifications, which is
/// how a charting library without silent updates behaves.
#[derive(Debug)]
pub struct HeadlessChart {
    id: ChartId,
    series: Vec<SeriesId>,
    x_axis: AxisRange,
    hover: Option<HoverHighlight>,
    live: bool,
    notifier: Option<NotificationQueue>,
    relayout_echo: Option<NotificationOrigin>,
    instructions: Vec<SurfaceInstruction>,
}

impl HeadlessChart {
    #[must_use]
    pub fn new(id: impl Into<ChartId>, series: impl IntoIterator<Item = SeriesId>) -> Self {
        Self {
            id: id.into(),
            series: series.into_iter().collect(),
            x_axis: AxisRange::default(),
            hover: None,
            live: true,
            notifier: None,
            relayout_echo: None,
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: AxisRange) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Routes this chart's notifications into `queue`.
    #[must_use]
    pub fn with_notifier(mut self, queue: NotificationQueue) -> Self {
        self.notifier = Some(queue);
        self
    }

    /// Re-reports programmatic relayouts as notifications tagged `origin`.
    #[must_use]
    pub fn with_relayout_echo(mut self, origin: NotificationOrigin) -> Self {
        self.relayout_echo = Some(origin);
        self
    }

    #[must_use]
    pub fn id(&self) -> &ChartId {
        &self.id
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverHighlight> {
        self.hover.as_ref()
    }

    #[must_use]
    pub fn instructions(&self) -> &[SurfaceInstruction] {
        &self.instructions
    }

    /// Number of axis instructions (range or autorange) received so far.
    #[must_use]
    pub fn relayout_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| {
                matches!(
                    instruction,
                    SurfaceInstruction::SetRange { .. } | SurfaceInstruction::SetAutorange
                )
            })
            .count()
    }

    pub fn clear_instructions(&mut self) {
        self.instructions.clear();
    }

    pub fn set_series(&mut self, series: impl IntoIterator<Item = SeriesId>) {
        self.series = series.into_iter().collect();
    }

    /// Marks the widget as removed from the page.
    pub fn remove(&mut self) {
        self.live = false;
        self.hover = None;
    }

    /// Simulates the pointer hovering `x_value` over sample `point_index`.
    pub fn user_hover(&mut self, x_value: f64, point_index: usize) {
        self.hover = Some(HoverHighlight {
            x_value,
            series: self.series.clone(),
        });
        self.notify(ChartNotification::user(ChartEvent::Hover(
            HoverEvent::single(x_value, point_index),
        )));
    }

    pub fn user_unhover(&mut self) {
        self.hover = None;
        self.notify(ChartNotification::user(ChartEvent::Unhover));
    }

    /// Simulates a user zoom, pan or reset on this chart's x-axis.
    pub fn user_relayout(&mut self, patch: RelayoutPatch) {
        if patch.requests_autorange() {
            self.x_axis.autorange = true;
        } else if let Some((low, high)) = patch.bounds() {
            self.x_axis = AxisRange::fixed(low, high);
        }
        self.notify(ChartNotification::user(ChartEvent::Relayout(patch)));
    }

    fn notify(&self, notification: ChartNotification) {
        if let Some(queue) = &self.notifier {
            queue.post(self.id.clone(), notification);
        }
    }

    fn echo_relayout(&self, patch: RelayoutPatch) {
        if let Some(origin) = self.relayout_echo {
            self.notify(ChartNotification {
                origin,
                event: ChartEvent::Relayout(patch),
            });
        }
    }

    fn ensure_live(&self) -> SyncResult<()> {
        if self.live {
            Ok(())
        } else {
            Err(SyncError::StaleChart {
                id: self.id.clone(),
            })
        }
    }
}

impl ChartSurface for HeadlessChart {
    fn is_live(&self) -> bool {
        self.live
    }

    fn plotted_series(&self) -> Vec<SeriesId> {
        self.series.clone()
    }

    fn x_axis(&self) -> AxisRange {
        self.x_axis
    }

    fn show_hover(&mut self, x_value: f64, series: &[SeriesId]) -> SyncResult<()> {
        self.ensure_live()?;
        self.hover = Some(HoverHighlight {
            x_value,
            series: series.to_vec(),
        });
        self.instructions.push(SurfaceInstruction::ShowHover {
            x_value,
            series: series.to_vec(),
        });
        Ok(())
    }

    fn clear_hover(&mut self) -> SyncResult<()> {
        self.ensure_live()?;
        self.hover = None;
        self.instructions.push(SurfaceInstruction::ClearHover);
        Ok(())
    }

    fn set_x_axis_range(&mut self, low: f64, high: f64) -> SyncResult<()> {
        self.ensure_live()?;
        self.x_axis = AxisRange::fixed(low, high);
        self.instructions
            .push(SurfaceInstruction::SetRange { low, high });
        self.echo_relayout(RelayoutPatch::range(low, high));
        Ok(())
    }

    fn set_x_axis_autorange(&mut self) -> SyncResult<()> {
        self.ensure_live()?;
        self.x_axis.autorange = true;
        self.instructions.push(SurfaceInstruction::SetAutorange);
        self.echo_relayout(RelayoutPatch::autorange());
        Ok(())
    }
}
