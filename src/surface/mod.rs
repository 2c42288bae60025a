mod event_loop;
mod headless;
mod registry;

pub use event_loop::{
    EventLoop, NotificationListener, NotificationQueue, NotificationSource, QueuedNotification,
    SubscriptionId,
};
pub use headless::{HeadlessChart, HoverHighlight, SurfaceInstruction};
pub use registry::ChartRegistry;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{AxisRange, SeriesId};
use crate::error::SyncResult;

/// Contract implemented by the chart widget a group synchronizes.
///
/// Implementations wrap the host charting library. Programmatic calls made
/// through this trait must not be re-reported as user hover notifications.
pub trait ChartSurface {
    /// `false` once the widget was removed from the page.
    fn is_live(&self) -> bool {
        true
    }

    /// Series currently plotted, read at call time.
    fn plotted_series(&self) -> Vec<SeriesId>;

    /// Current x-axis state, read synchronously.
    fn x_axis(&self) -> AxisRange;

    fn show_hover(&mut self, x_value: f64, series: &[SeriesId]) -> SyncResult<()>;

    fn clear_hover(&mut self) -> SyncResult<()>;

    /// Sets explicit bounds and leaves autorange.
    fn set_x_axis_range(&mut self, low: f64, high: f64) -> SyncResult<()>;

    fn set_x_axis_autorange(&mut self) -> SyncResult<()>;
}

/// Shared, non-owning reference to one chart widget.
pub type ChartHandle = Rc<RefCell<dyn ChartSurface>>;
