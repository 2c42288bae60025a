use std::fmt;
use std::rc::Rc;

use crate::error::SyncResult;

/// Receives the point index hovered on a primary chart.
///
/// Errors are logged and counted by the controller; they never stop the
/// follower updates of the same notification.
pub trait HoverSink {
    fn on_point_index(&self, point_index: usize) -> SyncResult<()>;
}

impl<F> HoverSink for F
where
    F: Fn(usize) -> SyncResult<()>,
{
    fn on_point_index(&self, point_index: usize) -> SyncResult<()> {
        self(point_index)
    }
}

/// Receives the raw hovered x-value for logic running outside the UI layer.
pub trait HoverHostCallback {
    fn on_x_value(&self, x_value: f64) -> SyncResult<()>;
}

impl<F> HoverHostCallback for F
where
    F: Fn(f64) -> SyncResult<()>,
{
    fn on_x_value(&self, x_value: f64) -> SyncResult<()> {
        self(x_value)
    }
}

/// Callbacks attached to a hover controller.
///
/// Cloning shares the same callbacks, which is how one suggestion panel can
/// listen to every group of a dashboard.
#[derive(Clone)]
pub struct HoverCallbacks {
    pub(crate) sink: Rc<dyn HoverSink>,
    pub(crate) host: Option<Rc<dyn HoverHostCallback>>,
}

impl HoverCallbacks {
    #[must_use]
    pub fn new(sink: impl HoverSink + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
            host: None,
        }
    }

    #[must_use]
    pub fn shared(sink: Rc<dyn HoverSink>) -> Self {
        Self { sink, host: None }
    }

    /// Sink that ignores every hover.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(|_point_index: usize| -> SyncResult<()> { Ok(()) })
    }

    #[must_use]
    pub fn with_host_callback(mut self, host: impl HoverHostCallback + 'static) -> Self {
        self.host = Some(Rc::new(host));
        self
    }

    #[must_use]
    pub fn has_host_callback(&self) -> bool {
        self.host.is_some()
    }
}

impl fmt::Debug for HoverCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverCallbacks")
            .field("host", &self.host.is_some())
            .finish_non_exhaustive()
    }
}
