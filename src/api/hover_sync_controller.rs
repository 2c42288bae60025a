use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::{ChartId, HoverPoint};
use crate::error::{SyncError, SyncResult};
use crate::extensions::HoverCallbacks;
use crate::interaction::{ChartEvent, ChartNotification, HoverEvent, NotificationKind};
use crate::surface::{ChartRegistry, NotificationSource};

use super::behavior::accepts_origin;
use super::subscription::{Attached, Subscription};
use super::validation::validate_attachable;
use super::{HoverSyncBehavior, HoverSyncDiagnostics};

/// Result of mirroring one hover onto a set of charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HoverPropagation {
    pub point: Option<HoverPoint>,
    pub updated: Vec<ChartId>,
    /// Charts with no plotted series; nothing was drawn on them.
    pub without_series: Vec<ChartId>,
    pub skipped: Vec<ChartId>,
    pub callback_failures: usize,
}

/// Mirrors pointer hovers of a primary chart onto its followers.
#[derive(Debug)]
pub struct HoverSyncController {
    primary: ChartId,
    followers: IndexSet<ChartId>,
    registry: ChartRegistry,
    callbacks: HoverCallbacks,
    behavior: HoverSyncBehavior,
    diagnostics: Cell<HoverSyncDiagnostics>,
}

impl HoverSyncController {
    #[must_use]
    pub fn new(
        registry: ChartRegistry,
        primary: ChartId,
        followers: IndexSet<ChartId>,
        callbacks: HoverCallbacks,
    ) -> Self {
        Self {
            primary,
            followers,
            registry,
            callbacks,
            behavior: HoverSyncBehavior::default(),
            diagnostics: Cell::new(HoverSyncDiagnostics::default()),
        }
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: HoverSyncBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Subscribes to the primary's hover stream.
    ///
    /// Fails without subscribing when the group is invalid or a configured
    /// chart does not resolve.
    pub fn attach(self, source: Rc<dyn NotificationSource>) -> SyncResult<Attached<Self>> {
        validate_attachable(&self.registry, &self.primary, &self.followers)?;
        Ok(self.attach_validated(source))
    }

    /// Subscribes without resolving the charts again; the caller validated them.
    pub(super) fn attach_validated(self, source: Rc<dyn NotificationSource>) -> Attached<Self> {
        let controller = Rc::new(self);
        let subscription = Subscription::new(source);
        let handler = Rc::clone(&controller);
        subscription.listen(
            &controller.primary,
            NotificationKind::Hover,
            Rc::new(move |notification: &ChartNotification| handler.on_notification(notification)),
        );
        if controller.behavior.clear_on_unhover {
            let handler = Rc::clone(&controller);
            subscription.listen(
                &controller.primary,
                NotificationKind::Unhover,
                Rc::new(move |notification: &ChartNotification| {
                    handler.on_notification(notification)
                }),
            );
        }
        debug!(
            primary = %controller.primary,
            followers = controller.followers.len(),
            "hover sync attached"
        );
        Attached::new(controller, subscription)
    }

    #[must_use]
    pub fn primary(&self) -> &ChartId {
        &self.primary
    }

    #[must_use]
    pub fn followers(&self) -> &IndexSet<ChartId> {
        &self.followers
    }

    #[must_use]
    pub fn behavior(&self) -> HoverSyncBehavior {
        self.behavior
    }

    #[must_use]
    pub fn diagnostics(&self) -> HoverSyncDiagnostics {
        self.diagnostics.get()
    }

    fn on_notification(&self, notification: &ChartNotification) {
        if !accepts_origin(self.behavior.ignore_programmatic, notification.origin) {
            self.record(|d| d.programmatic_ignored += 1);
            trace!(primary = %self.primary, "ignore programmatic hover notification");
            return;
        }
        match &notification.event {
            ChartEvent::Hover(event) => {
                self.propagate(event);
            }
            ChartEvent::Unhover => {
                self.clear_followers();
            }
            ChartEvent::Relayout(_) => {}
        }
    }

    /// Mirrors `event` onto every follower and notifies the callbacks once.
    pub fn propagate(&self, event: &HoverEvent) -> HoverPropagation {
        let Some(point) = event.primary_point() else {
            self.record(|d| d.hovers_without_points += 1);
            debug!(primary = %self.primary, "hover notification without points");
            return HoverPropagation::default();
        };
        self.record(|d| d.hovers_received += 1);
        trace!(
            primary = %self.primary,
            x_value = point.x_value,
            point_index = point.point_index,
            "propagate hover"
        );

        let mut report = HoverPropagation {
            point: Some(point),
            ..HoverPropagation::default()
        };
        report.callback_failures = self.notify_callbacks(point);

        for follower in &self.followers {
            match show_hover_on(&self.registry, follower, point.x_value) {
                Ok(true) => {
                    self.record(|d| d.hover_instructions += 1);
                    report.updated.push(follower.clone());
                }
                Ok(false) => report.without_series.push(follower.clone()),
                Err(err) => {
                    self.record(|d| d.stale_followers += 1);
                    warn!(
                        primary = %self.primary,
                        follower = %follower,
                        error = %err,
                        "skipping hover sync for follower"
                    );
                    report.skipped.push(follower.clone());
                }
            }
        }
        report
    }

    /// Clears the highlight of every follower.
    pub fn clear_followers(&self) -> HoverPropagation {
        self.record(|d| d.unhovers_received += 1);
        let mut report = HoverPropagation::default();
        for follower in &self.followers {
            let cleared = self
                .registry
                .resolve_attached(follower)
                .and_then(|handle| {
                    let mut chart = handle.try_borrow_mut().map_err(|_| SyncError::ChartBusy {
                        id: follower.clone(),
                    })?;
                    chart.clear_hover()
                });
            match cleared {
                Ok(()) => {
                    self.record(|d| d.clear_instructions += 1);
                    report.updated.push(follower.clone());
                }
                Err(err) => {
                    self.record(|d| d.stale_followers += 1);
                    warn!(
                        primary = %self.primary,
                        follower = %follower,
                        error = %err,
                        "skipping unhover sync for follower"
                    );
                    report.skipped.push(follower.clone());
                }
            }
        }
        report
    }

    fn notify_callbacks(&self, point: HoverPoint) -> usize {
        let mut failures = 0;
        if let Err(err) = self.callbacks.sink.on_point_index(point.point_index) {
            failures += 1;
            warn!(
                primary = %self.primary,
                point_index = point.point_index,
                error = %err,
                "hover sink failed"
            );
        }
        if let Some(host) = &self.callbacks.host {
            if let Err(err) = host.on_x_value(point.x_value) {
                failures += 1;
                warn!(
                    primary = %self.primary,
                    x_value = point.x_value,
                    error = %err,
                    "hover host callback failed"
                );
            }
        }
        if failures > 0 {
            self.record(|d| d.callback_failures += failures as u64);
        }
        failures
    }

    fn record(&self, update: impl FnOnce(&mut HoverSyncDiagnostics)) {
        let mut diagnostics = self.diagnostics.get();
        update(&mut diagnostics);
        self.diagnostics.set(diagnostics);
    }
}

/// Highlights `x_value` on every series currently plotted on `chart_id`.
///
/// Returns `Ok(false)` when the chart has no series to highlight.
pub(super) fn show_hover_on(
    registry: &ChartRegistry,
    chart_id: &ChartId,
    x_value: f64,
) -> SyncResult<bool> {
    let handle = registry.resolve_attached(chart_id)?;
    let mut chart = handle.try_borrow_mut().map_err(|_| SyncError::ChartBusy {
        id: chart_id.clone(),
    })?;
    let series = chart.plotted_series();
    if series.is_empty() {
        return Ok(false);
    }
    chart.show_hover(x_value, &series)?;
    Ok(true)
}
