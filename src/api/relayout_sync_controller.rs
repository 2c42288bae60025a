use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::{ChartId, RelayoutPatch};
use crate::error::{SyncError, SyncResult};
use crate::interaction::{ChartEvent, ChartNotification, NotificationKind};
use crate::surface::{ChartRegistry, NotificationSource};

use super::behavior::accepts_origin;
use super::subscription::{Attached, Subscription};
use super::validation::validate_attachable;
use super::{RelayoutDecision, RelayoutSyncBehavior, RelayoutSyncDiagnostics};

/// Result of mirroring one relayout patch onto the followers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelayoutPropagation {
    pub decisions: Vec<(ChartId, RelayoutDecision)>,
    pub skipped: Vec<ChartId>,
}

impl RelayoutPropagation {
    /// Number of followers that received an axis instruction.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.decisions
            .iter()
            .filter(|(_, decision)| !decision.is_skip())
            .count()
    }

    #[must_use]
    pub fn decision_for(&self, follower: &ChartId) -> Option<RelayoutDecision> {
        self.decisions
            .iter()
            .find(|(chart, _)| chart == follower)
            .map(|(_, decision)| *decision)
    }
}

/// Mirrors x-axis range changes of a primary chart onto its followers.
///
/// Each follower's axis is read before anything is applied, which makes the
/// propagation idempotent and stops charts that re-report programmatic
/// relayouts from ping-ponging.
#[derive(Debug)]
pub struct RelayoutSyncController {
    primary: ChartId,
    followers: IndexSet<ChartId>,
    registry: ChartRegistry,
    behavior: RelayoutSyncBehavior,
    diagnostics: Cell<RelayoutSyncDiagnostics>,
}

impl RelayoutSyncController {
    #[must_use]
    pub fn new(registry: ChartRegistry, primary: ChartId, followers: IndexSet<ChartId>) -> Self {
        Self {
            primary,
            followers,
            registry,
            behavior: RelayoutSyncBehavior::default(),
            diagnostics: Cell::new(RelayoutSyncDiagnostics::default()),
        }
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: RelayoutSyncBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Subscribes to the primary's relayout stream.
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
            NotificationKind::Relayout,
            Rc::new(move |notification: &ChartNotification| handler.on_notification(notification)),
        );
        debug!(
            primary = %controller.primary,
            followers = controller.followers.len(),
            "relayout sync attached"
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
    pub fn behavior(&self) -> RelayoutSyncBehavior {
        self.behavior
    }

    #[must_use]
    pub fn diagnostics(&self) -> RelayoutSyncDiagnostics {
        self.diagnostics.get()
    }

    fn on_notification(&self, notification: &ChartNotification) {
        let ChartEvent::Relayout(patch) = &notification.event else {
            return;
        };
        if !accepts_origin(self.behavior.ignore_programmatic, notification.origin) {
            self.record(|d| d.programmatic_ignored += 1);
            trace!(primary = %self.primary, "ignore programmatic relayout notification");
            return;
        }
        self.propagate(*patch);
    }

    /// Applies `patch` to every follower whose axis it would change.
    pub fn propagate(&self, patch: RelayoutPatch) -> RelayoutPropagation {
        self.record(|d| d.relayouts_received += 1);
        let mut report = RelayoutPropagation::default();

        for follower in &self.followers {
            match self.relayout_follower(follower, patch) {
                Ok(decision) => {
                    self.record(|d| match decision {
                        RelayoutDecision::Apply { .. } => d.ranges_applied += 1,
                        RelayoutDecision::ApplyAutorange => d.autoranges_applied += 1,
                        RelayoutDecision::SkipAlreadyAutorange => d.skipped_already_autorange += 1,
                        RelayoutDecision::SkipSameBounds => d.skipped_same_bounds += 1,
                        RelayoutDecision::SkipMissingBounds => d.skipped_missing_bounds += 1,
                    });
                    trace!(
                        primary = %self.primary,
                        follower = %follower,
                        ?decision,
                        "relayout decision"
                    );
                    report.decisions.push((follower.clone(), decision));
                }
                Err(err) => {
                    self.record(|d| d.stale_followers += 1);
                    warn!(
                        primary = %self.primary,
                        follower = %follower,
                        error = %err,
                        "skipping relayout sync for follower"
                    );
                    report.skipped.push(follower.clone());
                }
            }
        }
        report
    }

    fn relayout_follower(
        &self,
        follower: &ChartId,
        patch: RelayoutPatch,
    ) -> SyncResult<RelayoutDecision> {
        let handle = self.registry.resolve_attached(follower)?;
        let mut chart = handle.try_borrow_mut().map_err(|_| SyncError::ChartBusy {
            id: follower.clone(),
        })?;
        let decision = RelayoutDecision::evaluate(patch, chart.x_axis());
        match decision {
            RelayoutDecision::Apply { low, high } => chart.set_x_axis_range(low, high)?,
            RelayoutDecision::ApplyAutorange => chart.set_x_axis_autorange()?,
            RelayoutDecision::SkipAlreadyAutorange
            | RelayoutDecision::SkipSameBounds
            | RelayoutDecision::SkipMissingBounds => {}
        }
        Ok(decision)
    }

    fn record(&self, update: impl FnOnce(&mut RelayoutSyncDiagnostics)) {
        let mut diagnostics = self.diagnostics.get();
        update(&mut diagnostics);
        self.diagnostics.set(diagnostics);
    }
}
