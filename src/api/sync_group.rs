use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::core::ChartId;
use crate::error::SyncResult;
use crate::extensions::HoverCallbacks;
use crate::surface::{ChartRegistry, NotificationSource};

use super::hover_sync_controller::{HoverPropagation, show_hover_on};
use super::subscription::Attached;
use super::validation::validate_attachable;
use super::{
    HoverSyncController, RelayoutSyncController, SyncGroupConfig, SyncGroupDiagnostics,
};

/// One primary chart bound to its followers for hover and x-axis sync.
///
/// The group is its own detach handle. Dropping it detaches as well.
/// Cycles across groups (A follows B, B follows A) are not detected; the
/// relayout value guard keeps them from looping but they are still the
/// caller's responsibility.
#[derive(Debug)]
pub struct SyncGroup {
    config: SyncGroupConfig,
    registry: ChartRegistry,
    hover: Attached<HoverSyncController>,
    relayout: Attached<RelayoutSyncController>,
}

impl SyncGroup {
    /// Validates `config`, resolves every chart, and wires both controllers
    /// to the primary's notification stream.
    pub fn create(
        source: Rc<dyn NotificationSource>,
        registry: &ChartRegistry,
        config: SyncGroupConfig,
        callbacks: HoverCallbacks,
    ) -> SyncResult<Self> {
        validate_attachable(registry, &config.primary, &config.followers)?;

        let hover = HoverSyncController::new(
            registry.clone(),
            config.primary.clone(),
            config.followers.clone(),
            callbacks,
        )
        .with_behavior(config.hover)
        .attach_validated(Rc::clone(&source));
        let relayout = RelayoutSyncController::new(
            registry.clone(),
            config.primary.clone(),
            config.followers.clone(),
        )
        .with_behavior(config.relayout)
        .attach_validated(source);

        info!(
            primary = %config.primary,
            followers = config.followers.len(),
            "sync group created"
        );
        Ok(Self {
            config,
            registry: registry.clone(),
            hover,
            relayout,
        })
    }

    /// Removes both subscriptions. Returns `false` when already detached.
    pub fn detach(&self) -> bool {
        let hover = self.hover.detach();
        let relayout = self.relayout.detach();
        let detached = hover || relayout;
        if detached {
            debug!(primary = %self.config.primary, "sync group detached");
        }
        detached
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.hover.is_attached() || self.relayout.is_attached()
    }

    #[must_use]
    pub fn primary(&self) -> &ChartId {
        &self.config.primary
    }

    #[must_use]
    pub fn followers(&self) -> impl Iterator<Item = &ChartId> {
        self.config.followers.iter()
    }

    #[must_use]
    pub fn config(&self) -> &SyncGroupConfig {
        &self.config
    }

    #[must_use]
    pub fn hover_controller(&self) -> &HoverSyncController {
        self.hover.controller()
    }

    #[must_use]
    pub fn relayout_controller(&self) -> &RelayoutSyncController {
        self.relayout.controller()
    }

    #[must_use]
    pub fn diagnostics(&self) -> SyncGroupDiagnostics {
        SyncGroupDiagnostics {
            primary: self.config.primary.clone(),
            followers: self.config.followers.iter().cloned().collect(),
            attached: self.is_attached(),
            hover: self.hover.controller().diagnostics(),
            relayout: self.relayout.controller().diagnostics(),
        }
    }

    /// Highlights `x_value` on the primary and every follower.
    ///
    /// Used when the hover originates outside the charts (for example a
    /// selection on a track map). Callbacks are not invoked.
    pub fn show_hover_at(&self, x_value: f64) -> HoverPropagation {
        let members = std::iter::once(&self.config.primary).chain(self.config.followers.iter());
        show_hover_on_members(&self.registry, members, x_value)
    }
}

pub(super) fn show_hover_on_members<'a>(
    registry: &ChartRegistry,
    members: impl IntoIterator<Item = &'a ChartId>,
    x_value: f64,
) -> HoverPropagation {
    let mut report = HoverPropagation::default();
    for chart in members {
        match show_hover_on(registry, chart, x_value) {
            Ok(true) => report.updated.push(chart.clone()),
            Ok(false) => report.without_series.push(chart.clone()),
            Err(err) => {
                warn!(chart = %chart, error = %err, "skipping external hover for chart");
                report.skipped.push(chart.clone());
            }
        }
    }
    report
}
