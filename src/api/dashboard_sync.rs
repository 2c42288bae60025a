use std::rc::Rc;

use tracing::info;

use crate::core::ChartId;
use crate::error::SyncResult;
use crate::extensions::HoverCallbacks;
use crate::surface::{ChartRegistry, NotificationSource};

use super::hover_sync_controller::HoverPropagation;
use super::sync_group::show_hover_on_members;
use super::{DashboardSyncConfig, SyncGroup, SyncGroupDiagnostics};

/// Fully linked dashboard: every chart is the primary of one group whose
/// followers are all the other charts.
///
/// Such a mesh contains cross-group cycles by construction. It terminates
/// because a follower already showing the incoming range is never relaid
/// out again.
#[derive(Debug)]
pub struct DashboardSync {
    charts: Vec<ChartId>,
    registry: ChartRegistry,
    groups: Vec<SyncGroup>,
}

impl DashboardSync {
    /// Links every chart of `config` to every other one.
    ///
    /// All groups share `callbacks`. Fails without leaving any subscription
    /// behind when one of the groups cannot be created.
    pub fn link_all(
        source: Rc<dyn NotificationSource>,
        registry: &ChartRegistry,
        config: &DashboardSyncConfig,
        callbacks: HoverCallbacks,
    ) -> SyncResult<Self> {
        let mut groups = Vec::with_capacity(config.charts.len());
        for group_config in config.group_configs()? {
            // Groups created so far are dropped, hence detached, on error.
            let group = SyncGroup::create(
                Rc::clone(&source),
                registry,
                group_config,
                callbacks.clone(),
            )?;
            groups.push(group);
        }
        info!(charts = config.charts.len(), "dashboard linked");
        Ok(Self {
            charts: config.charts.iter().cloned().collect(),
            registry: registry.clone(),
            groups,
        })
    }

    /// Detaches every group. Returns `false` when already detached.
    pub fn detach(&self) -> bool {
        self.groups
            .iter()
            .fold(false, |detached, group| group.detach() || detached)
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.groups.iter().any(SyncGroup::is_attached)
    }

    #[must_use]
    pub fn charts(&self) -> &[ChartId] {
        &self.charts
    }

    #[must_use]
    pub fn groups(&self) -> &[SyncGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, primary: &ChartId) -> Option<&SyncGroup> {
        self.groups.iter().find(|group| group.primary() == primary)
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<SyncGroupDiagnostics> {
        self.groups.iter().map(SyncGroup::diagnostics).collect()
    }

    /// Highlights `x_value` on every chart of the dashboard.
    pub fn show_hover_at(&self, x_value: f64) -> HoverPropagation {
        show_hover_on_members(&self.registry, &self.charts, x_value)
    }
}
