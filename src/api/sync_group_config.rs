use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::ChartId;
use crate::error::{SyncError, SyncResult};

use super::validation::{validate_dashboard_members, validate_group_members};
use super::{HoverSyncBehavior, RelayoutSyncBehavior};

/// Bootstrap configuration of one [`super::SyncGroup`].
///
/// Serializable so dashboards can declare their groups next to their chart
/// layout. It holds no runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncGroupConfig {
    pub primary: ChartId,
    pub followers: IndexSet<ChartId>,
    #[serde(default)]
    pub hover: HoverSyncBehavior,
    #[serde(default)]
    pub relayout: RelayoutSyncBehavior,
}

impl SyncGroupConfig {
    /// Creates a config with default behaviors. Duplicate followers collapse.
    #[must_use]
    pub fn new(
        primary: impl Into<ChartId>,
        followers: impl IntoIterator<Item = impl Into<ChartId>>,
    ) -> Self {
        Self {
            primary: primary.into(),
            followers: followers.into_iter().map(Into::into).collect(),
            hover: HoverSyncBehavior::default(),
            relayout: RelayoutSyncBehavior::default(),
        }
    }

    #[must_use]
    pub fn with_hover_behavior(mut self, hover: HoverSyncBehavior) -> Self {
        self.hover = hover;
        self
    }

    #[must_use]
    pub fn with_relayout_behavior(mut self, relayout: RelayoutSyncBehavior) -> Self {
        self.relayout = relayout;
        self
    }

    /// Checks the group invariants without resolving any chart.
    pub fn validate(&self) -> SyncResult<()> {
        validate_group_members(&self.primary, &self.followers)
    }

    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            SyncError::InvalidData(format!("failed to parse sync group config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> SyncResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SyncError::InvalidData(format!("failed to serialize sync group config: {e}"))
        })
    }
}

/// Configuration of a fully linked dashboard: every chart drives all others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSyncConfig {
    pub charts: IndexSet<ChartId>,
    #[serde(default)]
    pub hover: HoverSyncBehavior,
    #[serde(default)]
    pub relayout: RelayoutSyncBehavior,
}

impl DashboardSyncConfig {
    #[must_use]
    pub fn new(charts: impl IntoIterator<Item = impl Into<ChartId>>) -> Self {
        Self {
            charts: charts.into_iter().map(Into::into).collect(),
            hover: HoverSyncBehavior::default(),
            relayout: RelayoutSyncBehavior::default(),
        }
    }

    #[must_use]
    pub fn with_hover_behavior(mut self, hover: HoverSyncBehavior) -> Self {
        self.hover = hover;
        self
    }

    #[must_use]
    pub fn with_relayout_behavior(mut self, relayout: RelayoutSyncBehavior) -> Self {
        self.relayout = relayout;
        self
    }

    pub fn validate(&self) -> SyncResult<()> {
        validate_dashboard_members(&self.charts)
    }

    /// One group config per chart, each following every other chart.
    pub fn group_configs(&self) -> SyncResult<Vec<SyncGroupConfig>> {
        self.validate()?;
        Ok(self
            .charts
            .iter()
            .map(|primary| SyncGroupConfig {
                primary: primary.clone(),
                followers: self
                    .charts
                    .iter()
                    .filter(|chart| *chart != primary)
                    .cloned()
                    .collect(),
                hover: self.hover,
                relayout: self.relayout,
            })
            .collect())
    }
}
