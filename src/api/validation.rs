use indexmap::IndexSet;

use crate::core::ChartId;
use crate::error::{SyncError, SyncResult};
use crate::surface::ChartRegistry;

pub(super) fn validate_group_members(
    primary: &ChartId,
    followers: &IndexSet<ChartId>,
) -> SyncResult<()> {
    if primary.is_empty() {
        return Err(SyncError::InvalidGroup(
            "primary chart id must not be empty".to_owned(),
        ));
    }
    if followers.is_empty() {
        return Err(SyncError::InvalidGroup(format!(
            "group of `{primary}` needs at least one follower"
        )));
    }
    if followers.contains(primary) {
        return Err(SyncError::InvalidGroup(format!(
            "chart `{primary}` cannot follow itself"
        )));
    }
    if followers.iter().any(ChartId::is_empty) {
        return Err(SyncError::InvalidGroup(
            "follower chart ids must not be empty".to_owned(),
        ));
    }
    Ok(())
}

/// Validates the invariants and requires every configured chart to be live.
pub(super) fn validate_attachable(
    registry: &ChartRegistry,
    primary: &ChartId,
    followers: &IndexSet<ChartId>,
) -> SyncResult<()> {
    validate_group_members(primary, followers)?;
    registry.resolve(primary)?;
    for follower in followers {
        registry.resolve(follower)?;
    }
    Ok(())
}

pub(super) fn validate_dashboard_members(charts: &IndexSet<ChartId>) -> SyncResult<()> {
    if charts.len() < 2 {
        return Err(SyncError::InvalidGroup(
            "a linked dashboard needs at least two charts".to_owned(),
        ));
    }
    if charts.iter().any(ChartId::is_empty) {
        return Err(SyncError::InvalidGroup(
            "chart ids must not be empty".to_owned(),
        ));
    }
    Ok(())
}
