use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::ChartId;
use crate::error::{SyncError, SyncResult};

use super::ChartHandle;

/// Explicit lookup table from chart id to chart handle.
///
/// Cloning is cheap and every clone sees the same charts, so controllers
/// observe removals made by the host after a group was attached.
#[derive(Clone, Default)]
pub struct ChartRegistry {
    charts: Rc<RefCell<IndexMap<ChartId, ChartHandle>>>,
}

impl ChartRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a chart under a unique, non-empty id.
    pub fn register(&self, id: impl Into<ChartId>, chart: ChartHandle) -> SyncResult<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(SyncError::InvalidData(
                "chart id must not be empty".to_owned(),
            ));
        }
        let mut charts = self.charts.borrow_mut();
        if charts.contains_key(&id) {
            return Err(SyncError::InvalidData(format!(
                "chart with id `{id}` is already registered"
            )));
        }
        charts.insert(id, chart);
        Ok(())
    }

    /// Removes a chart by id. Returns `true` when removed.
    pub fn remove(&self, id: &ChartId) -> bool {
        self.charts.borrow_mut().shift_remove(id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: &ChartId) -> bool {
        self.charts.borrow().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.borrow().is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ChartId> {
        self.charts.borrow().keys().cloned().collect()
    }

    /// Resolves a chart that must exist now (attach time).
    pub fn resolve(&self, id: &ChartId) -> SyncResult<ChartHandle> {
        self.lookup_live(id)
            .ok_or_else(|| SyncError::MissingChart { id: id.clone() })
    }

    /// Resolves a chart that existed when its group was attached.
    pub fn resolve_attached(&self, id: &ChartId) -> SyncResult<ChartHandle> {
        self.lookup_live(id)
            .ok_or_else(|| SyncError::StaleChart { id: id.clone() })
    }

    fn lookup_live(&self, id: &ChartId) -> Option<ChartHandle> {
        let chart = self.charts.borrow().get(id).cloned()?;
        // A chart borrowed mutably is in use, hence still live.
        let live = chart.try_borrow().map_or(true, |chart| chart.is_live());
        live.then_some(chart)
    }
}

impl fmt::Debug for ChartRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRegistry")
            .field("charts", &self.ids())
            .finish()
    }
}
