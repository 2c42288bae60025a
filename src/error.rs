use thiserror::Error;

use crate::core::ChartId;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("chart `{id}` is not registered or not live")]
    MissingChart { id: ChartId },

    #[error("chart `{id}` is no longer available")]
    StaleChart { id: ChartId },

    #[error("chart `{id}` is already handling an instruction")]
    ChartBusy { id: ChartId },

    #[error("invalid sync group: {0}")]
    InvalidGroup(String),

    #[error("callback failed: {0}")]
    Callback(String),

    #[error("notification queue still busy after {turns} dispatch turns")]
    DispatchBudgetExhausted { turns: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
