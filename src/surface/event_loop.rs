use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ChartId;
use crate::error::{SyncError, SyncResult};
use crate::interaction::{ChartNotification, NotificationKind};

const DEFAULT_TURN_BUDGET: usize = 10_000;

/// Callback registered for one chart and one notification kind.
pub type NotificationListener = Rc<dyn Fn(&ChartNotification)>;

/// Disposable handle returned by [`NotificationSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

/// Per-chart subscribe/unsubscribe contract of the host's event source.
pub trait NotificationSource {
    fn subscribe(
        &self,
        chart: &ChartId,
        kind: NotificationKind,
        listener: NotificationListener,
    ) -> SubscriptionId;

    /// Removes a subscription. Returns `false` when it was already removed.
    fn unsubscribe(&self, subscription: SubscriptionId) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedNotification {
    pub chart: ChartId,
    pub notification: ChartNotification,
}

/// FIFO of notifications waiting for dispatch.
///
/// Charts hold a clone to report programmatic echoes; the queue never holds
/// listeners, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Rc<RefCell<VecDeque<QueuedNotification>>>,
}

impl NotificationQueue {
    pub fn post(&self, chart: impl Into<ChartId>, notification: ChartNotification) {
        self.pending.borrow_mut().push_back(QueuedNotification {
            chart: chart.into(),
            notification,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn pop(&self) -> Option<QueuedNotification> {
        self.pending.borrow_mut().pop_front()
    }
}

struct Subscriber {
    chart: ChartId,
    kind: NotificationKind,
    listener: NotificationListener,
}

/// Headless run-to-completion event source.
///
/// Each dispatch turn handles exactly one queued notification; anything a
/// listener causes to be posted waits for a later turn.
pub struct EventLoop {
    queue: NotificationQueue,
    subscribers: RefCell<IndexMap<SubscriptionId, Subscriber>>,
    next_subscription: Cell<u64>,
    turn_budget: usize,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: NotificationQueue::default(),
            subscribers: RefCell::new(IndexMap::new()),
            next_subscription: Cell::new(0),
            turn_budget: DEFAULT_TURN_BUDGET,
        }
    }

    /// Caps the number of turns `run_until_idle` may take.
    #[must_use]
    pub fn with_turn_budget(mut self, turn_budget: usize) -> Self {
        self.turn_budget = turn_budget.max(1);
        self
    }

    #[must_use]
    pub fn queue(&self) -> NotificationQueue {
        self.queue.clone()
    }

    pub fn post(&self, chart: impl Into<ChartId>, notification: ChartNotification) {
        self.queue.post(chart, notification);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    #[must_use]
    pub fn subscriber_count_for(&self, chart: &ChartId) -> usize {
        self.subscribers
            .borrow()
            .values()
            .filter(|subscriber| &subscriber.chart == chart)
            .count()
    }

    /// Dispatches the oldest queued notification. Returns `false` when idle.
    pub fn dispatch_next(&self) -> bool {
        let Some(queued) = self.queue.pop() else {
            return false;
        };
        let kind = queued.notification.kind();
        let targets: Vec<(SubscriptionId, NotificationListener)> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|(_, subscriber)| subscriber.chart == queued.chart && subscriber.kind == kind)
            .map(|(id, subscriber)| (*id, subscriber.listener.clone()))
            .collect();
        trace!(
            chart = %queued.chart,
            ?kind,
            listeners = targets.len(),
            "dispatch notification"
        );

        for (id, listener) in targets {
            // An earlier listener of this turn may have detached this one.
            if self.subscribers.borrow().contains_key(&id) {
                listener(&queued.notification);
            }
        }
        true
    }

    /// Dispatches until the queue drains. Returns the number of turns taken.
    pub fn run_until_idle(&self) -> SyncResult<usize> {
        let mut turns = 0;
        while !self.queue.is_empty() {
            if turns == self.turn_budget {
                return Err(SyncError::DispatchBudgetExhausted { turns });
            }
            self.dispatch_next();
            turns += 1;
        }
        Ok(turns)
    }
}

impl NotificationSource for EventLoop {
    fn subscribe(
        &self,
        chart: &ChartId,
        kind: NotificationKind,
        listener: NotificationListener,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().insert(
            id,
            Subscriber {
                chart: chart.clone(),
                kind,
                listener,
            },
        );
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.subscribers
            .borrow_mut()
            .shift_remove(&subscription)
            .is_some()
    }
}
