use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::ChartId;
use crate::interaction::NotificationKind;
use crate::surface::{NotificationListener, NotificationSource, SubscriptionId};

/// Subscriptions a controller holds on its primary chart.
///
/// Detaching is idempotent and also happens on drop, so a dropped group never
/// leaves listeners behind on a chart.
pub struct Subscription {
    source: Rc<dyn NotificationSource>,
    ids: RefCell<SmallVec<[SubscriptionId; 2]>>,
}

impl Subscription {
    pub(super) fn new(source: Rc<dyn NotificationSource>) -> Self {
        Self {
            source,
            ids: RefCell::new(SmallVec::new()),
        }
    }

    pub(super) fn listen(
        &self,
        chart: &ChartId,
        kind: NotificationKind,
        listener: NotificationListener,
    ) {
        let id = self.source.subscribe(chart, kind, listener);
        self.ids.borrow_mut().push(id);
    }

    /// Removes every listener. Returns `false` when already detached.
    pub fn detach(&self) -> bool {
        let ids = std::mem::take(&mut *self.ids.borrow_mut());
        if ids.is_empty() {
            return false;
        }
        for id in ids {
            self.source.unsubscribe(id);
        }
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.ids.borrow().is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("ids", &self.ids.borrow())
            .finish_non_exhaustive()
    }
}

/// A controller together with the subscriptions that feed it.
#[derive(Debug)]
pub struct Attached<C> {
    controller: Rc<C>,
    subscription: Subscription,
}

impl<C> Attached<C> {
    pub(super) fn new(controller: Rc<C>, subscription: Subscription) -> Self {
        Self {
            controller,
            subscription,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn detach(&self) -> bool {
        self.subscription.detach()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_attached()
    }
}
