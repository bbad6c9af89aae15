//! Observer registry: one ordered subscriber list per action.

use crate::action::ActionId;
use crate::event::ActionSignal;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

type Handler = Rc<dyn Fn(&ActionSignal)>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Per-action subscriber lists.
///
/// Publishing iterates a snapshot of the list taken at call time, so a handler
/// may subscribe or unsubscribe without disturbing the delivery in progress.
/// Uses BTreeMap for deterministic channel order.
#[derive(Default)]
pub struct EventBus {
    channels: RefCell<BTreeMap<ActionId, Vec<(SubscriptionId, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the channel for `action`.
    pub fn subscribe(
        &self,
        action: ActionId,
        handler: impl Fn(&ActionSignal) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler = Rc::new(handler);
        self.channels
            .borrow_mut()
            .entry(action)
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut channels = self.channels.borrow_mut();
        for subscribers in channels.values_mut() {
            if let Some(pos) = subscribers.iter().position(|(sid, _)| *sid == id) {
                subscribers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn subscriber_count(&self, action: ActionId) -> usize {
        self.channels
            .borrow()
            .get(&action)
            .map_or(0, |subscribers| subscribers.len())
    }

    /// Deliver `signal` to every subscriber of its action, in subscription order.
    /// Returns how many handlers ran.
    pub fn publish(&self, signal: &ActionSignal) -> usize {
        let snapshot: Vec<Handler> = match self.channels.borrow().get(&signal.action) {
            Some(subscribers) => subscribers.iter().map(|(_, h)| Rc::clone(h)).collect(),
            None => return 0,
        };
        for handler in &snapshot {
            handler(signal);
        }
        snapshot.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<ActionId, usize> = self
            .channels
            .borrow()
            .iter()
            .map(|(action, subscribers)| (*action, subscribers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
