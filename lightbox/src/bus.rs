// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::id::OverlayId;
use std::cell::{Cell, RefCell};
use std::num::NonZeroU32;
use std::rc::{Rc, Weak};

/// A visibility transition of some overlay.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BusEvent {
    Shown(OverlayId),
    Hidden(OverlayId),
}

impl BusEvent {
    /// The overlay that made the transition.
    pub fn source(self) -> OverlayId {
        match self {
            Self::Shown(id) | Self::Hidden(id) => id,
        }
    }
}

type Handler = dyn Fn(BusEvent);

#[derive(Default)]
struct Inner {
    next_id: Cell<u32>,
    next_key: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Weak<Handler>)>>,
}

/// Synchronous publish/subscribe channel shared by overlays so each can tell how many others
/// were shown above it.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct OverlayBus {
    inner: Rc<Inner>,
}

thread_local! {
    static GLOBAL: OverlayBus = OverlayBus::default();
}

impl OverlayBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page-wide bus.
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    /// Allocates an id unique within this bus.
    pub fn allocate_id(&self) -> OverlayId {
        let next = self.inner.next_id.get().wrapping_add(1).max(1);
        self.inner.next_id.set(next);
        // `max(1)` guarantees non-zero.
        OverlayId(NonZeroU32::new(next).unwrap_or(NonZeroU32::MIN))
    }

    /// Calls `handler` for every subsequent event until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe(&self, handler: impl Fn(BusEvent) + 'static) -> Subscription {
        let handler: Rc<Handler> = Rc::new(handler);
        let key = self.inner.next_key.get();
        self.inner.next_key.set(key + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((key, Rc::downgrade(&handler)));
        Subscription {
            bus: Rc::downgrade(&self.inner),
            key,
            _handler: handler,
        }
    }

    /// Delivers `event` to every current subscriber before returning.
    pub fn publish(&self, event: BusEvent) {
        // Snapshot so handlers are free to (un)subscribe.
        let handlers: Vec<Rc<Handler>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .filter_map(|(_, handler)| handler.upgrade())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

/// Keeps a handler registered on an [`OverlayBus`]. Unsubscribes when dropped.
pub struct Subscription {
    bus: Weak<Inner>,
    key: u64,
    _handler: Rc<Handler>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            let key = self.key;
            inner.subscribers.borrow_mut().retain(|(k, _)| *k != key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_unique() {
        let bus = OverlayBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        assert_ne!(a, b);
        // Separate buses count separately.
        assert_eq!(OverlayBus::new().allocate_id(), a);
    }

    #[test]
    fn publish_subscribe() {
        let bus = OverlayBus::new();
        let id = bus.allocate_id();
        let received = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let received = Rc::clone(&received);
            bus.subscribe(move |event| received.borrow_mut().push(event))
        };
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(BusEvent::Shown(id));
        bus.publish(BusEvent::Hidden(id));
        assert_eq!(
            *received.borrow(),
            vec![BusEvent::Shown(id), BusEvent::Hidden(id)]
        );
        assert_eq!(received.borrow()[0].source(), id);

        drop(subscription);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(BusEvent::Shown(id));
        assert_eq!(received.borrow().len(), 2);
    }

    #[test]
    fn unsubscribe_during_publish() {
        let bus = OverlayBus::new();
        let id = bus.allocate_id();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let subscription = {
            let slot = Rc::clone(&slot);
            let calls = Rc::clone(&calls);
            bus.subscribe(move |_| {
                calls.set(calls.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(subscription);

        bus.publish(BusEvent::Shown(id));
        bus.publish(BusEvent::Shown(id));
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outlives_bus() {
        let bus = OverlayBus::new();
        let subscription = bus.subscribe(|_| {});
        drop(bus);
        drop(subscription);
    }
}
