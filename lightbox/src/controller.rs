// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::apply::Apply;
use crate::bus::{BusEvent, OverlayBus, Subscription};
use crate::close_method::{ClickRegion, CloseMethod, CloseMethods};
use crate::id::OverlayId;
use crate::state::{OverlayState, PeerEvent};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

const ESCAPE_KEY_CODE: u32 = 27;

/// Whether a keyboard event with this `key` (and legacy `keyCode`) is the Escape key.
pub fn is_escape_key(key: &str, key_code: u32) -> bool {
    matches!(key, "Escape" | "Esc") || key_code == ESCAPE_KEY_CODE
}

/// Visibility bookkeeping and dismissal decisions of one overlay, independent of the DOM.
///
/// Transitions are broadcast on the bus, and (if Escape dismissal is enabled) other overlays'
/// transitions are counted to know whether this one is top-most.
pub struct Controller {
    id: OverlayId,
    methods: CloseMethods,
    bus: OverlayBus,
    state: Rc<RefCell<OverlayState>>,
    _subscription: Option<Subscription>,
}

impl Controller {
    pub fn new(bus: &OverlayBus, methods: CloseMethods) -> Self {
        let id = bus.allocate_id();
        let state = Rc::new(RefCell::new(OverlayState::default()));

        let subscription = methods.contains(CloseMethod::EscapeKey).then(|| {
            let state = Rc::downgrade(&state);
            bus.subscribe(move |event| {
                if event.source() == id {
                    return;
                }
                let Some(state) = state.upgrade() else {
                    return;
                };
                let peer_event = match event {
                    BusEvent::Shown(_) => PeerEvent::Shown,
                    BusEvent::Hidden(_) => PeerEvent::Hidden,
                };
                state.borrow_mut().apply(peer_event);
            })
        });

        Self {
            id,
            methods,
            bus: bus.clone(),
            state,
            _subscription: subscription,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn methods(&self) -> CloseMethods {
        self.methods
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    /// Number of other overlays shown since this one was, and not yet hidden.
    pub fn shown_over(&self) -> u32 {
        self.state.borrow().shown_over()
    }

    /// Returns `true` and broadcasts if this was a transition from hidden.
    pub fn show(&self) -> bool {
        // Borrow must end before publishing.
        let changed = self.state.borrow_mut().show();
        if changed {
            debug!("overlay {} shown", self.id);
            self.bus.publish(BusEvent::Shown(self.id));
        }
        changed
    }

    /// Returns `true` and broadcasts if this was a transition from visible.
    pub fn hide(&self) -> bool {
        let changed = self.state.borrow_mut().hide();
        if changed {
            debug!("overlay {} hidden", self.id);
            self.bus.publish(BusEvent::Hidden(self.id));
        }
        changed
    }

    /// Whether releasing this key should dismiss the overlay.
    pub fn closes_on_key(&self, key: &str, key_code: u32) -> bool {
        self.methods.contains(CloseMethod::EscapeKey)
            && is_escape_key(key, key_code)
            && self.state.borrow().is_top_most()
    }

    /// Whether a click in `region` should dismiss the overlay.
    pub fn closes_on_click(&self, region: ClickRegion) -> bool {
        self.is_visible() && self.methods.closes_on_click(region)
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Peers would otherwise count us forever.
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use CloseMethod::*;

    fn escape(controller: &Controller) -> bool {
        let close = controller.closes_on_key("Escape", 27);
        if close {
            controller.hide();
        }
        close
    }

    #[test]
    fn starts_hidden() {
        let controller = Controller::new(&OverlayBus::new(), CloseMethods::defaults());
        assert!(!controller.is_visible());
        assert!(!escape(&controller));
    }

    #[test]
    fn single_shown_broadcast() {
        let bus = OverlayBus::new();
        let shown = Rc::new(Cell::new(0));
        let _counter = {
            let shown = Rc::clone(&shown);
            bus.subscribe(move |event| {
                if matches!(event, BusEvent::Shown(_)) {
                    shown.set(shown.get() + 1);
                }
            })
        };

        let controller = Controller::new(&bus, CloseMethods::defaults());
        assert!(controller.show());
        assert!(!controller.show());
        assert_eq!(shown.get(), 1);

        assert!(controller.hide());
        assert!(!controller.hide());
        assert!(!controller.is_visible());
    }

    #[test]
    fn escape_closes_top_most() {
        let bus = OverlayBus::new();
        let a = Controller::new(&bus, CloseMethods::defaults());
        let b = Controller::new(&bus, CloseMethods::defaults());

        a.show();
        b.show();
        assert_eq!(a.shown_over(), 1);
        assert_eq!(b.shown_over(), 0);

        // Every overlay sees the same key event, but only `b` reacts.
        assert!(!a.closes_on_key("Escape", 27));
        assert!(escape(&b));
        assert!(!b.is_visible());
        assert_eq!(a.shown_over(), 0);

        assert!(escape(&a));
        assert!(!a.is_visible());
    }

    #[test]
    fn escape_disabled() {
        let bus = OverlayBus::new();
        let a = Controller::new(&bus, [Button].into_iter().collect());
        assert_eq!(bus.subscriber_count(), 0);
        a.show();
        assert!(!a.closes_on_key("Escape", 27));

        let b = Controller::new(&bus, CloseMethods::defaults());
        b.show();
        // `a` does not count peers.
        assert_eq!(a.shown_over(), 0);
        assert!(b.closes_on_key("Esc", 0));
        assert!(b.closes_on_key("", 27));
        assert!(!b.closes_on_key("Enter", 13));
    }

    #[test]
    fn dropped_peer_hides() {
        let bus = OverlayBus::new();
        let a = Controller::new(&bus, CloseMethods::defaults());
        a.show();
        {
            let b = Controller::new(&bus, CloseMethods::defaults());
            b.show();
            assert_eq!(a.shown_over(), 1);
        }
        assert_eq!(a.shown_over(), 0);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn clicks() {
        let bus = OverlayBus::new();
        let inner = Controller::new(&bus, [InnerClick].into_iter().collect());
        assert!(!inner.closes_on_click(ClickRegion::Content));
        inner.show();
        assert!(inner.closes_on_click(ClickRegion::Content));
        assert!(!inner.closes_on_click(ClickRegion::Outside));

        let both = Controller::new(&bus, [InnerClick, OuterClick].into_iter().collect());
        both.show();
        assert!(both.closes_on_click(ClickRegion::Content));
        assert!(both.closes_on_click(ClickRegion::Outside));
    }
}
