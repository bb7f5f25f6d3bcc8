// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::apply::Apply;

/// Another overlay changed visibility.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PeerEvent {
    Shown,
    Hidden,
}

/// Visibility of one overlay, and how many others were shown on top of it.
#[derive(Debug, Default)]
pub struct OverlayState {
    visible: bool,
    shown_over: u32,
}

impl Apply<PeerEvent> for OverlayState {
    /// Peers only count while this overlay is visible.
    fn apply(&mut self, event: PeerEvent) {
        if !self.visible {
            return;
        }
        match event {
            PeerEvent::Shown => self.shown_over += 1,
            // Saturates, e.g. if a peer that was shown before us is hidden.
            PeerEvent::Hidden => self.shown_over = self.shown_over.saturating_sub(1),
        }
    }
}

impl OverlayState {
    /// Returns `true` if this was a transition from hidden.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.shown_over = 0;
        true
    }

    /// Returns `true` if this was a transition from visible.
    pub fn hide(&mut self) -> bool {
        std::mem::take(&mut self.visible)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn shown_over(&self) -> u32 {
        self.shown_over
    }

    /// Visible, and no other overlay is believed to be above it.
    pub fn is_top_most(&self) -> bool {
        self.visible && self.shown_over == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        let mut state = OverlayState::default();
        assert!(!state.is_visible());
        assert!(!state.hide());
        assert!(state.show());
        assert!(!state.show());
        assert!(state.is_top_most());
        assert!(state.hide());
        assert!(!state.is_visible());
        assert!(!state.is_top_most());
    }

    #[test]
    fn counts_only_while_visible() {
        let mut state = OverlayState::default();
        state.apply(PeerEvent::Shown);
        assert_eq!(state.shown_over(), 0);

        state.show();
        state.apply(PeerEvent::Shown);
        state.apply(PeerEvent::Shown);
        assert_eq!(state.shown_over(), 2);
        assert!(!state.is_top_most());
        state.apply(PeerEvent::Hidden);
        assert_eq!(state.shown_over(), 1);

        // A redundant show does not reset the count.
        state.show();
        assert_eq!(state.shown_over(), 1);

        state.apply(PeerEvent::Hidden);
        state.apply(PeerEvent::Hidden);
        assert_eq!(state.shown_over(), 0);
        assert!(state.is_top_most());
    }

    #[test]
    fn reset_on_show() {
        let mut state = OverlayState::default();
        state.show();
        state.apply(PeerEvent::Shown);
        state.hide();
        state.show();
        assert_eq!(state.shown_over(), 0);

        state.reset();
        assert!(!state.is_visible());
    }
}
