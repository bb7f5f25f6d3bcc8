// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Lightbox
//!
//! Shows one element of a page above a dimmed backdrop, dismissable with a close button,
//! clicks, or the Escape key.
//!
//! Overlays sharing an [`OverlayBus`] tell each other when they are shown or hidden, so that
//! Escape only closes the top-most one.

pub mod apply;
pub mod bindings;
pub mod bus;
pub mod close_method;
pub mod config;
pub mod controller;
pub mod error;
pub mod id;
pub mod layout;
pub mod overlay;
pub mod state;
pub mod style;
pub mod target;

pub use bus::{BusEvent, OverlayBus, Subscription};
pub use close_method::{ClickRegion, CloseMethod, CloseMethods};
pub use config::Config;
pub use error::OverlayError;
pub use id::OverlayId;
pub use overlay::Overlay;
pub use target::Target;
