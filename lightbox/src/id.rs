// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::{self, Display, Formatter};
use std::num::NonZeroU32;

/// Identifies one overlay among those sharing an [`OverlayBus`][`crate::bus::OverlayBus`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OverlayId(pub NonZeroU32);

impl Display for OverlayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
