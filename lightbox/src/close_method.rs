// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use log::debug;
use serde::Deserialize;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;

/// One way of dismissing an overlay.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CloseMethod {
    /// A close button inserted at the top of the content.
    Button,
    /// Clicking inside the overlay but outside the content.
    OuterClick,
    /// Clicking inside the content.
    InnerClick,
    /// Pressing Escape while the overlay is top-most.
    EscapeKey,
}

impl CloseMethod {
    pub const ALL: [Self; 4] = [
        Self::Button,
        Self::OuterClick,
        Self::InnerClick,
        Self::EscapeKey,
    ];

    /// Canonical (lower case) name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::OuterClick => "outer-click",
            Self::InnerClick => "inner-click",
            Self::EscapeKey => "escape-key",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl FromStr for CloseMethod {
    type Err = ();

    /// Case insensitive. Also accepts the older `on*` spellings, e.g. `onescapekey`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "button" | "onbutton" => Self::Button,
            "outer-click" | "onouterclick" => Self::OuterClick,
            "inner-click" | "oninnerclick" => Self::InnerClick,
            "escape-key" | "onescapekey" => Self::EscapeKey,
            _ => return Err(()),
        })
    }
}

/// Where a click landed, relative to the content node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClickRegion {
    /// The content node or one of its descendants.
    Content,
    /// Anywhere else inside the wrapper (backdrop, spacer).
    Outside,
}

/// A set of [`CloseMethod`]s. Never empty when parsed from names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct CloseMethods(u8);

impl CloseMethods {
    /// No methods at all. Only reachable programmatically.
    pub const NONE: Self = Self(0);

    /// Used whenever no recognized method is configured.
    pub fn defaults() -> Self {
        [CloseMethod::Button, CloseMethod::EscapeKey]
            .into_iter()
            .collect()
    }

    /// Parses method names, ignoring unrecognized ones. Falls back to [`Self::defaults`] if
    /// nothing was recognized.
    pub fn parse<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ret = Self::NONE;
        for name in names {
            let name = name.as_ref();
            match CloseMethod::from_str(name) {
                Ok(method) => ret.insert(method),
                Err(()) => debug!("ignoring unknown close method {:?}", name),
            }
        }
        if ret.is_empty() {
            Self::defaults()
        } else {
            ret
        }
    }

    pub fn contains(self, method: CloseMethod) -> bool {
        self.0 & method.bit() != 0
    }

    pub fn insert(&mut self, method: CloseMethod) {
        self.0 |= method.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = CloseMethod> {
        CloseMethod::ALL
            .into_iter()
            .filter(move |&method| self.contains(method))
    }

    /// Whether a click in `region` should dismiss the overlay.
    pub fn closes_on_click(self, region: ClickRegion) -> bool {
        let outer = self.contains(CloseMethod::OuterClick);
        let inner = self.contains(CloseMethod::InnerClick);
        match region {
            _ if outer && inner => true,
            ClickRegion::Content => inner,
            ClickRegion::Outside => outer,
        }
    }

    /// Whether the wrapper needs a click listener at all.
    pub fn listens_for_clicks(self) -> bool {
        self.contains(CloseMethod::OuterClick) || self.contains(CloseMethod::InnerClick)
    }
}

impl Default for CloseMethods {
    fn default() -> Self {
        Self::defaults()
    }
}

impl FromIterator<CloseMethod> for CloseMethods {
    fn from_iter<T: IntoIterator<Item = CloseMethod>>(iter: T) -> Self {
        let mut ret = Self::NONE;
        for method in iter {
            ret.insert(method);
        }
        ret
    }
}

impl From<Vec<String>> for CloseMethods {
    fn from(names: Vec<String>) -> Self {
        Self::parse(names)
    }
}

impl Debug for CloseMethods {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(CloseMethod::name))
            .finish()
    }
}
