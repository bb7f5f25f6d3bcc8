// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::config::DEFAULT_OPACITY;
use crate::layout::px;
use log::warn;
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use web_sys::CssStyleDeclaration;

/// Ordered inline style properties (hyphenated CSS names). Setting a property twice keeps the
/// position of the first and the value of the last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    properties: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if let Some((_, existing)) = self.properties.iter_mut().find(|(p, _)| *p == property) {
            *existing = value;
        } else {
            self.properties.push((property, value));
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Writes every property to an element's inline style.
    pub fn apply(&self, style: &CssStyleDeclaration) -> Result<(), JsValue> {
        for (property, value) in self.iter() {
            style.set_property(property, value)?;
        }
        Ok(())
    }
}

/// Full-bleed container on top of everything else.
pub fn wrapper(extra: &BTreeMap<String, String>) -> InlineStyle {
    let mut style = InlineStyle::new()
        .with("position", "absolute")
        .with("top", "0px")
        .with("left", "0px")
        .with("width", "100%")
        .with("height", "100%")
        .with("z-index", "99999");
    for (property, value) in extra {
        style.set(property.as_str(), value.as_str());
    }
    style
}

/// The dimming layer, behind the content.
pub fn backdrop(opacity: f32) -> InlineStyle {
    let opacity = effective_opacity(opacity);
    InlineStyle::new()
        .with("z-index", "-1")
        .with("position", "fixed")
        .with("top", "0px")
        .with("left", "0px")
        .with("right", "0px")
        .with("bottom", "0px")
        .with("width", "100%")
        .with("height", "100%")
        .with("background-color", "#888")
        .with("opacity", opacity.to_string())
        // Old IE.
        .with(
            "filter",
            format!("alpha(opacity = {})", (opacity * 100.0).round()),
        )
}

/// Pushes the content down. Height is recomputed on every show.
pub fn spacer() -> InlineStyle {
    InlineStyle::new()
        .with("width", "100%")
        .with("height", "50%")
}

pub fn close_button(margin_top: f64, margin_right: f64) -> InlineStyle {
    InlineStyle::new()
        .with("float", "right")
        .with("margin", "2px")
        .with("margin-top", px(margin_top))
        .with("margin-right", px(margin_right))
        .with("font-weight", "bold")
        .with("padding", "0px")
        .with("cursor", "pointer")
}

/// Opacity clamped to `0..=1`.
pub fn effective_opacity(opacity: f32) -> f32 {
    if !opacity.is_finite() {
        warn!("opacity {} is not finite, using {}", opacity, DEFAULT_OPACITY);
        DEFAULT_OPACITY
    } else if !(0.0..=1.0).contains(&opacity) {
        let clamped = opacity.clamp(0.0, 1.0);
        warn!("opacity {} is out of range, using {}", opacity, clamped);
        clamped
    } else {
        opacity
    }
}
