// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::close_method::{CloseMethod, CloseMethods};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Backdrop opacity unless configured otherwise.
pub const DEFAULT_OPACITY: f32 = 0.3;

/// Close button icon unless configured otherwise.
pub const DEFAULT_CLOSE_BUTTON_ICON_URL: &str = "icons/cancel.png";

/// Options of a single overlay, fixed at construction.
///
/// Deserializes from a (possibly partial) camelCase object, for example
/// `{"opacity": 0.5, "closeMethods": ["outer-click", "escape-key"]}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Opacity of the backdrop, between 0 and 1.
    #[serde(deserialize_with = "deserialize_opacity")]
    pub opacity: f32,
    pub close_methods: CloseMethods,
    /// Source of the close button image.
    #[serde(alias = "closeBtnSrc")]
    pub close_button_icon_url: String,
    /// Applied to the wrapper after (so overriding) its default style.
    pub extra_wrapper_style: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            close_methods: CloseMethods::defaults(),
            close_button_icon_url: DEFAULT_CLOSE_BUTTON_ICON_URL.to_owned(),
            extra_wrapper_style: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Replaces the close methods. An empty iterator means [`CloseMethods::defaults`].
    pub fn with_close_methods(mut self, methods: impl IntoIterator<Item = CloseMethod>) -> Self {
        let methods: CloseMethods = methods.into_iter().collect();
        self.close_methods = if methods.is_empty() {
            CloseMethods::defaults()
        } else {
            methods
        };
        self
    }

    pub fn with_close_button_icon_url(mut self, url: impl Into<String>) -> Self {
        self.close_button_icon_url = url.into();
        self
    }

    pub fn with_wrapper_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_wrapper_style.insert(property.into(), value.into());
        self
    }
}

/// Accepts both `0.3` and `"0.3"`.
fn deserialize_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CloseMethod::*;

    #[test]
    fn empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.opacity, 0.3);
        assert_eq!(config.close_button_icon_url, "icons/cancel.png");
        assert!(config.close_methods.contains(Button));
        assert!(config.close_methods.contains(EscapeKey));
        assert_eq!(config.close_methods.len(), 2);
    }

    #[test]
    fn full_object() {
        let config: Config = serde_json::from_str(
            r#"{
                "opacity": "0.5",
                "closeMethods": ["inner-click", "whatever"],
                "closeBtnSrc": "x.png",
                "extraWrapperStyle": {"background-color": "red"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.opacity, 0.5);
        assert_eq!(config.close_methods.iter().collect::<Vec<_>>(), vec![InnerClick]);
        assert_eq!(config.close_button_icon_url, "x.png");
        assert_eq!(
            config.extra_wrapper_style.get("background-color").map(String::as_str),
            Some("red")
        );
    }

    #[test]
    fn empty_close_methods() {
        let config: Config = serde_json::from_str(r#"{"closeMethods": []}"#).unwrap();
        assert_eq!(config.close_methods, CloseMethods::defaults());

        let config = Config::default().with_close_methods(Vec::<CloseMethod>::new());
        assert_eq!(config.close_methods, CloseMethods::defaults());
    }

    #[test]
    fn bad_opacity() {
        assert!(serde_json::from_str::<Config>(r#"{"opacity": "dim"}"#).is_err());
    }

    #[test]
    fn builder() {
        let config = Config::default()
            .with_opacity(0.8)
            .with_close_methods([OuterClick])
            .with_close_button_icon_url("close.svg")
            .with_wrapper_style("z-index", "5");
        assert_eq!(config.opacity, 0.8);
        assert!(!config.close_methods.contains(Button));
        assert!(config.close_methods.contains(OuterClick));
        assert_eq!(config.close_button_icon_url, "close.svg");
        assert_eq!(config.extra_wrapper_style.len(), 1);
    }
}
