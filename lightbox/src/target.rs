// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::OverlayError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// The content to show in an overlay.
#[derive(Clone, Debug)]
pub enum Target {
    Element(HtmlElement),
    /// An element id, or failing that, a CSS selector.
    Selector(String),
}

impl Target {
    /// Accepts a string or an `HTMLElement` from JavaScript.
    pub fn from_js(value: JsValue) -> Result<Self, OverlayError> {
        if let Some(selector) = value.as_string() {
            return Ok(Self::Selector(selector));
        }
        value
            .dyn_into::<HtmlElement>()
            .map(Self::Element)
            .map_err(|_| OverlayError::InvalidTarget)
    }

    pub fn resolve(self, document: &Document) -> Result<HtmlElement, OverlayError> {
        let selector = match self {
            Self::Element(element) => return Ok(element),
            Self::Selector(selector) => selector,
        };

        let element: Option<Element> = document.get_element_by_id(&selector).or_else(|| {
            // Invalid selectors throw, which is no different from not matching.
            document.query_selector(&selector).ok().flatten()
        });

        element
            .ok_or_else(|| OverlayError::NotFound(selector))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| OverlayError::InvalidTarget)
    }
}

impl From<HtmlElement> for Target {
    fn from(element: HtmlElement) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}
