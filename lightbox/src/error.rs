// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why an overlay could not be created.
#[derive(Debug, Error, PartialEq)]
pub enum OverlayError {
    /// A selector matched no element.
    #[error("no element matches {0:?}")]
    NotFound(String),
    /// The target was neither a selector string nor an element.
    #[error("target must be a selector or an HTMLElement")]
    InvalidTarget,
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for OverlayError {
    fn from(value: JsValue) -> Self {
        Self::Dom(js_hooks::error_message(&value).unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<String> for OverlayError {
    fn from(message: String) -> Self {
        Self::Dom(message)
    }
}

impl From<OverlayError> for JsValue {
    fn from(error: OverlayError) -> Self {
        let js_error = js_sys::Error::new(&error.to_string());
        match error {
            OverlayError::NotFound(_) => js_error.set_name("NotFoundError"),
            OverlayError::InvalidTarget | OverlayError::InvalidOptions(_) => {
                js_error.set_name("TypeError")
            }
            OverlayError::Dom(_) => {}
        }
        js_error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            OverlayError::NotFound("#missing".to_owned()).to_string(),
            r##"no element matches "#missing""##
        );
        assert_eq!(
            OverlayError::from("no document".to_owned()),
            OverlayError::Dom("no document".to_owned())
        );
    }
}
