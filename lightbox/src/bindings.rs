// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::config::Config;
use crate::error::OverlayError;
use crate::overlay::Overlay;
use crate::target::Target;
use log::{warn, LevelFilter};
use std::str::FromStr;
use wasm_bindgen::prelude::*;

/// Installs the panic hook and routes logs to the console. `level` is e.g. `"debug"`, and
/// defaults to `"warn"`.
#[wasm_bindgen(js_name = "initLightbox")]
pub fn init(level: Option<String>) {
    console_error_panic_hook::set_once();
    let filter = level
        .as_deref()
        .map(LevelFilter::from_str)
        .and_then(Result::ok)
        .unwrap_or(LevelFilter::Warn);
    js_hooks::init_logger(filter);
}

/// JavaScript handle to an [`Overlay`].
///
/// ```js
/// const box = new Lightbox("#content", {closeMethods: ["outer-click", "escape-key"]});
/// box.onHide(() => console.log("closed"));
/// box.show();
/// ```
#[wasm_bindgen(js_name = "Lightbox")]
pub struct JsLightbox {
    overlay: Option<Overlay>,
}

#[wasm_bindgen(js_class = "Lightbox")]
impl JsLightbox {
    #[wasm_bindgen(constructor)]
    pub fn new(target: JsValue, options: JsValue) -> Result<JsLightbox, JsValue> {
        let target = Target::from_js(target)?;
        let config = if options.is_undefined() || options.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| OverlayError::InvalidOptions(e.to_string()))?
        };
        Ok(Self {
            overlay: Some(Overlay::new(target, config)?),
        })
    }

    pub fn show(&self) {
        if let Some(overlay) = &self.overlay {
            overlay.show();
        }
    }

    pub fn hide(&self) {
        if let Some(overlay) = &self.overlay {
            overlay.hide();
        }
    }

    #[wasm_bindgen(js_name = "isVisible")]
    pub fn is_visible(&self) -> bool {
        self.overlay.as_ref().map_or(false, Overlay::is_visible)
    }

    #[wasm_bindgen(js_name = "shownOver")]
    pub fn shown_over(&self) -> u32 {
        self.overlay.as_ref().map_or(0, Overlay::shown_over)
    }

    #[wasm_bindgen(js_name = "onShow")]
    pub fn on_show(&self, callback: js_sys::Function) {
        if let Some(overlay) = &self.overlay {
            overlay.set_on_show(move || call(&callback));
        }
    }

    #[wasm_bindgen(js_name = "onHide")]
    pub fn on_hide(&self, callback: js_sys::Function) {
        if let Some(overlay) = &self.overlay {
            overlay.set_on_hide(move || call(&callback));
        }
    }

    /// Restores the page. Further calls on this object do nothing.
    pub fn dispose(&mut self) -> Result<(), JsValue> {
        match self.overlay.take() {
            Some(overlay) => overlay.dispose().map_err(JsValue::from),
            None => Ok(()),
        }
    }
}

fn call(callback: &js_sys::Function) {
    if let Err(e) = callback.call0(&JsValue::NULL) {
        warn!(
            "lightbox callback threw: {}",
            js_hooks::error_message(&e).unwrap_or_default()
        );
    }
}
