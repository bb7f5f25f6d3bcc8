// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(missing_docs)]
#![crate_name = "js_hooks"]

//! # Js Hooks
//!
//! [`js_hooks`][`crate`] is a collection of utilities for a WASM widget in a JavaScript environment.

use js_sys::Reflect;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

/// Gets the window.
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "no window".to_owned())
}

/// Gets the document.
pub fn document() -> Result<Document, String> {
    window()?
        .document()
        .ok_or_else(|| "no document".to_owned())
}

/// Height of the viewport in CSS pixels, including a horizontal scrollbar if any.
pub fn viewport_height() -> Result<f64, String> {
    window()?
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .ok_or_else(|| "no viewport height".to_owned())
}

/// Gets the element that currently has keyboard focus, if it is an HTML element.
pub fn active_element() -> Option<HtmlElement> {
    document()
        .ok()?
        .active_element()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Extracts an error message from a JavaScript error.
pub fn error_message(error: &JsValue) -> Option<String> {
    Reflect::get(error, &JsValue::from_str("message"))
        .as_ref()
        .ok()
        .and_then(JsValue::as_string)
        .or_else(|| error.as_string())
}

/// Log an error to JavaScript's console. Use this instead of [`eprintln!`].
#[macro_export]
macro_rules! console_error {
    ($($t:tt)*) => {
        $crate::error_args(&format_args!($($t)*))
    };
}

/// Log to JavaScript's console. Use this instead of [`println!`].
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::log_args(&format_args!($($t)*))
    };
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[doc(hidden)]
pub fn error_args(args: &fmt::Arguments) {
    error(&args.to_string())
}

#[doc(hidden)]
pub fn log_args(args: &fmt::Arguments) {
    log(&args.to_string())
}

/// A [`log`] backend that writes to JavaScript's console.
///
/// Warnings and errors go to `console.error`, everything else to `console.log`.
pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn => console_error!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
            _ => console_log!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs [`ConsoleLogger`] as the global logger. Only the first call has any effect on the
/// logger, but every call updates the level.
pub fn init_logger(level: LevelFilter) {
    // Fails if a logger was already set, which is fine.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
