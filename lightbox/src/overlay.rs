// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::bus::OverlayBus;
use crate::close_method::{ClickRegion, CloseMethod, CloseMethods};
use crate::config::Config;
use crate::controller::Controller;
use crate::error::OverlayError;
use crate::id::OverlayId;
use crate::layout::{close_button_margin, parse_px, px, spacer_height};
use crate::style::{self, InlineStyle};
use crate::target::Target;
use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, KeyboardEvent, Node};

type Callback = Rc<dyn Fn()>;

/// A lightbox: one element of the page shown centered above a dimmed backdrop.
///
/// The element is moved (not copied) into a wrapper that takes its place in the document:
///
/// ```text
/// wrapper
/// ├── backdrop
/// ├── spacer
/// └── content
/// ```
///
/// Dropping the overlay hides it and detaches its listeners, but leaves the wrapper in the
/// document; see [`Overlay::dispose`] to restore the page.
pub struct Overlay {
    inner: Rc<Inner>,
    _listeners: Vec<EventListener>,
}

struct Inner {
    controller: Controller,
    wrapper: HtmlElement,
    backdrop: HtmlElement,
    spacer: HtmlElement,
    content: HtmlElement,
    close_button: Option<HtmlInputElement>,
    on_show: RefCell<Option<Callback>>,
    on_hide: RefCell<Option<Callback>>,
}

impl Overlay {
    /// Wraps `target` in a hidden overlay, coordinated with every other overlay on the page.
    pub fn new(target: impl Into<Target>, config: Config) -> Result<Self, OverlayError> {
        Self::with_bus(target, config, &OverlayBus::global())
    }

    /// Like [`Overlay::new`] but only coordinated with overlays sharing `bus`.
    pub fn with_bus(
        target: impl Into<Target>,
        config: Config,
        bus: &OverlayBus,
    ) -> Result<Self, OverlayError> {
        let document = js_hooks::document()?;
        let content = target.into().resolve(&document)?;
        let methods = config.close_methods;

        let wrapper = create_element(
            &document,
            "div",
            &style::wrapper(&config.extra_wrapper_style),
        )?;
        let backdrop = create_element(&document, "div", &style::backdrop(config.opacity))?;
        let spacer = create_element(&document, "div", &style::spacer())?;

        let close_button = if methods.contains(CloseMethod::Button) {
            let button = create_close_button(&document, &content, &config.close_button_icon_url)?;
            content.insert_before(&button, content.first_child().as_ref())?;
            Some(button)
        } else {
            None
        };

        content.blur()?;
        if let Some(parent) = content.parent_node() {
            parent.replace_child(&wrapper, &content)?;
        } else {
            debug!("content is detached, wrapper must be mounted by the caller");
        }
        wrapper.append_child(&backdrop)?;
        wrapper.append_child(&spacer)?;
        wrapper.append_child(&content)?;
        wrapper.style().set_property("display", "none")?;

        let inner = Rc::new(Inner {
            controller: Controller::new(bus, methods),
            wrapper,
            backdrop,
            spacer,
            content,
            close_button,
            on_show: RefCell::new(None),
            on_hide: RefCell::new(None),
        });
        let listeners = Inner::listen(&inner, &document, methods);

        debug!(
            "overlay {} created with close methods {:?}",
            inner.controller.id(),
            methods
        );

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    /// Shows the overlay, re-centering the content. Does nothing if already visible.
    pub fn show(&self) {
        self.inner.show();
    }

    /// Hides the overlay and removes focus from its content. Does nothing if already hidden.
    pub fn hide(&self) {
        self.inner.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.inner.controller.is_visible()
    }

    /// How many other overlays were shown on top of this one (only tracked if Escape
    /// dismissal is enabled).
    pub fn shown_over(&self) -> u32 {
        self.inner.controller.shown_over()
    }

    pub fn id(&self) -> OverlayId {
        self.inner.controller.id()
    }

    pub fn close_methods(&self) -> CloseMethods {
        self.inner.controller.methods()
    }

    /// The outermost element, which took the content's place in the document.
    pub fn wrapper(&self) -> &HtmlElement {
        &self.inner.wrapper
    }

    pub fn content(&self) -> &HtmlElement {
        &self.inner.content
    }

    /// Called after every transition to visible.
    pub fn set_on_show(&self, callback: impl Fn() + 'static) {
        *self.inner.on_show.borrow_mut() = Some(Rc::new(callback));
    }

    /// Called after every transition to hidden.
    pub fn set_on_hide(&self, callback: impl Fn() + 'static) {
        *self.inner.on_hide.borrow_mut() = Some(Rc::new(callback));
    }

    /// Hides the overlay, then puts the content back where the wrapper is and removes
    /// everything the overlay added.
    pub fn dispose(self) -> Result<(), OverlayError> {
        self.hide();
        let inner = &self.inner;
        if let Some(button) = &inner.close_button {
            button.remove();
        }
        if let Some(parent) = inner.wrapper.parent_node() {
            parent.replace_child(&inner.content, &inner.wrapper)?;
        } else {
            inner.content.remove();
        }
        debug!("overlay {} disposed", inner.controller.id());
        Ok(())
    }
}

impl Inner {
    fn listen(this: &Rc<Self>, document: &Document, methods: CloseMethods) -> Vec<EventListener> {
        let mut listeners = Vec::new();

        if let Some(button) = &this.close_button {
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(button, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.hide();
                }
            }));
        }

        if methods.listens_for_clicks() {
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(&this.wrapper, "click", move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_click(event);
                }
            }));
        }

        if methods.contains(CloseMethod::EscapeKey) {
            let weak: Weak<Self> = Rc::downgrade(this);
            listeners.push(EventListener::new_with_options(
                document,
                "keyup",
                // Non-passive, so that the overlay that handles Escape can claim the event.
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_key_up(event);
                    }
                },
            ));
        }

        listeners
    }

    fn on_click(&self, event: &Event) {
        let region = match event.target().and_then(|t| t.dyn_into::<Node>().ok()) {
            Some(node) if self.content.contains(Some(&node)) => ClickRegion::Content,
            _ => ClickRegion::Outside,
        };
        if self.controller.closes_on_click(region) {
            self.hide();
        }
    }

    fn on_key_up(&self, event: &Event) {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        // Another overlay already closed on this keystroke. Without this, hiding it could make
        // us top-most before our own listener runs.
        if event.default_prevented() {
            return;
        }
        if self.controller.closes_on_key(&event.key(), event.key_code()) {
            event.prevent_default();
            self.hide();
        }
    }

    fn show(&self) {
        if self.controller.is_visible() {
            return;
        }
        if let Err(e) = self.wrapper.style().remove_property("display") {
            // Still hidden, so stay consistent with the page.
            warn!("could not show overlay {}: {}", self.controller.id(), OverlayError::from(e));
            return;
        }
        if let Err(e) = self.center() {
            warn!("could not lay out overlay {}: {}", self.controller.id(), e);
        }
        self.controller.show();
        emit(&self.on_show);
    }

    fn center(&self) -> Result<(), OverlayError> {
        // Measured every time, since the viewport or content may have been resized.
        let viewport_height = js_hooks::viewport_height()?;
        let content_height = self.content.offset_height() as f64;
        self.backdrop
            .style()
            .set_property("height", &px(viewport_height))?;
        self.spacer.style().set_property(
            "height",
            &px(spacer_height(viewport_height, content_height)),
        )?;
        Ok(())
    }

    fn hide(&self) {
        if !self.controller.is_visible() {
            return;
        }
        if let Some(active) = js_hooks::active_element() {
            let node: &Node = &active;
            if self.content.contains(Some(node)) {
                if let Err(e) = active.blur() {
                    warn!("could not blur: {}", OverlayError::from(e));
                }
            }
        }
        if let Err(e) = self.wrapper.style().set_property("display", "none") {
            warn!("could not hide overlay {}: {}", self.controller.id(), OverlayError::from(e));
        }
        self.controller.hide();
        emit(&self.on_hide);
    }
}

impl Drop for Inner {
    /// Runs before `controller` is dropped, so the page and the peers agree that the overlay is
    /// gone.
    fn drop(&mut self) {
        self.hide();
    }
}

fn emit(slot: &RefCell<Option<Callback>>) {
    // Cloned so the callback may replace itself.
    let callback = slot.borrow().clone();
    if let Some(callback) = callback {
        callback();
    }
}

fn create_element(
    document: &Document,
    tag: &str,
    style: &InlineStyle,
) -> Result<HtmlElement, OverlayError> {
    let element = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| OverlayError::Dom(format!("<{}> is not an HTMLElement", tag)))?;
    style.apply(&element.style())?;
    Ok(element)
}

fn create_close_button(
    document: &Document,
    content: &HtmlElement,
    icon_url: &str,
) -> Result<HtmlInputElement, OverlayError> {
    let margin_top = close_button_margin(computed_padding(content, "top"));
    let margin_right = close_button_margin(computed_padding(content, "right"));
    let button = create_element(
        document,
        "input",
        &style::close_button(margin_top, margin_right),
    )?
    .dyn_into::<HtmlInputElement>()
    .map_err(|_| OverlayError::Dom("<input> is not an HTMLInputElement".to_owned()))?;
    button.set_type("image");
    button.set_src(icon_url);
    button.set_alt("X");
    Ok(button)
}

/// Computed padding of one side, in pixels. Zero if unknown, e.g. for a detached element.
fn computed_padding(element: &HtmlElement, side: &str) -> f64 {
    js_hooks::window()
        .ok()
        .and_then(|window| window.get_computed_style(element).ok().flatten())
        .and_then(|style| style.get_property_value(&format!("padding-{}", side)).ok())
        .map(|value| parse_px(&value))
        .unwrap_or(0.0)
}
