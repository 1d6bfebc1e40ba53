// crates/showcase-app/src/dom.rs
// Browser helpers: element lookup, visibility, listener bookkeeping

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{Result, WidgetError};
use crate::listeners::Detach;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(WidgetError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(WidgetError::NoDocument)
}

/// Resolve `selector` against the whole document
pub fn query_document(document: &Document, selector: &str) -> Result<HtmlElement> {
    document
        .query_selector(selector)
        .map_err(|_| WidgetError::InvalidSelector(selector.to_string()))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| WidgetError::MissingElement(selector.to_string()))
}

/// Resolve `selector` inside `parent`
pub fn query_in(parent: &Element, selector: &str) -> Result<HtmlElement> {
    parent
        .query_selector(selector)
        .map_err(|_| WidgetError::InvalidSelector(selector.to_string()))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| WidgetError::MissingElement(selector.to_string()))
}

pub fn set_visible(element: &HtmlElement, visible: bool) {
    let style = element.style();
    let result = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle visibility: {:?}", e);
    }
}

/// Closest ancestor-or-self of the event target matching `selector`
pub fn event_target_closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

/// Registered event listener. Detaching or dropping it removes the listener.
pub struct Listener {
    target: EventTarget,
    event: String,
    callback: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl Listener {
    pub fn attach<F>(target: &EventTarget, event: &str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| WidgetError::js(&e))?;
        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            callback,
            attached: true,
        })
    }

    /// Attach as a passive listener; the handler must not call `prevent_default`
    pub fn attach_passive<F>(target: &EventTarget, event: &str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| WidgetError::js(&e))?;
        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            callback,
            attached: true,
        })
    }
}

impl Detach for Listener {
    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.callback.as_ref().unchecked_ref());
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}
