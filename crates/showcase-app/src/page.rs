// crates/showcase-app/src/page.rs
// Page bootstrap: mount every widget on DOM ready, tear down on page hide

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, PageTransitionEvent};

use crate::carousel::{self, CarouselHandle, MountOutcome};
use crate::config::{CONFIG_ELEMENT_ID, ShowcaseConfig};
use crate::dom::{self, Listener};
use crate::error::{Result, WidgetError};
use crate::slider::{self, SliderHandle};
use crate::{data, fragments, scroll};

/// Everything mounted on the page
struct Page {
    carousel: Option<CarouselHandle>,
    slider: Option<SliderHandle>,
    scroll: Option<Listener>,
}

impl Page {
    fn dispose(self) {
        if let Some(carousel) = self.carousel {
            log::debug!(
                "Disposing carousel: {} listeners, {} timers armed",
                carousel.listener_count(),
                carousel.armed_timers()
            );
            carousel.dispose();
        }
        if let Some(slider) = self.slider {
            slider.dispose();
        }
        drop(self.scroll);
        log::debug!("Showcase widgets torn down");
    }
}

/// Page config from the embedded JSON block. A malformed block yields the
/// defaults together with the parse error so the caller can log it once
/// logging is up.
pub fn load_config() -> (ShowcaseConfig, Option<WidgetError>) {
    let raw = dom::document()
        .ok()
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        None => (ShowcaseConfig::default(), None),
        Some(raw) => match ShowcaseConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(e) => (ShowcaseConfig::default(), Some(e)),
        },
    }
}

/// Mount now if the DOM is parsed, otherwise on DOMContentLoaded
pub fn boot(config: ShowcaseConfig) -> Result<()> {
    let document = dom::document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || mount_all(config));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| WidgetError::js(&e))?;
    } else {
        mount_all(config);
    }
    Ok(())
}

fn mount_all(config: ShowcaseConfig) {
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            log::error!("Cannot mount widgets: {}", e);
            return;
        }
    };

    fragments::load_all(&config.fragments);

    let scroll = if config.smooth_scroll {
        scroll::install(&document)
            .map_err(|e| log::warn!("Smooth scrolling disabled: {}", e))
            .ok()
    } else {
        None
    };

    let slider = slider::mount(&config.slider);

    let candidates = data::load_reviews(&document);
    let carousel = match carousel::mount(&config.carousel, &candidates) {
        MountOutcome::Live(handle) => Some(handle),
        MountOutcome::Degraded(_) => None,
    };

    let page = Rc::new(RefCell::new(Some(Page {
        carousel,
        slider,
        scroll,
    })));
    if let Err(e) = teardown_on_pagehide(page) {
        log::warn!("Widgets will not be torn down on unload: {}", e);
    }

    log::info!("Showcase widgets mounted");
}

// Pages kept in the back/forward cache stay mounted; timers are frozen there
fn teardown_on_pagehide(page: Rc<RefCell<Option<Page>>>) -> Result<()> {
    let window = dom::window()?;
    let on_hide = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        if persisted {
            return;
        }
        if let Some(page) = page.borrow_mut().take() {
            page.dispose();
        }
    });
    window
        .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())
        .map_err(|e| WidgetError::js(&e))?;
    on_hide.forget();
    Ok(())
}
