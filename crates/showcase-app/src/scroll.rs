// crates/showcase-app/src/scroll.rs
// Smooth scrolling for in-page anchor links

/// Selector for an in-page link's target. `#` alone names nothing.
pub fn anchor_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

#[cfg(target_arch = "wasm32")]
pub use browser::install;

#[cfg(target_arch = "wasm32")]
mod browser {
    use web_sys::{Document, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

    use super::anchor_selector;
    use crate::dom::{Listener, event_target_closest};
    use crate::error::Result;

    /// One delegated listener covers anchors added after load too
    pub fn install(document: &Document) -> Result<Listener> {
        let lookup = document.clone();
        Listener::attach(document, "click", move |event: Event| {
            let Some(anchor) = event_target_closest(&event, "a[href^=\"#\"]") else {
                return;
            };
            event.prevent_default();

            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            match lookup.query_selector(selector) {
                Ok(Some(target)) => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
                Ok(None) => log::debug!("No element for anchor {}", selector),
                Err(_) => log::debug!("Anchor {} is not a valid selector", selector),
            }
        })
    }
}
