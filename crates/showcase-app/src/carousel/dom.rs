// crates/showcase-app/src/carousel/dom.rs
// Browser binding: typed element handles, DOM view, gloo timers, listeners

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use showcase_types::{Review, ReviewInput, prepare_reviews};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, TouchEvent, Window};

use super::controller::{Carousel, Interaction};
use super::host::{CarouselView, EMPTY_MESSAGE, ERROR_MESSAGE, Scheduler, TimerSlot};
use crate::config::{CarouselConfig, CarouselSelectors};
use crate::dom::{self, Listener, query_document, query_in, set_visible};
use crate::error::{Result, WidgetError};
use crate::listeners::ListenerSet;

type BrowserCarousel = Carousel<DomCarouselView, BrowserScheduler>;

// ============================================================================
// Element handles
// ============================================================================

/// Every region the carousel needs, resolved once at mount
#[derive(Clone)]
struct CarouselElements {
    mount: HtmlElement,
    quote: HtmlElement,
    author: HtmlElement,
    context: HtmlElement,
    nav: HtmlElement,
    prev: HtmlElement,
    next: HtmlElement,
    dots: HtmlElement,
}

impl CarouselElements {
    fn resolve(document: &Document, selectors: &CarouselSelectors) -> Result<Self> {
        let mount = query_document(document, &selectors.mount)?;
        Ok(Self {
            quote: query_in(&mount, &selectors.quote)?,
            author: query_in(&mount, &selectors.author)?,
            context: query_in(&mount, &selectors.context)?,
            nav: query_in(&mount, &selectors.nav)?,
            prev: query_in(&mount, &selectors.prev)?,
            next: query_in(&mount, &selectors.next)?,
            dots: query_in(&mount, &selectors.dots)?,
            mount,
        })
    }
}

/// Show the error placeholder with whatever parts of the markup exist
fn render_unavailable(document: &Document, selectors: &CarouselSelectors) {
    let Ok(mount) = query_document(document, &selectors.mount) else {
        return;
    };
    let _ = mount.class_list().add_1("has-error");

    for selector in [&selectors.nav, &selectors.dots] {
        if let Ok(el) = query_in(&mount, selector) {
            set_visible(&el, false);
        }
    }

    match query_in(&mount, &selectors.quote) {
        Ok(quote) => quote.set_text_content(Some(ERROR_MESSAGE)),
        Err(_) => match document.create_element("p") {
            Ok(p) => {
                p.set_class_name("carousel-error");
                p.set_text_content(Some(ERROR_MESSAGE));
                mount.set_text_content(None);
                let _ = mount.append_child(&p);
            }
            Err(e) => log::warn!("Failed to create error placeholder: {:?}", e),
        },
    }
}

// ============================================================================
// DomCarouselView
// ============================================================================

pub struct DomCarouselView {
    document: Document,
    elements: CarouselElements,
    dots: Vec<HtmlElement>,
}

impl DomCarouselView {
    fn new(document: Document, elements: CarouselElements) -> Self {
        Self {
            document,
            elements,
            dots: Vec::new(),
        }
    }

    fn set_context(&self, context: Option<&str>) {
        let el = &self.elements.context;
        el.set_text_content(context);
        set_visible(el, context.is_some());
    }

    fn create_dot(&self, index: usize, count: usize) -> Result<HtmlElement> {
        let dot = self
            .document
            .create_element("button")
            .map_err(|e| WidgetError::js(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WidgetError::Render("indicator is not an HTML element".to_string()))?;
        dot.set_class_name("carousel-dot");
        dot.set_attribute("type", "button").map_err(|e| WidgetError::js(&e))?;
        dot.set_attribute("data-index", &index.to_string())
            .map_err(|e| WidgetError::js(&e))?;
        dot.set_attribute("aria-label", &format!("Show review {} of {}", index + 1, count))
            .map_err(|e| WidgetError::js(&e))?;
        Ok(dot)
    }
}

impl CarouselView for DomCarouselView {
    fn show_review(&mut self, review: &Review, index: usize, total: usize) -> Result<()> {
        let el = &self.elements;
        el.quote.set_text_content(Some(&review.quote));
        el.author.set_text_content(Some(&review.author));
        self.set_context(review.context.as_deref());

        el.mount
            .set_attribute("data-review-id", &review.id)
            .map_err(|e| WidgetError::js(&e))?;
        el.mount
            .set_attribute("aria-label", &format!("Review {} of {}", index + 1, total))
            .map_err(|e| WidgetError::js(&e))?;
        let _ = el.mount.class_list().remove_2("is-empty", "has-error");
        Ok(())
    }

    fn show_empty(&mut self) {
        self.elements.quote.set_text_content(Some(EMPTY_MESSAGE));
        self.elements.author.set_text_content(None);
        self.set_context(None);
        let _ = self.elements.mount.class_list().add_1("is-empty");
    }

    fn show_error(&mut self, message: &str) {
        self.elements.quote.set_text_content(Some(message));
        self.elements.author.set_text_content(None);
        self.set_context(None);
        let _ = self.elements.mount.class_list().add_1("has-error");
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        set_visible(&self.elements.nav, visible);
        set_visible(&self.elements.dots, visible);
    }

    fn build_indicators(&mut self, count: usize) -> Result<()> {
        self.elements.dots.set_text_content(None);
        self.dots.clear();
        for index in 0..count {
            let dot = self.create_dot(index, count)?;
            self.elements
                .dots
                .append_child(&dot)
                .map_err(|e| WidgetError::js(&e))?;
            self.dots.push(dot);
        }
        Ok(())
    }

    fn set_active_indicator(&mut self, index: usize) {
        for (i, dot) in self.dots.iter().enumerate() {
            let active = i == index;
            let _ = dot.class_list().toggle_with_force("active", active);
            let _ = dot.set_attribute("aria-current", if active { "true" } else { "false" });
        }
    }
}

// ============================================================================
// BrowserScheduler
// ============================================================================

type TimerSink = Rc<dyn Fn(TimerSlot)>;

enum ArmedTimer {
    Interval(Interval),
    Timeout(Timeout),
    Frame {
        id: i32,
        _callback: Closure<dyn FnMut(f64)>,
    },
}

/// gloo-timers and requestAnimationFrame behind the `Scheduler` seam.
/// Dropping an entry cancels it.
pub struct BrowserScheduler {
    window: Window,
    sink: TimerSink,
    armed: HashMap<TimerSlot, ArmedTimer>,
}

impl BrowserScheduler {
    fn new(window: Window, sink: TimerSink) -> Self {
        Self {
            window,
            sink,
            armed: HashMap::new(),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn set_interval(&mut self, slot: TimerSlot, millis: u32) {
        self.cancel(slot);
        let sink = self.sink.clone();
        let interval = Interval::new(millis, move || sink(slot));
        self.armed.insert(slot, ArmedTimer::Interval(interval));
    }

    fn set_timeout(&mut self, slot: TimerSlot, millis: u32) {
        self.cancel(slot);
        let sink = self.sink.clone();
        let timeout = Timeout::new(millis, move || sink(slot));
        self.armed.insert(slot, ArmedTimer::Timeout(timeout));
    }

    fn request_frame(&mut self, slot: TimerSlot) {
        self.cancel(slot);
        let sink = self.sink.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| sink(slot));
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.armed.insert(
                    slot,
                    ArmedTimer::Frame {
                        id,
                        _callback: callback,
                    },
                );
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed ({:?}), using a timeout", e);
                self.set_timeout(slot, 16);
            }
        }
    }

    fn cancel(&mut self, slot: TimerSlot) {
        if let Some(ArmedTimer::Frame { id, .. }) = self.armed.remove(&slot) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn fired(&mut self, slot: TimerSlot) {
        if !matches!(self.armed.get(&slot), Some(ArmedTimer::Interval(_))) {
            self.armed.remove(&slot);
        }
    }

    fn is_armed(&self, slot: TimerSlot) -> bool {
        self.armed.contains_key(&slot)
    }
}

/// Route timer callbacks back into the controller without keeping it alive
fn timer_sink(carousel: Weak<RefCell<BrowserCarousel>>) -> TimerSink {
    Rc::new(move |slot| {
        let Some(carousel) = carousel.upgrade() else {
            return;
        };
        match carousel.try_borrow_mut() {
            Ok(mut c) => c.on_timer(slot),
            Err(_) => log::warn!("Carousel busy, dropping {:?} callback", slot),
        };
    })
}

// ============================================================================
// Mounting
// ============================================================================

/// Result of mounting the carousel. Mounting never fails outright.
pub enum MountOutcome {
    Live(CarouselHandle),
    /// Markup was missing or unusable; the error placeholder is showing
    Degraded(WidgetError),
}

/// Owns the controller and every listener it registered
pub struct CarouselHandle {
    carousel: Rc<RefCell<BrowserCarousel>>,
    listeners: ListenerSet<Listener>,
}

impl CarouselHandle {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn armed_timers(&self) -> usize {
        self.carousel
            .try_borrow()
            .map(|c| c.scheduler().armed_count())
            .unwrap_or(0)
    }

    /// Detach listeners and cancel timers. Dropping the handle does the same.
    pub fn dispose(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let detached = self.listeners.detach_all();
        if detached > 0 {
            log::debug!("Review carousel detached {} listeners", detached);
        }
        match self.carousel.try_borrow_mut() {
            Ok(mut c) => c.dispose(),
            Err(_) => log::warn!("Carousel busy during teardown"),
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount the review carousel described by `config`
pub fn mount(config: &CarouselConfig, candidates: &[ReviewInput]) -> MountOutcome {
    match try_mount(config, candidates) {
        Ok(handle) => MountOutcome::Live(handle),
        Err(e) => {
            log::error!("Review carousel unavailable: {}", e);
            if let Ok(document) = dom::document() {
                render_unavailable(&document, &config.selectors);
            }
            MountOutcome::Degraded(e)
        }
    }
}

fn try_mount(config: &CarouselConfig, candidates: &[ReviewInput]) -> Result<CarouselHandle> {
    let window = dom::window()?;
    let document = window.document().ok_or(WidgetError::NoDocument)?;
    let elements = CarouselElements::resolve(&document, &config.selectors)?;

    let reviews = prepare_reviews(candidates, config.max_quote_chars);
    log::info!(
        "Review carousel: {} featured of {} candidates",
        reviews.len(),
        candidates.len()
    );

    let view = DomCarouselView::new(document.clone(), elements.clone());
    let carousel = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserCarousel>>| {
        let scheduler = BrowserScheduler::new(window.clone(), timer_sink(weak.clone()));
        RefCell::new(Carousel::new(reviews, config.clone(), view, scheduler))
    });

    {
        let mut c = carousel.borrow_mut();
        if let Some(width) = viewport_width(&window) {
            c.viewport_resized(width);
        }
        c.set_page_hidden(document.hidden());
        c.init();
    }

    let listeners = wire_listeners(&window, &document, &elements, &carousel, config)?;
    log::debug!("Review carousel attached {} listeners", listeners.len());

    Ok(CarouselHandle {
        carousel,
        listeners: ListenerSet::from(listeners),
    })
}

fn viewport_width(window: &Window) -> Option<f64> {
    window.inner_width().ok().and_then(|w| w.as_f64())
}

fn first_touch(event: &Event, changed: bool) -> Option<(f64, f64)> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    let list = if changed {
        touch_event.changed_touches()
    } else {
        touch_event.touches()
    };
    let touch = list.get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Run `f` against the controller if it is still alive and not borrowed
fn with_carousel<R>(
    carousel: &Weak<RefCell<BrowserCarousel>>,
    f: impl FnOnce(&mut BrowserCarousel) -> R,
) -> Option<R> {
    let carousel = carousel.upgrade()?;
    let mut c = carousel.try_borrow_mut().ok()?;
    Some(f(&mut c))
}

fn wire_listeners(
    window: &Window,
    document: &Document,
    elements: &CarouselElements,
    carousel: &Rc<RefCell<BrowserCarousel>>,
    config: &CarouselConfig,
) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    let mount = &elements.mount;

    // Prev / next buttons
    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(&elements.prev, "click", move |_| {
        with_carousel(&weak, |c| c.click_previous());
    })?);

    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(&elements.next, "click", move |_| {
        with_carousel(&weak, |c| c.click_next());
    })?);

    // Dots are rebuilt freely, so one delegated listener serves all of them
    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(&elements.dots, "click", move |event: Event| {
        let index = dom::event_target_closest(&event, "[data-index]")
            .and_then(|dot| dot.get_attribute("data-index"))
            .and_then(|raw| raw.parse::<usize>().ok());
        if let Some(index) = index {
            with_carousel(&weak, |c| c.click_indicator(index));
        }
    })?);

    // Keyboard
    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(mount, "keydown", move |event: Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = key_event.key();
        if with_carousel(&weak, |c| c.key_pressed(&key)).unwrap_or(false) {
            event.prevent_default();
        }
    })?);

    // Pointer hover
    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(mount, "mouseenter", move |_| {
        with_carousel(&weak, |c| c.interact(Interaction::PointerEnter));
    })?);

    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(mount, "mouseleave", move |_| {
        with_carousel(&weak, |c| c.interact(Interaction::PointerLeave));
    })?);

    // Touch
    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach_passive(mount, "touchstart", move |event: Event| {
        if let Some((x, y)) = first_touch(&event, false) {
            with_carousel(&weak, |c| c.touch_start(x, y));
        }
    })?);

    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach(mount, "touchmove", move |event: Event| {
        let Some((x, y)) = first_touch(&event, false) else {
            return;
        };
        if with_carousel(&weak, |c| c.touch_move(x, y)).unwrap_or(false) {
            event.prevent_default();
        }
    })?);

    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach_passive(mount, "touchend", move |event: Event| {
        with_carousel(&weak, |c| match first_touch(&event, true) {
            Some((x, y)) => {
                c.touch_end(x, y);
            }
            None => c.touch_cancel(),
        });
    })?);

    let weak = Rc::downgrade(carousel);
    listeners.push(Listener::attach_passive(mount, "touchcancel", move |_| {
        with_carousel(&weak, |c| c.touch_cancel());
    })?);

    // Viewport size picks the tick period
    let weak = Rc::downgrade(carousel);
    let resize_window = window.clone();
    listeners.push(Listener::attach_passive(window, "resize", move |_| {
        if let Some(width) = viewport_width(&resize_window) {
            with_carousel(&weak, |c| c.viewport_resized(width));
        }
    })?);

    // Page visibility
    let weak = Rc::downgrade(carousel);
    let visibility_document = document.clone();
    listeners.push(Listener::attach(document, "visibilitychange", move |_| {
        let hidden = visibility_document.hidden();
        with_carousel(&weak, |c| c.set_page_hidden(hidden));
    })?);

    // Page-wide activity
    for event in &config.activity_events {
        let weak = Rc::downgrade(carousel);
        listeners.push(Listener::attach_passive(window, event, move |_| {
            with_carousel(&weak, |c| c.interact(Interaction::PageActivity));
        })?);
    }

    Ok(listeners)
}
