// crates/showcase-app/src/slider.rs
// Before/after image comparison slider

use crate::config::SliderConfig;

/// Horizontal reveal percentage for a pointer at `pointer_x`, clamped to 0..=100
pub fn reveal_percentage(pointer_x: f64, left: f64, width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 {
        return 50.0;
    }
    (((pointer_x - left) / width) * 100.0).clamp(0.0, 100.0)
}

/// Clip path that shows the after image right of `percentage`
pub fn clip_path(percentage: f64) -> String {
    format!(
        "polygon({p}% 0%, 100% 0%, 100% 100%, {p}% 100%)",
        p = percentage
    )
}

/// Back-and-forth sweep shown once after page load
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSweep {
    position: f64,
    direction: f64,
    step: f64,
    min: f64,
    max: f64,
}

impl DemoSweep {
    pub fn new(config: &SliderConfig) -> Self {
        Self {
            position: 50.0,
            direction: 1.0,
            step: config.demo_step,
            min: config.demo_min,
            max: config.demo_max,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Move one step, reversing at either bound. Returns the new position.
    pub fn step(&mut self) -> f64 {
        self.position += self.direction * self.step;
        if self.position >= self.max || self.position <= self.min {
            self.direction = -self.direction;
        }
        self.position
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{SliderHandle, mount};

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use gloo_timers::callback::{Interval, Timeout};
    use wasm_bindgen::JsCast;
    use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

    use super::{DemoSweep, clip_path, reveal_percentage};
    use crate::config::SliderConfig;
    use crate::dom::{self, Listener, query_document};
    use crate::error::Result;
    use crate::listeners::ListenerSet;

    struct SliderElements {
        container: HtmlElement,
        after_image: HtmlElement,
        handle: HtmlElement,
    }

    impl SliderElements {
        fn apply_pointer(&self, pointer_x: f64) {
            let rect = self.container.get_bounding_client_rect();
            self.apply(reveal_percentage(pointer_x, rect.left(), rect.width()));
        }

        fn apply(&self, percentage: f64) {
            let _ = self
                .after_image
                .style()
                .set_property("clip-path", &clip_path(percentage));
            let _ = self
                .handle
                .style()
                .set_property("left", &format!("{}%", percentage));
        }
    }

    #[derive(Default)]
    struct DemoTimers {
        start: Option<Timeout>,
        tick: Option<Interval>,
        stop: Option<Timeout>,
    }

    struct SliderState {
        elements: SliderElements,
        config: SliderConfig,
        sliding: bool,
        demo: DemoTimers,
    }

    impl SliderState {
        fn stop_demo(&mut self) {
            if self.demo.start.is_some() || self.demo.tick.is_some() {
                log::debug!("Slider demo stopped");
            }
            self.demo = DemoTimers::default();
        }
    }

    /// Owns the slider state, its listeners and demo timers
    pub struct SliderHandle {
        state: Rc<RefCell<SliderState>>,
        listeners: ListenerSet<Listener>,
    }

    impl SliderHandle {
        pub fn dispose(mut self) {
            self.teardown();
        }

        fn teardown(&mut self) {
            self.listeners.detach_all();
            if let Ok(mut state) = self.state.try_borrow_mut() {
                state.stop_demo();
            }
        }
    }

    impl Drop for SliderHandle {
        fn drop(&mut self) {
            self.teardown();
        }
    }

    /// Mount the slider; `None` when the page has no slider markup
    pub fn mount(config: &SliderConfig) -> Option<SliderHandle> {
        let document = dom::document().ok()?;
        let elements = match resolve(&document, config) {
            Ok(elements) => elements,
            Err(e) => {
                log::debug!("No before/after slider on this page: {}", e);
                return None;
            }
        };

        let state = Rc::new(RefCell::new(SliderState {
            elements,
            config: config.clone(),
            sliding: false,
            demo: DemoTimers::default(),
        }));

        let listeners = match wire_listeners(&document, &state) {
            Ok(listeners) => listeners,
            Err(e) => {
                log::error!("Failed to wire slider: {}", e);
                return None;
            }
        };

        if config.demo_enabled {
            schedule_demo(&state);
        }

        Some(SliderHandle {
            state,
            listeners: ListenerSet::from(listeners),
        })
    }

    fn resolve(document: &web_sys::Document, config: &SliderConfig) -> Result<SliderElements> {
        Ok(SliderElements {
            container: query_document(document, &config.container)?,
            after_image: query_document(document, &config.after_image)?,
            handle: query_document(document, &config.handle)?,
        })
    }

    fn with_state(state: &Weak<RefCell<SliderState>>, f: impl FnOnce(&mut SliderState)) {
        if let Some(state) = state.upgrade() {
            if let Ok(mut s) = state.try_borrow_mut() {
                f(&mut s);
            }
        }
    }

    fn schedule_demo(state: &Rc<RefCell<SliderState>>) {
        let delay = state.borrow().config.demo_delay_ms;
        let weak = Rc::downgrade(state);
        let start = Timeout::new(delay, move || {
            if let Some(state) = weak.upgrade() {
                start_demo(&state);
            }
        });
        state.borrow_mut().demo.start = Some(start);
    }

    fn start_demo(state: &Rc<RefCell<SliderState>>) {
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        let (step_ms, duration_ms) = (s.config.demo_step_ms, s.config.demo_duration_ms);
        let mut sweep = DemoSweep::new(&s.config);

        let weak = Rc::downgrade(state);
        let tick = Interval::new(step_ms, move || {
            let position = sweep.step();
            with_state(&weak, |s| s.elements.apply(position));
        });

        let weak = Rc::downgrade(state);
        let stop = Timeout::new(duration_ms, move || {
            with_state(&weak, |s| s.stop_demo());
        });

        s.demo.start = None;
        s.demo.tick = Some(tick);
        s.demo.stop = Some(stop);
        log::debug!("Slider demo running for {}ms", duration_ms);
    }

    fn mouse_x(event: &Event) -> Option<f64> {
        event.dyn_ref::<MouseEvent>().map(|e| f64::from(e.client_x()))
    }

    fn touch_x(event: &Event) -> Option<f64> {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(f64::from(touch.client_x()))
    }

    fn wire_listeners(
        document: &web_sys::Document,
        state: &Rc<RefCell<SliderState>>,
    ) -> Result<Vec<Listener>> {
        let (container, handle) = {
            let s = state.borrow();
            (s.elements.container.clone(), s.elements.handle.clone())
        };
        let mut listeners = Vec::new();

        // Dragging the handle
        let weak = Rc::downgrade(state);
        listeners.push(Listener::attach(&handle, "mousedown", move |event: Event| {
            event.prevent_default();
            with_state(&weak, |s| s.sliding = true);
        })?);

        let weak = Rc::downgrade(state);
        listeners.push(Listener::attach(&handle, "touchstart", move |event: Event| {
            event.prevent_default();
            with_state(&weak, |s| s.sliding = true);
        })?);

        let weak = Rc::downgrade(state);
        listeners.push(Listener::attach_passive(document, "mousemove", move |event: Event| {
            if let Some(x) = mouse_x(&event) {
                with_state(&weak, |s| {
                    if s.sliding {
                        s.elements.apply_pointer(x);
                    }
                });
            }
        })?);

        let weak = Rc::downgrade(state);
        listeners.push(Listener::attach_passive(document, "touchmove", move |event: Event| {
            if let Some(x) = touch_x(&event) {
                with_state(&weak, |s| {
                    if s.sliding {
                        s.elements.apply_pointer(x);
                    }
                });
            }
        })?);

        for event in ["mouseup", "touchend"] {
            let weak = Rc::downgrade(state);
            listeners.push(Listener::attach_passive(document, event, move |_| {
                with_state(&weak, |s| s.sliding = false);
            })?);
        }

        // Click anywhere on the slider
        let weak = Rc::downgrade(state);
        listeners.push(Listener::attach(&container, "click", move |event: Event| {
            if let Some(x) = mouse_x(&event) {
                with_state(&weak, |s| {
                    if !s.sliding {
                        s.elements.apply_pointer(x);
                    }
                });
            }
        })?);

        // Any direct interaction ends the demo
        for event in ["mousedown", "touchstart"] {
            let weak = Rc::downgrade(state);
            listeners.push(Listener::attach_passive(&container, event, move |_| {
                with_state(&weak, |s| s.stop_demo());
            })?);
        }

        Ok(listeners)
    }
}
