// crates/showcase-app/src/carousel/controller.rs
// Carousel controller: navigation, render lock, auto-rotation

use std::collections::BTreeSet;

use showcase_types::Review;

use super::host::{CarouselView, ERROR_MESSAGE, Scheduler, TimerSlot};
use super::swipe::{GestureAxis, Point, SwipeDirection, SwipeTracker};
use crate::config::CarouselConfig;
use crate::error::{Result, WidgetError};

/// Auto-rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Stopped,
    Running,
    PausedByUser,
}

/// Controller health. Anything but `Live` ignores navigation and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    /// A fault was contained; the error placeholder is showing
    Degraded,
    Disposed,
}

/// Signals that pause auto-rotation and re-arm the inactivity timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    PointerEnter,
    PointerLeave,
    TouchStart,
    TouchEnd,
    TouchCancel,
    NavigationClick,
    PageActivity,
}

/// Review carousel state machine.
///
/// Owns the featured reviews, the current position, the transition lock and
/// (through `S`) its three timer slots. The host forwards timer callbacks to
/// [`Carousel::on_timer`] and user input to the navigation/touch methods.
pub struct Carousel<V, S> {
    reviews: Vec<Review>,
    current: usize,
    last_good: Option<usize>,
    /// Indices whose last render failed; stepping skips them
    unrenderable: BTreeSet<usize>,
    rotation: Rotation,
    mode: Mode,
    interacting: bool,
    transitioning: bool,
    page_hidden: bool,
    interval_ms: u32,
    swipe: SwipeTracker,
    config: CarouselConfig,
    view: V,
    scheduler: S,
}

impl<V: CarouselView, S: Scheduler> Carousel<V, S> {
    pub fn new(reviews: Vec<Review>, config: CarouselConfig, view: V, scheduler: S) -> Self {
        let config = config.sanitized();
        let swipe = SwipeTracker::new(config.swipe_min_distance, config.swipe_lock_distance);
        Self {
            reviews,
            current: 0,
            last_good: None,
            unrenderable: BTreeSet::new(),
            rotation: Rotation::Stopped,
            mode: Mode::Live,
            interacting: false,
            transitioning: false,
            page_hidden: false,
            interval_ms: config.rotate_interval_ms,
            swipe,
            config,
            view,
            scheduler,
        }
    }

    /// First render and rotation start. Call once after construction.
    pub fn init(&mut self) {
        if self.mode != Mode::Live {
            return;
        }

        let total = self.reviews.len();
        if total == 0 {
            log::info!("Review carousel has no featured reviews");
            self.show_empty();
            return;
        }

        if let Err(e) = self.view.build_indicators(total) {
            log::warn!("Failed to build carousel indicators: {}", e);
        }
        self.view.set_navigation_visible(total > 1);
        self.render_or_recover();
        self.start_rotation();

        log::info!(
            "Review carousel ready: {} reviews, rotation {:?}",
            total,
            self.rotation
        );
    }

    // ═══════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_review(&self) -> Option<&Review> {
        self.reviews.get(self.current)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[cfg(test)]
    pub(crate) fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub(crate) fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ═══════════════════════════════════════
    // NAVIGATION
    // ═══════════════════════════════════════

    /// Advance circularly. Returns false when nothing moved.
    pub fn next(&mut self) -> bool {
        if !self.can_step() {
            return false;
        }
        match self.step_target(1) {
            Some(target) => {
                self.move_to(target);
                true
            }
            None => false,
        }
    }

    /// Step back circularly. Returns false when nothing moved.
    pub fn previous(&mut self) -> bool {
        if !self.can_step() {
            return false;
        }
        match self.step_target(self.reviews.len() - 1) {
            Some(target) => {
                self.move_to(target);
                true
            }
            None => false,
        }
    }

    /// Jump to `index`. Out of range or already current is a no-op.
    pub fn go_to(&mut self, index: usize) -> bool {
        let total = self.reviews.len();
        if self.mode != Mode::Live
            || self.transitioning
            || total == 0
            || index >= total
            || index == self.current
        {
            return false;
        }
        self.move_to(index);
        true
    }

    pub fn click_next(&mut self) -> bool {
        self.interact(Interaction::NavigationClick);
        self.next()
    }

    pub fn click_previous(&mut self) -> bool {
        self.interact(Interaction::NavigationClick);
        self.previous()
    }

    pub fn click_indicator(&mut self, index: usize) -> bool {
        self.interact(Interaction::NavigationClick);
        self.go_to(index)
    }

    /// Arrow keys navigate. Returns true when the key was handled.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.click_previous();
                true
            }
            "ArrowRight" => {
                self.click_next();
                true
            }
            _ => false,
        }
    }

    // Circular walk by `step`, passing over reviews that failed to render
    fn step_target(&self, step: usize) -> Option<usize> {
        let total = self.reviews.len();
        let mut index = self.current;
        for _ in 1..total {
            index = (index + step) % total;
            if !self.unrenderable.contains(&index) {
                return Some(index);
            }
        }
        None
    }

    fn can_step(&self) -> bool {
        self.mode == Mode::Live && !self.transitioning && self.reviews.len() > 1
    }

    // Any scheduled render is stale once the index changes
    fn move_to(&mut self, index: usize) {
        self.scheduler.cancel(TimerSlot::Render);
        log::debug!("Carousel {} -> {}", self.current, index);
        self.current = index;
        self.scheduler.request_frame(TimerSlot::Render);
    }

    // ═══════════════════════════════════════
    // RENDERING
    // ═══════════════════════════════════════

    /// Push the current review to the view in one update.
    ///
    /// Rejected with `RenderInProgress` while another render holds the lock.
    /// An out-of-range index is reset to 0 first.
    pub fn render_current(&mut self) -> Result<()> {
        if self.transitioning {
            return Err(WidgetError::RenderInProgress);
        }
        if self.mode != Mode::Live {
            return Ok(());
        }

        let total = self.reviews.len();
        if total == 0 {
            self.show_empty();
            return Ok(());
        }
        if self.current >= total {
            log::warn!("Carousel index {} out of range, resetting", self.current);
            self.current = 0;
        }

        self.transitioning = true;
        let result = self
            .view
            .show_review(&self.reviews[self.current], self.current, total);
        if result.is_ok() {
            self.view.set_active_indicator(self.current);
            self.last_good = Some(self.current);
            self.unrenderable.remove(&self.current);
        }
        self.transitioning = false;
        result
    }

    fn render_or_recover(&mut self) {
        match self.render_current() {
            Ok(()) => {}
            Err(WidgetError::RenderInProgress) => {
                log::debug!("Render already in progress, skipping");
            }
            Err(e) => {
                log::error!("Carousel render failed for review {}: {}", self.current, e);
                self.unrenderable.insert(self.current);
                match self.last_good.filter(|&good| good != self.current) {
                    Some(good) => {
                        self.current = good;
                        if let Err(e) = self.render_current() {
                            self.degrade(&e);
                        }
                    }
                    None => self.degrade(&e),
                }
            }
        }
    }

    fn show_empty(&mut self) {
        self.view.show_empty();
        self.view.set_navigation_visible(false);
    }

    fn degrade(&mut self, cause: &WidgetError) {
        log::error!("Review carousel degraded: {}", cause);
        self.scheduler.cancel_all();
        self.rotation = Rotation::Stopped;
        self.mode = Mode::Degraded;
        self.view.show_error(ERROR_MESSAGE);
        self.view.set_navigation_visible(false);
    }

    // ═══════════════════════════════════════
    // TIMERS & AUTO-ROTATION
    // ═══════════════════════════════════════

    /// Entry point for every timer callback
    pub fn on_timer(&mut self, slot: TimerSlot) {
        self.scheduler.fired(slot);
        if self.mode != Mode::Live {
            return;
        }

        match slot {
            TimerSlot::AutoRotate => {
                if let Err(e) = self.tick() {
                    log::error!("Auto-rotate tick failed: {}", e);
                    self.stop_rotation();
                }
            }
            TimerSlot::Inactivity => self.resume_after_inactivity(),
            TimerSlot::Render => self.render_or_recover(),
        }
    }

    fn tick(&mut self) -> Result<()> {
        if self.rotation != Rotation::Running {
            return Err(WidgetError::Timer(format!("tick while {:?}", self.rotation)));
        }
        if self.reviews.len() <= 1 {
            return Err(WidgetError::Timer("nothing to rotate".to_string()));
        }
        if self.transitioning {
            log::debug!("Skipping tick during render");
            return Ok(());
        }
        self.next();
        Ok(())
    }

    fn should_rotate(&self) -> bool {
        self.mode == Mode::Live
            && self.reviews.len() > 1
            && !self.interacting
            && !self.page_hidden
    }

    fn start_rotation(&mut self) {
        if !self.should_rotate() {
            return;
        }
        self.scheduler.set_interval(TimerSlot::AutoRotate, self.interval_ms);
        self.rotation = Rotation::Running;
        log::debug!("Auto-rotation running every {}ms", self.interval_ms);
    }

    fn stop_rotation(&mut self) {
        self.scheduler.cancel(TimerSlot::AutoRotate);
        self.rotation = Rotation::Stopped;
    }

    /// Pause rotation and restart the inactivity countdown
    pub fn interact(&mut self, signal: Interaction) {
        if self.mode != Mode::Live {
            return;
        }
        log::trace!("Carousel interaction: {:?}", signal);

        self.interacting = true;
        self.scheduler.cancel(TimerSlot::AutoRotate);
        self.rotation = if self.reviews.len() > 1 && !self.page_hidden {
            Rotation::PausedByUser
        } else {
            Rotation::Stopped
        };
        self.scheduler
            .set_timeout(TimerSlot::Inactivity, self.config.inactivity_delay_ms);
    }

    fn resume_after_inactivity(&mut self) {
        // A finger still on the carousel keeps it paused
        if self.swipe.is_tracking() {
            self.scheduler
                .set_timeout(TimerSlot::Inactivity, self.config.inactivity_delay_ms);
            return;
        }
        self.interacting = false;
        if self.should_rotate() {
            self.start_rotation();
        } else if self.rotation == Rotation::PausedByUser {
            self.rotation = Rotation::Stopped;
        }
    }

    /// Mirror document visibility. Hidden pages never rotate.
    pub fn set_page_hidden(&mut self, hidden: bool) {
        if self.mode != Mode::Live || self.page_hidden == hidden {
            return;
        }
        self.page_hidden = hidden;

        if hidden {
            log::debug!("Page hidden, stopping auto-rotation");
            self.stop_rotation();
        } else if self.should_rotate() {
            self.start_rotation();
        } else if self.interacting && self.reviews.len() > 1 {
            self.rotation = Rotation::PausedByUser;
        }
    }

    /// Change the tick period. A running timer is restarted with the new
    /// period; otherwise it applies on the next start.
    pub fn set_interval(&mut self, millis: u32) -> bool {
        if millis == 0 || millis == self.interval_ms {
            return false;
        }
        self.interval_ms = millis;
        if self.rotation == Rotation::Running {
            self.scheduler.cancel(TimerSlot::AutoRotate);
            self.scheduler.set_interval(TimerSlot::AutoRotate, millis);
        }
        log::debug!("Auto-rotate interval now {}ms", millis);
        true
    }

    pub fn viewport_resized(&mut self, width: f64) -> bool {
        let millis = self.config.interval_for_width(width);
        self.set_interval(millis)
    }

    // ═══════════════════════════════════════
    // TOUCH
    // ═══════════════════════════════════════

    pub fn touch_start(&mut self, x: f64, y: f64) {
        if self.mode != Mode::Live {
            return;
        }
        self.interact(Interaction::TouchStart);
        self.swipe.begin(Point::new(x, y));
    }

    /// True once the gesture is a horizontal swipe; the host may then
    /// suppress page scrolling.
    pub fn touch_move(&mut self, x: f64, y: f64) -> bool {
        self.swipe.update(Point::new(x, y)) == GestureAxis::Horizontal
    }

    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        if self.mode != Mode::Live {
            return None;
        }
        let direction = self.swipe.finish(Point::new(x, y));
        match direction {
            Some(SwipeDirection::Left) => {
                self.next();
            }
            Some(SwipeDirection::Right) => {
                self.previous();
            }
            None => {}
        }
        self.interact(Interaction::TouchEnd);
        direction
    }

    pub fn touch_cancel(&mut self) {
        self.swipe.cancel();
        self.interact(Interaction::TouchCancel);
    }

    // ═══════════════════════════════════════
    // TEARDOWN
    // ═══════════════════════════════════════

    /// Cancel every timer and stop reacting. The view keeps its last frame.
    pub fn dispose(&mut self) {
        if self.mode == Mode::Disposed {
            return;
        }
        self.scheduler.cancel_all();
        self.swipe.cancel();
        self.rotation = Rotation::Stopped;
        self.interacting = false;
        self.transitioning = false;
        self.mode = Mode::Disposed;
        log::debug!("Review carousel disposed");
    }
}
