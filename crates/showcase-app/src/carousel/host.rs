// crates/showcase-app/src/carousel/host.rs
// Seams between the controller and its host environment

use showcase_types::Review;

use crate::error::Result;

/// Placeholder text when no featured reviews exist
pub const EMPTY_MESSAGE: &str = "No reviews yet. Check back soon!";
/// Placeholder text when the carousel cannot render
pub const ERROR_MESSAGE: &str = "Reviews are unavailable right now.";

/// Display surface the controller renders into
pub trait CarouselView {
    /// Show one review. Must update quote, author and context together.
    fn show_review(&mut self, review: &Review, index: usize, total: usize) -> Result<()>;

    fn show_empty(&mut self);

    fn show_error(&mut self, message: &str);

    /// Prev/next buttons and the dot strip
    fn set_navigation_visible(&mut self, visible: bool);

    /// Replace the dot strip with `count` dots
    fn build_indicators(&mut self, count: usize) -> Result<()>;

    /// Mark exactly one dot active
    fn set_active_indicator(&mut self, index: usize);
}

/// Timer slots owned by one controller. Each slot holds at most one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerSlot {
    AutoRotate,
    Inactivity,
    Render,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 3] = [TimerSlot::AutoRotate, TimerSlot::Inactivity, TimerSlot::Render];
}

/// Timer host. Arming a slot replaces whatever the slot held; when a timer
/// fires the host calls `Carousel::on_timer` with its slot.
pub trait Scheduler {
    fn set_interval(&mut self, slot: TimerSlot, millis: u32);

    fn set_timeout(&mut self, slot: TimerSlot, millis: u32);

    /// Fire once at the next display refresh
    fn request_frame(&mut self, slot: TimerSlot);

    fn cancel(&mut self, slot: TimerSlot);

    /// Called when `slot` has just fired. One-shot timers are forgotten here;
    /// intervals stay armed.
    fn fired(&mut self, slot: TimerSlot);

    fn is_armed(&self, slot: TimerSlot) -> bool;

    fn armed_count(&self) -> usize {
        TimerSlot::ALL.iter().filter(|slot| self.is_armed(**slot)).count()
    }

    fn cancel_all(&mut self) {
        for slot in TimerSlot::ALL {
            self.cancel(slot);
        }
    }
}
