// crates/showcase-app/src/carousel/testing.rs
// In-memory view and virtual-clock scheduler for controller tests

use std::collections::{BTreeMap, HashSet};

use showcase_types::Review;

use super::controller::Carousel;
use super::host::{CarouselView, EMPTY_MESSAGE, Scheduler, TimerSlot};
use crate::config::CarouselConfig;
use crate::error::{Result, WidgetError};

/// Virtual duration of one display frame
pub const FRAME_MS: u64 = 16;

pub type TestCarousel = Carousel<RecordingView, ManualScheduler>;

/// Reviews `r0..r{count}`; even positions carry a context line
pub fn reviews(count: usize) -> Vec<Review> {
    (0..count)
        .map(|i| Review {
            id: format!("r{}", i),
            quote: format!("Quote {}", i),
            author: format!("Author {}", i),
            context: (i % 2 == 0).then(|| format!("Context {}", i)),
            featured: true,
        })
        .collect()
}

/// Initialized carousel over `count` reviews with default config
pub fn carousel(count: usize) -> TestCarousel {
    let mut c = Carousel::new(
        reviews(count),
        CarouselConfig::default(),
        RecordingView::default(),
        ManualScheduler::default(),
    );
    c.init();
    c
}

/// Run every timer due within the next `millis`, in deadline order
pub fn advance(carousel: &mut TestCarousel, millis: u64) {
    let target = carousel.scheduler().now + millis;
    while let Some((slot, due)) = carousel.scheduler().next_due() {
        if due > target {
            break;
        }
        carousel.scheduler_mut().now = due;
        carousel.on_timer(slot);
    }
    carousel.scheduler_mut().now = target;
}

// ============================================================================
// RecordingView
// ============================================================================

#[derive(Debug, Default)]
pub struct RecordingView {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub context: Option<String>,
    pub shown_ids: Vec<String>,
    pub dots: Vec<bool>,
    pub nav_visible: Option<bool>,
    pub empty_shown: bool,
    pub error: Option<String>,
    /// Reviews whose render should fail
    pub failing_ids: HashSet<String>,
    pub fail_indicators: bool,
}

impl RecordingView {
    pub fn active_dots(&self) -> Vec<usize> {
        self.dots
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }
}

impl CarouselView for RecordingView {
    fn show_review(&mut self, review: &Review, _index: usize, _total: usize) -> Result<()> {
        if self.failing_ids.contains(&review.id) {
            return Err(WidgetError::Render(format!("cannot show {}", review.id)));
        }
        self.quote = Some(review.quote.clone());
        self.author = Some(review.author.clone());
        self.context = review.context.clone();
        self.shown_ids.push(review.id.clone());
        self.empty_shown = false;
        self.error = None;
        Ok(())
    }

    fn show_empty(&mut self) {
        self.empty_shown = true;
        self.quote = Some(EMPTY_MESSAGE.to_string());
        self.author = None;
        self.context = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        self.nav_visible = Some(visible);
    }

    fn build_indicators(&mut self, count: usize) -> Result<()> {
        if self.fail_indicators {
            return Err(WidgetError::MissingElement(".carousel-dots".to_string()));
        }
        self.dots = vec![false; count];
        Ok(())
    }

    fn set_active_indicator(&mut self, index: usize) {
        for (i, dot) in self.dots.iter_mut().enumerate() {
            *dot = i == index;
        }
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: u64,
    period: Option<u64>,
}

/// Scheduler driven by `advance` instead of a real clock
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    pending: BTreeMap<TimerSlot, Pending>,
}

impl ManualScheduler {
    /// Milliseconds until `slot` fires
    pub fn due_in(&self, slot: TimerSlot) -> Option<u64> {
        self.pending.get(&slot).map(|p| p.due - self.now)
    }

    fn next_due(&self) -> Option<(TimerSlot, u64)> {
        self.pending
            .iter()
            .map(|(slot, p)| (*slot, p.due))
            .min_by_key(|(slot, due)| (*due, *slot))
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&mut self, slot: TimerSlot, millis: u32) {
        let period = u64::from(millis);
        self.pending.insert(
            slot,
            Pending {
                due: self.now + period,
                period: Some(period),
            },
        );
    }

    fn set_timeout(&mut self, slot: TimerSlot, millis: u32) {
        self.pending.insert(
            slot,
            Pending {
                due: self.now + u64::from(millis),
                period: None,
            },
        );
    }

    fn request_frame(&mut self, slot: TimerSlot) {
        self.pending.insert(
            slot,
            Pending {
                due: self.now + FRAME_MS,
                period: None,
            },
        );
    }

    fn cancel(&mut self, slot: TimerSlot) {
        self.pending.remove(&slot);
    }

    fn fired(&mut self, slot: TimerSlot) {
        let period = match self.pending.get(&slot) {
            Some(p) => p.period,
            None => return,
        };
        match period {
            Some(period) => {
                if let Some(p) = self.pending.get_mut(&slot) {
                    p.due += period;
                }
            }
            None => {
                self.pending.remove(&slot);
            }
        }
    }

    fn is_armed(&self, slot: TimerSlot) -> bool {
        self.pending.contains_key(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_interval_rearms() {
        let mut s = ManualScheduler::default();
        s.set_interval(TimerSlot::AutoRotate, 100);
        assert_eq!(s.due_in(TimerSlot::AutoRotate), Some(100));
        s.now = 100;
        s.fired(TimerSlot::AutoRotate);
        assert_eq!(s.due_in(TimerSlot::AutoRotate), Some(100));
    }

    #[test]
    fn test_manual_scheduler_timeout_is_one_shot() {
        let mut s = ManualScheduler::default();
        s.set_timeout(TimerSlot::Inactivity, 50);
        s.fired(TimerSlot::Inactivity);
        assert!(!s.is_armed(TimerSlot::Inactivity));
        assert_eq!(s.armed_count(), 0);
    }

    #[test]
    fn test_manual_scheduler_slot_holds_one_timer() {
        let mut s = ManualScheduler::default();
        s.set_timeout(TimerSlot::Inactivity, 50);
        s.set_timeout(TimerSlot::Inactivity, 80);
        assert_eq!(s.armed_count(), 1);
        assert_eq!(s.due_in(TimerSlot::Inactivity), Some(80));
    }
}
