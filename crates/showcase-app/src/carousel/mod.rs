// crates/showcase-app/src/carousel/mod.rs
// Review carousel: controller state machine plus the browser binding
//
// The controller is generic over a `CarouselView` (what the user sees) and a
// `Scheduler` (timers and display frames), so everything except the DOM glue
// runs under plain `cargo test`.

mod controller;
mod host;
mod swipe;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(test)]
mod testing;

pub use controller::{Carousel, Interaction, Mode, Rotation};
pub use host::{CarouselView, EMPTY_MESSAGE, ERROR_MESSAGE, Scheduler, TimerSlot};
pub use swipe::{GestureAxis, Point, SwipeDirection, SwipeTracker};

#[cfg(target_arch = "wasm32")]
pub use dom::{CarouselHandle, MountOutcome, mount};
