// crates/showcase-app/src/carousel/swipe.rs
// Touch gesture classification

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Direction the finger travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left: show the next review
    Left,
    /// Finger moved left to right: show the previous review
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAxis {
    Undecided,
    Horizontal,
    Vertical,
}

/// Tracks one touch gesture from start to finish
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    origin: Option<Point>,
    axis: GestureAxis,
    min_distance: f64,
    lock_distance: f64,
}

impl SwipeTracker {
    pub fn new(min_distance: f64, lock_distance: f64) -> Self {
        Self {
            origin: None,
            axis: GestureAxis::Undecided,
            min_distance,
            lock_distance,
        }
    }

    pub fn begin(&mut self, at: Point) {
        self.origin = Some(at);
        self.axis = GestureAxis::Undecided;
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Classify the gesture once it travels past the lock distance.
    /// A `Horizontal` result means the host may suppress page scrolling.
    pub fn update(&mut self, at: Point) -> GestureAxis {
        let Some(origin) = self.origin else {
            return GestureAxis::Undecided;
        };
        if self.axis == GestureAxis::Undecided {
            let dx = (at.x - origin.x).abs();
            let dy = (at.y - origin.y).abs();
            if dx > self.lock_distance || dy > self.lock_distance {
                self.axis = if dx > dy {
                    GestureAxis::Horizontal
                } else {
                    GestureAxis::Vertical
                };
            }
        }
        self.axis
    }

    /// End the gesture. Returns a direction only for a horizontal swipe that
    /// travelled further than the minimum distance.
    pub fn finish(&mut self, at: Point) -> Option<SwipeDirection> {
        let origin = self.origin.take()?;
        self.axis = GestureAxis::Undecided;

        let dx = at.x - origin.x;
        let dy = at.y - origin.y;
        if dx.abs() <= dy.abs() || dx.abs() <= self.min_distance {
            return None;
        }
        Some(if dx < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.axis = GestureAxis::Undecided;
    }
}
