//! Turns raw pointer gestures into directions. Pure functions, the terminal
//! driver feeds them mouse coordinates but any front end could.

use crate::snake::Direction;

/// Minimum travel for a drag to count as a swipe.
pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Classifies a swipe by its dominant axis. Returns `None` when the travel
/// along that axis doesn't exceed `min_distance`.
pub fn classify_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= min_distance {
            return None;
        }
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        if dy.abs() <= min_distance {
            return None;
        }
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Direction of a tap at `(x, y)` inside an area of `width` x `height`,
/// relative to the area's centre. Ties go to the vertical axis.
pub fn classify_tap(x: f32, y: f32, width: f32, height: f32) -> Direction {
    let dx = x - width / 2.0;
    let dy = y - height / 2.0;

    if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Tracks a press until release and reports the swipe, if any.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    /// Ends the gesture. `None` if no press was recorded or the travel was too short.
    pub fn release(&mut self, x: f32, y: f32, min_distance: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        classify_swipe(x - sx, y - sy, min_distance)
    }
}
