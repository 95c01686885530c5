use std::time::Duration;

use glam::Vec2;
use instant::Instant;

/// Snapshot of the pointer as seen by one simulation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub active: bool,
}

/// Pointer state written by event callbacks and read once per tick.
#[derive(Clone, Debug)]
pub struct InputTracker {
    pos: Vec2,
    active: bool,
    last_moved: Instant,
    fallback: Vec2,
}

impl InputTracker {
    pub fn new(fallback: Vec2, now: Instant) -> Self {
        Self {
            pos: fallback,
            active: false,
            last_moved: now,
            fallback,
        }
    }

    /// Pointer moved or pressed at surface-local `(x, y)`.
    pub fn pointer_moved(&mut self, pos: Vec2, now: Instant) {
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return;
        }
        self.pos = pos;
        self.active = true;
        self.last_moved = now;
    }

    pub fn pointer_down(&mut self, pos: Vec2, now: Instant) {
        self.pointer_moved(pos, now);
    }

    /// Pointer left the surface; its last position is kept but ignored.
    pub fn pointer_left(&mut self) {
        self.active = false;
    }

    pub fn current_target(&self) -> Target {
        Target {
            pos: self.pos,
            active: self.active,
        }
    }

    /// Where the bundle should head: the pointer while active, else the fallback.
    pub fn goal(&self) -> Vec2 {
        if self.active {
            self.pos
        } else {
            self.fallback
        }
    }

    pub fn idle_duration(&self, now: Instant) -> Duration {
        if now > self.last_moved {
            now.duration_since(self.last_moved)
        } else {
            Duration::ZERO
        }
    }

    /// Fallback target, usually the viewport centre; updated on resize.
    pub fn set_fallback(&mut self, fallback: Vec2) {
        self.fallback = fallback;
    }

    pub fn fallback(&self) -> Vec2 {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_first_move() {
        let t0 = Instant::now();
        let tracker = InputTracker::new(Vec2::new(400.0, 300.0), t0);
        assert!(!tracker.current_target().active);
        assert_eq!(tracker.goal(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn non_finite_events_are_dropped() {
        let t0 = Instant::now();
        let mut tracker = InputTracker::new(Vec2::ZERO, t0);
        tracker.pointer_moved(Vec2::new(f32::NAN, 3.0), t0);
        assert!(!tracker.current_target().active);
        assert_eq!(tracker.goal(), Vec2::ZERO);
    }
}
