use glam::{Vec2, Vec3};

use crate::math::{is_finite, unit_at};

/// One node of a thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Offset from the head this point springs back to, when rest springs are enabled.
    pub rest: Option<Vec2>,
}

impl Point {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rest: None,
        }
    }

    pub fn is_finite(&self) -> bool {
        is_finite(self.pos) && is_finite(self.vel)
    }
}

/// Per-thread appearance, fixed at seed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreadStyle {
    pub width: f32,
    pub hue: f32,
    /// Base colour resolved from `hue` and the configured saturation/lightness.
    pub rgb: Vec3,
    pub depth: usize,
    pub opacity: f32,
    pub specular_exponent: f32,
}

/// A flexible strand: ordered points, head first.
#[derive(Clone, Debug)]
pub struct Thread {
    pub points: Vec<Point>,
    pub style: ThreadStyle,
    /// Fixed unit-disk offset that fans the bundle out around the shared target.
    pub target_offset: Vec2,
    /// Unit direction the tail drifts along while the pointer is idle.
    pub drift: Vec2,
    /// `points / max points`, scales idle drift so long threads spread further.
    pub length_factor: f32,
}

impl Thread {
    /// Lay out `count` points from `head` along `angle`, each `segment_length` apart,
    /// at rest.
    pub fn laid_out(head: Vec2, angle: f32, count: usize, segment_length: f32) -> Vec<Point> {
        let dir = unit_at(angle);
        (0..count)
            .map(|i| Point::at(head + dir * (segment_length * i as f32)))
            .collect()
    }

    pub fn head(&self) -> Vec2 {
        self.points[0].pos
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace every point along a fresh line from `head`, zeroing velocity.
    ///
    /// Rest offsets are re-captured when `keep_rest` is set so spring-to-rest
    /// keeps working after a relayout.
    pub fn relayout(&mut self, head: Vec2, angle: f32, segment_length: f32, keep_rest: bool) {
        let dir = unit_at(angle);
        for (i, p) in self.points.iter_mut().enumerate() {
            let offset = dir * (segment_length * i as f32);
            p.pos = head + offset;
            p.vel = Vec2::ZERO;
            p.rest = keep_rest.then_some(offset);
        }
    }

    /// Distance between each adjacent pair, head first.
    pub fn segment_lengths(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.windows(2).map(|w| w[0].pos.distance(w[1].pos))
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }
}
