//! Small vector helpers shared by the simulation and the renderer.

use glam::Vec2;

use crate::constants::MIN_DISTANCE;

/// Rescale `v` so its length does not exceed `max`.
#[inline]
pub fn clamp_speed(v: Vec2, max: f32) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > max * max && len_sq > MIN_DISTANCE * MIN_DISTANCE {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Unit vector along `v`, or `None` when `v` is too short to have a direction.
#[inline]
pub fn direction(v: Vec2) -> Option<Vec2> {
    let len = v.length();
    (len > MIN_DISTANCE && len.is_finite()).then(|| v / len)
}

/// Left-hand perpendicular of a unit tangent.
#[inline]
pub fn normal_of(tangent: Vec2) -> Vec2 {
    Vec2::new(-tangent.y, tangent.x)
}

/// Reflect the incoming direction `d` about unit normal `n`.
#[inline]
pub fn reflect(d: Vec2, n: Vec2) -> Vec2 {
    d - 2.0 * d.dot(n) * n
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector at `angle` radians.
#[inline]
pub fn unit_at(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[inline]
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
