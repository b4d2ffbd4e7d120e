//! 2-D vector math and ray/segment intersection.
//!
//! Coordinates are screen-space: the y axis grows downward, so a heading of
//! 0 degrees points right and 90 degrees points up. Two different rotation
//! conventions coexist on purpose: sensor mount points rotate by the
//! *negative* heading ([`rotate_offset_for_position`]) while ray directions
//! use the heading as-is ([`rotate_for_ray_direction`]). Both match the
//! observed runtime behavior and must not be unified.

use serde::{Deserialize, Serialize};

/// A 2-D point or offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// A boundary segment between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}

/// Rotate a body-frame mount offset into world space for a given heading.
///
/// Positions rotate by the negative heading angle. This is distinct from the
/// ray-direction convention below.
#[inline]
pub fn rotate_offset_for_position(offset: Vec2, heading_deg: f32) -> Vec2 {
    let rad = -heading_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

/// World angle of a ray mounted at `relative_deg` on a body with `heading_deg`.
///
/// Ray directions rotate with the positive heading, unlike mount offsets.
#[inline]
pub fn rotate_for_ray_direction(heading_deg: f32, relative_deg: f32) -> f32 {
    heading_deg + relative_deg
}

/// End point of a ray of length `len` from `origin` at `angle_deg`.
///
/// Screen-space: y decreases as the ray points "up".
#[inline]
pub fn ray_end_point(origin: Vec2, angle_deg: f32, len: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(origin.x + len * rad.cos(), origin.y - len * rad.sin())
}

/// Distance from `origin` along a ray to its intersection with `segment`,
/// or `None` if the ray misses within `max_len`.
///
/// Uses the two-line parametric determinant method: `t` parameterizes the
/// segment and `u` the ray; an intersection exists only when both lie in
/// [0, 1], at distance `u * max_len`.
#[inline]
pub fn ray_segment_distance(
    origin: Vec2,
    angle_deg: f32,
    max_len: f32,
    segment: &Segment,
) -> Option<f32> {
    let end = ray_end_point(origin, angle_deg, max_len);

    let (x1, y1) = (segment.a.x, segment.a.y);
    let (x2, y2) = (segment.b.x, segment.b.y);
    let (x3, y3) = (origin.x, origin.y);
    let (x4, y4) = (end.x, end.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        // Parallel or collinear
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(u * max_len)
    } else {
        None
    }
}
