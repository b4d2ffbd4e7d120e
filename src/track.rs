//! Static track geometry: two nested axis-aligned rectangles forming a
//! closed ring. The eight rectangle edges double as the perception and
//! collision boundary.

use crate::config::TrackConfig;
use crate::geometry::{Segment, Vec2};

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// The four edges, clockwise from the top edge.
    pub fn edges(&self) -> [Segment; 4] {
        let tl = Vec2::new(self.left, self.top);
        let tr = Vec2::new(self.right(), self.top);
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left, self.bottom());
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}

/// The rectangular-ring track.
#[derive(Clone, Debug)]
pub struct Track {
    pub outer: Rect,
    pub inner: Rect,
    segments: Vec<Segment>,
}

impl Track {
    pub fn new(config: &TrackConfig) -> Self {
        let (w, h) = (config.width, config.height);
        let pad = config.border_padding;
        let lane = config.lane_width;

        let outer = Rect {
            left: w * pad,
            top: h * pad,
            width: w * (1.0 - 2.0 * pad),
            height: h * (1.0 - 2.0 * pad),
        };
        let inner = Rect {
            left: w * (pad + lane),
            top: h * (pad + lane),
            width: w * (1.0 - 2.0 * (pad + lane)),
            height: h * (1.0 - 2.0 * (pad + lane)),
        };

        let mut segments = Vec::with_capacity(8);
        segments.extend(outer.edges());
        segments.extend(inner.edges());

        Self {
            outer,
            inner,
            segments,
        }
    }

    /// All boundary segments, outer ring first.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Default spawn point: the middle of the left lane, halfway down.
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            (self.outer.left + self.inner.left) / 2.0,
            self.outer.top + self.outer.height / 2.0,
        )
    }

    /// True if `point` lies on the ring between the two boundaries.
    pub fn contains(&self, point: Vec2) -> bool {
        let in_outer = point.x > self.outer.left
            && point.x < self.outer.right()
            && point.y > self.outer.top
            && point.y < self.outer.bottom();
        let in_inner = point.x > self.inner.left
            && point.x < self.inner.right()
            && point.y > self.inner.top
            && point.y < self.inner.bottom();
        in_outer && !in_inner
    }
}
