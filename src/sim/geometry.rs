//! Axis-aligned rectangle geometry for word cards
//!
//! All coordinates are layout pixels with the origin at the container's
//! top-left corner; `y` grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Open-interval overlap test, see [`intersects`]
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Check whether two rectangles overlap
///
/// Rectangles that only share an edge or a corner do NOT intersect, so cards
/// can sit pixel-adjacent to each other without blocking.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(b.left() >= a.right()
        || b.right() <= a.left()
        || b.top() >= a.bottom()
        || b.bottom() <= a.top())
}

/// Tightest rectangle enclosing a set of rectangles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Compute the bounding box of the given rectangles
///
/// Returns `None` for an empty input.
pub fn bounding_box<I>(rects: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().fold(None, |acc, r| {
        let (lo, hi) = (r.pos, r.pos + r.size);
        Some(match acc {
            None => BoundingBox { min: lo, max: hi },
            Some(bb) => BoundingBox {
                min: bb.min.min(lo),
                max: bb.max.max(hi),
            },
        })
    })
}
