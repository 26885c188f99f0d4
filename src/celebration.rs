//! Star orbit shown around a solved sentence
//!
//! The core only decides the ellipse: centered on the cards' bounding box,
//! with radii of half the box plus a fixed margin. Drawing and animating the
//! star is up to the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::BoundingBox;

/// Seconds per revolution
pub const ORBIT_PERIOD_SECS: f32 = 5.0;

/// Star outline, centered on the origin
pub const STAR_POINTS: &str = "0,-10 4,-3 10,-3 6,2 7,9 0,5 -7,9 -6,2 -10,-3 -4,-3";

/// Elliptical path the star travels along
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Cards' bounding box the orbit was sized from
    pub bounds: BoundingBox,
    pub center: Vec2,
    /// Horizontal and vertical radii
    pub radii: Vec2,
}

impl Orbit {
    /// Orbit enclosing `bounds` with `margin` px of clearance on every side
    pub fn around(bounds: BoundingBox, margin: f32) -> Self {
        Self {
            bounds,
            center: bounds.center(),
            radii: Vec2::new(bounds.width() / 2.0 + margin, bounds.height() / 2.0 + margin),
        }
    }

    /// Closed SVG path: two half-arcs starting from the top of the ellipse
    pub fn svg_path(&self) -> String {
        let Vec2 { x: cx, y: cy } = self.center;
        let Vec2 { x: rx, y: ry } = self.radii;
        format!(
            "M {cx} {top} A {rx} {ry} 0 1 1 {cx} {bottom} A {rx} {ry} 0 1 1 {cx} {top} Z",
            top = cy - ry,
            bottom = cy + ry,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> BoundingBox {
        BoundingBox {
            min: Vec2::new(100.0, 50.0),
            max: Vec2::new(300.0, 80.0),
        }
    }

    #[test]
    fn test_orbit_sizing() {
        let orbit = Orbit::around(bounds(), 20.0);
        assert_eq!(orbit.center, Vec2::new(200.0, 65.0));
        assert_eq!(orbit.radii, Vec2::new(120.0, 35.0));
        assert_eq!(orbit.bounds, bounds());
    }

    #[test]
    fn test_svg_path() {
        let orbit = Orbit::around(bounds(), 20.0);
        assert_eq!(
            orbit.svg_path(),
            "M 200 30 A 120 35 0 1 1 200 100 A 120 35 0 1 1 200 30 Z"
        );
    }
}
