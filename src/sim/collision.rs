//! Collision detection for axis-aligned geometry
//!
//! Every game in the campaign resolves contacts with the same three tests:
//! rectangle overlap, circle against rectangle, and point containment.
//! Overlap is strict: rectangles that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same size, shifted by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Rectangle shrunk by fractions of its own size (used for sprite details)
    pub fn sub(&self, fx: f32, fy: f32, fw: f32, fh: f32) -> Self {
        Self::new(
            self.x + self.w * fx,
            self.y + self.h * fy,
            self.w * fw,
            self.h * fh,
        )
    }

    /// AABB/AABB overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }

    /// Point-in-rect test (left/top edges inclusive, right/bottom exclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_rect(point, self)
    }
}

/// Check whether two rectangles overlap with non-zero area
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Check whether a point lies inside a rectangle
#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x < rect.right() && point.y >= rect.y && point.y < rect.bottom()
}

/// Check collision between a circle and a rectangle
///
/// Works in the rectangle's half-extent space: the circle hits if its center
/// is within the slab on either axis, or within `radius` of the nearest corner.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let half = Vec2::new(rect.w / 2.0, rect.h / 2.0);
    let d = (center - rect.center()).abs();

    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }
    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    let corner = d - half;
    corner.length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Containment
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_point_in_rect() {
        let r = Rect::new(490.0, 410.0, 300.0, 70.0);
        assert!(r.contains(Vec2::new(640.0, 450.0)));
        assert!(r.contains(Vec2::new(490.0, 410.0)));
        assert!(!r.contains(Vec2::new(790.0, 450.0)));
        assert!(!r.contains(Vec2::new(640.0, 540.0)));
    }

    #[test]
    fn test_circle_rect_sides_and_corners() {
        let r = Rect::new(100.0, 100.0, 80.0, 200.0);

        // Touching the left face
        assert!(circle_rect_overlap(Vec2::new(85.0, 200.0), 20.0, &r));
        // Clear of the left face
        assert!(!circle_rect_overlap(Vec2::new(79.0, 200.0), 20.0, &r));

        // Near the top-left corner but outside the radius (distance ~21.2)
        assert!(!circle_rect_overlap(Vec2::new(85.0, 85.0), 20.0, &r));
        // Inside the radius of the corner (distance ~14.1)
        assert!(circle_rect_overlap(Vec2::new(90.0, 90.0), 20.0, &r));
    }

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), 10.0);
        assert_eq!(r, Rect::new(45.0, 45.0, 10.0, 10.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }
}
