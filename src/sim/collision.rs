//! Axis-aligned bounding-box collision
//!
//! Everything on the playfield is a rectangle, so collision is a plain overlap
//! test between the falling object and the paddle.

use glam::Vec2;

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Check whether two rectangles overlap
///
/// Boxes that only share an edge do not collide.
#[inline]
pub fn is_colliding(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.left || a.left >= b.right() || a.bottom() <= b.top || a.top >= b.bottom())
}

/// Where feedback effects for a hit are emitted: between the two centers
pub fn impact_point(a: &Rect, b: &Rect) -> Vec2 {
    (a.center() + b.center()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(is_colliding(&a, &b));
        assert!(is_colliding(&b, &a));
    }

    #[test]
    fn test_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(is_colliding(&outer, &inner));
        assert!(is_colliding(&inner, &outer));
    }

    #[test]
    fn test_disjoint_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Same rows, separate columns
        assert!(!is_colliding(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Same columns, separate rows
        assert!(!is_colliding(&a, &Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!is_colliding(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!is_colliding(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!is_colliding(&a, &Rect::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_impact_point_is_between_centers() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(impact_point(&a, &b), Vec2::new(10.0, 10.0));
    }
}
