use super::{Insets, Point, Size};

/// Axis-aligned rectangle in scaled pixels (top-left origin).
///
/// Width and height are clamped to be non-negative by every constructor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Builds a rect from two corners; a reversed pair yields an empty rect.
    #[inline]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Rect::new(min.x, min.y, max.x.saturating_sub(min.x), max.y.saturating_sub(min.y))
    }

    #[inline]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn max(self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    #[must_use]
    pub fn translate(self, by: Point) -> Self {
        Rect::new(
            self.x.saturating_add(by.x),
            self.y.saturating_add(by.y),
            self.width,
            self.height,
        )
    }

    /// Shrinks the rect inward by `insets`; extents clamp at zero.
    #[inline]
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Rect::new(
            self.x.saturating_add(insets.left),
            self.y.saturating_add(insets.top),
            self.width.saturating_sub(insets.h()),
            self.height.saturating_sub(insets.v()),
        )
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect { Rect::new(x, y, w, h) }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn negative_extents_clamp_to_zero() {
        let rect = r(5, 5, -3, 4);
        assert_eq!(rect.width, 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn from_corners_reversed_is_empty() {
        assert!(Rect::from_corners(Point::new(10, 10), Point::new(2, 2)).is_empty());
        assert_eq!(Rect::from_corners(Point::new(1, 2), Point::new(4, 6)), r(1, 2, 3, 4));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(Point::new(0, 0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0, 0, 10, 10).contains(Point::new(10, 10)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0, 0, 10, 10).intersect(r(5, 5, 10, 10));
        assert_eq!(i, Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0, 0, 10, 10).intersect(r(10, 0, 10, 10)).is_none());
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_asymmetric() {
        let inner = r(5, 5, 100, 60).inset(Insets::new(6, 4, 10, 8));
        assert_eq!(inner, r(11, 9, 84, 48));
    }

    #[test]
    fn inset_clamps_to_zero() {
        let inner = r(0, 0, 10, 10).inset(Insets::all(20));
        assert_eq!(inner.size(), Size::zero());
    }
}
