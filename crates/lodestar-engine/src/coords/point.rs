use core::ops::{Add, Neg, Sub};

/// 2D integer point (or offset) in scaled pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

/// Width/height pair in scaled pixels.
///
/// Constructors clamp negative extents to zero; a `Size` is never negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_clamps_negative_extents() {
        let s = Size::new(-4, 7);
        assert_eq!(s, Size::new(0, 7));
        assert!(s.is_empty());
    }

    #[test]
    fn point_arithmetic_saturates() {
        let p = Point::new(i32::MAX, 0) + Point::new(1, 2);
        assert_eq!(p, Point::new(i32::MAX, 2));
        assert_eq!(Point::new(3, 4) - Point::new(1, 1), Point::new(2, 3));
        assert_eq!(-Point::new(3, -4), Point::new(-3, 4));
    }
}
