/// Thickness on all four sides, in pixels.
///
/// Used for nine-slice source insets, panel padding and label padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn all(v: i32) -> Self {
        Self { left: v, top: v, right: v, bottom: v }
    }

    #[inline]
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self { left: horizontal, top: vertical, right: horizontal, bottom: vertical }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    /// Negative sides become zero.
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.max(0),
            bottom: self.bottom.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_and_v_sum_opposite_sides() {
        let e = Insets::new(1, 2, 3, 4);
        assert_eq!(e.h(), 4);
        assert_eq!(e.v(), 6);
    }

    #[test]
    fn non_negative_clamps_each_side() {
        assert_eq!(Insets::new(-1, 2, -3, 4).non_negative(), Insets::new(0, 2, 0, 4));
    }
}
