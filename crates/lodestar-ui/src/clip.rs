//! Fractional clipping of a rectangle along one or both axes.

use lodestar_engine::coords::{Rect, round_px};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClipAxis {
    #[default]
    Horizontal,
    Vertical,
    Both,
}

/// Which end of the rectangle is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClipDirection {
    /// Keep the leading part (left / top).
    #[default]
    Forward,
    /// Keep the trailing part (right / bottom).
    Backward,
}

/// Keeps `fraction` of `rect` along `axis`.
///
/// `fraction <= 0` yields a zero-area rect, `fraction >= 1` the full rect and
/// NaN is treated as unclipped. Kept lengths are `round(extent * fraction)`.
pub fn clip_rect(rect: Rect, fraction: f32, axis: ClipAxis, direction: ClipDirection) -> Rect {
    let f = if fraction.is_nan() { 1.0 } else { fraction };
    let clip_h = matches!(axis, ClipAxis::Horizontal | ClipAxis::Both);
    let clip_v = matches!(axis, ClipAxis::Vertical | ClipAxis::Both);

    let (x, width) = if clip_h { keep(rect.x, rect.width, f, direction) } else { (rect.x, rect.width) };
    let (y, height) = if clip_v { keep(rect.y, rect.height, f, direction) } else { (rect.y, rect.height) };
    Rect::new(x, y, width, height)
}

fn keep(start: i32, extent: i32, f: f32, direction: ClipDirection) -> (i32, i32) {
    let kept = if f <= 0.0 {
        0
    } else if f >= 1.0 {
        extent
    } else {
        round_px(extent as f32 * f).clamp(0, extent.max(0))
    };
    match direction {
        ClipDirection::Forward => (start, kept),
        ClipDirection::Backward => (start + extent - kept, kept),
    }
}

/// A stored clip, applied to whatever rectangle its owner resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentClip {
    pub fraction: f32,
    pub axis: ClipAxis,
    pub direction: ClipDirection,
}

impl ContentClip {
    pub fn new(fraction: f32, axis: ClipAxis, direction: ClipDirection) -> Self {
        Self { fraction, axis, direction }
    }

    /// Left-to-right fill.
    pub fn horizontal(fraction: f32) -> Self {
        Self::new(fraction, ClipAxis::Horizontal, ClipDirection::Forward)
    }

    #[inline]
    pub fn apply(&self, rect: Rect) -> Rect {
        clip_rect(rect, self.fraction, self.axis, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(x, y, w, h)
    }

    const BOX: Rect = Rect::new(10, 20, 100, 50);

    #[test]
    fn horizontal_forward_keeps_left_part() {
        assert_eq!(clip_rect(BOX, 0.25, ClipAxis::Horizontal, ClipDirection::Forward), r(10, 20, 25, 50));
    }

    #[test]
    fn horizontal_backward_keeps_right_part() {
        assert_eq!(clip_rect(BOX, 0.25, ClipAxis::Horizontal, ClipDirection::Backward), r(85, 20, 25, 50));
    }

    #[test]
    fn vertical_and_both() {
        assert_eq!(clip_rect(BOX, 0.5, ClipAxis::Vertical, ClipDirection::Forward), r(10, 20, 100, 25));
        assert_eq!(clip_rect(BOX, 0.5, ClipAxis::Both, ClipDirection::Backward), r(60, 45, 50, 25));
    }

    #[test]
    fn bounds() {
        for axis in [ClipAxis::Horizontal, ClipAxis::Vertical, ClipAxis::Both] {
            for dir in [ClipDirection::Forward, ClipDirection::Backward] {
                assert!(clip_rect(BOX, 0.0, axis, dir).is_empty());
                assert!(clip_rect(BOX, -2.0, axis, dir).is_empty());
                assert_eq!(clip_rect(BOX, 1.0, axis, dir), BOX);
                assert_eq!(clip_rect(BOX, 7.0, axis, dir), BOX);
                assert_eq!(clip_rect(BOX, f32::NAN, axis, dir), BOX);
            }
        }
    }

    #[test]
    fn kept_width_rounds() {
        // 0.333 * 100 = 33.3
        assert_eq!(clip_rect(BOX, 0.333, ClipAxis::Horizontal, ClipDirection::Forward).width, 33);
        // 0.335 * 100 = 33.5
        assert_eq!(clip_rect(BOX, 0.335, ClipAxis::Horizontal, ClipDirection::Forward).width, 34);
    }

    #[test]
    fn clipped_rect_stays_inside() {
        for i in 0..=20 {
            let f = i as f32 / 20.0;
            let c = clip_rect(BOX, f, ClipAxis::Both, ClipDirection::Backward);
            assert!(c.x >= BOX.x && c.right() <= BOX.right());
            assert!(c.y >= BOX.y && c.bottom() <= BOX.bottom());
        }
    }

    #[test]
    fn content_clip_applies() {
        assert_eq!(ContentClip::horizontal(0.5).apply(BOX), r(10, 20, 50, 50));
    }
}
