//! Integer geometry shared by the UI core and the host boundary.
//!
//! Canonical space:
//! - scaled (GUI) pixels as reported by the host
//! - origin top-left
//! - +X right, +Y down
//!
//! All layout math is done in `i32`; rounding happens once, where a float
//! factor (scale, anchor fraction, clip fraction) meets a pixel quantity.

mod insets;
mod point;
mod rect;

pub use insets::Insets;
pub use point::{Point, Size};
pub use rect::Rect;

/// Rounds half away from zero and saturates into `i32`.
///
/// NaN maps to `0`.
#[inline]
pub fn round_px(v: f32) -> i32 {
    if v.is_nan() {
        return 0;
    }
    // `as` saturates on overflow.
    v.round() as i32
}
