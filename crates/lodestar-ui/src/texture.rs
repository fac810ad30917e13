use lodestar_engine::coords::{Insets, Point, Rect, Size};
use lodestar_engine::host::AtlasId;

/// A source rectangle inside a host-managed texture atlas.
///
/// Invariants (enforced by the constructors):
/// - `w`, `h` are non-negative
/// - `insets.left + insets.right <= w` and `insets.top + insets.bottom <= h`
/// - `alpha` is in `[0, 1]`
///
/// A region with all insets zero is a plain region; nine-slice drawing falls
/// back to a single stretched quad for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    atlas: AtlasId,
    u: i32,
    v: i32,
    w: i32,
    h: i32,
    atlas_size: Size,
    alpha: f32,
    insets: Insets,
}

impl TextureRegion {
    pub fn new(atlas: AtlasId, u: i32, v: i32, w: i32, h: i32, atlas_size: Size) -> Self {
        Self {
            atlas,
            u,
            v,
            w: w.max(0),
            h: h.max(0),
            atlas_size,
            alpha: 1.0,
            insets: Insets::default(),
        }
    }

    /// Sets nine-slice insets. Negative sides become zero; right/bottom are
    /// trimmed so opposite insets never exceed the region.
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        let i = insets.non_negative();
        let left = i.left.min(self.w);
        let top = i.top.min(self.h);
        self.insets = Insets {
            left,
            top,
            right: i.right.min(self.w - left),
            bottom: i.bottom.min(self.h - top),
        };
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.set_alpha(alpha);
        self
    }

    /// NaN is treated as fully opaque.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
    }

    #[inline]
    pub fn atlas(&self) -> AtlasId {
        self.atlas
    }

    #[inline]
    pub fn atlas_size(&self) -> Size {
        self.atlas_size
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    #[inline]
    pub fn has_insets(&self) -> bool {
        !self.insets.is_zero()
    }

    /// Top-left texel of the region inside the atlas.
    #[inline]
    pub fn uv(&self) -> Point {
        Point::new(self.u, self.v)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// The region as an atlas-space rectangle.
    #[inline]
    pub fn src_rect(&self) -> Rect {
        Rect::new(self.u, self.v, self.w, self.h)
    }
}
