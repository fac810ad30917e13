//! Anchor-based placement of an entity inside its parent.
//!
//! Resolution is a pure function of the owner's size, its scale, an
//! [`AnchorSpec`] and the parent rectangle. [`AnchorCache`] memoizes the last
//! result so an unchanged entity costs one key comparison per query.

use lodestar_engine::coords::{Insets, Point, Rect, Size, round_px};

// ── Anchor ────────────────────────────────────────────────────────────────

/// The nine canonical attachment points of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// The anchor as fractions of width and height.
    pub fn normalized(self) -> (f32, f32) {
        let (h, v) = self.steps();
        (h as f32 * 0.5, v as f32 * 0.5)
    }

    /// Offset of this point inside a box of `size`.
    ///
    /// Centers use integer halving, so an odd width of 7 centers at 3.
    pub fn offset_in(self, size: Size) -> Point {
        let axis = |step: u8, extent: i32| match step {
            0 => 0,
            1 => extent / 2,
            _ => extent,
        };
        let (h, v) = self.steps();
        Point::new(axis(h, size.width), axis(v, size.height))
    }

    // (horizontal, vertical) in half-extents: 0 = start, 1 = center, 2 = end
    fn steps(self) -> (u8, u8) {
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (1, 0),
            Anchor::TopRight => (2, 0),
            Anchor::CenterLeft => (0, 1),
            Anchor::Center => (1, 1),
            Anchor::CenterRight => (2, 1),
            Anchor::BottomLeft => (0, 2),
            Anchor::BottomCenter => (1, 2),
            Anchor::BottomRight => (2, 2),
        }
    }
}

// ── AnchorPoint ───────────────────────────────────────────────────────────

/// Either a named [`Anchor`] or an arbitrary normalized point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorPoint {
    Preset(Anchor),
    /// Fractions of width/height, `0.0..=1.0` on each axis.
    Normalized { x: f32, y: f32 },
}

impl Default for AnchorPoint {
    fn default() -> Self {
        AnchorPoint::Preset(Anchor::TopLeft)
    }
}

impl From<Anchor> for AnchorPoint {
    fn from(a: Anchor) -> Self {
        AnchorPoint::Preset(a)
    }
}

impl AnchorPoint {
    /// A normalized point. Components are clamped to `[0, 1]`; NaN becomes `0`.
    pub fn normalized(x: f32, y: f32) -> Self {
        AnchorPoint::Normalized { x: unit(x), y: unit(y) }
    }

    pub fn offset_in(self, size: Size) -> Point {
        match self {
            AnchorPoint::Preset(a) => a.offset_in(size),
            AnchorPoint::Normalized { x, y } => Point::new(
                round_px(unit(x) * size.width as f32),
                round_px(unit(y) * size.height as f32),
            ),
        }
    }

    /// Bitwise identity, usable as a cache key.
    pub fn key(self) -> AnchorPointKey {
        match self {
            AnchorPoint::Preset(a) => AnchorPointKey::Preset(a),
            AnchorPoint::Normalized { x, y } => AnchorPointKey::Normalized(x.to_bits(), y.to_bits()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPointKey {
    Preset(Anchor),
    Normalized(u32, u32),
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ── Margin ────────────────────────────────────────────────────────────────

/// Inward distance from one side of the parent rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Px(i32),
    /// Fraction of the parent's dimension on this axis (0.0 = 0 %, 1.0 = 100 %).
    Percent(f32),
}

impl Default for Margin {
    fn default() -> Self {
        Margin::Px(0)
    }
}

impl Margin {
    #[inline]
    pub fn resolve(self, parent_dim: i32) -> i32 {
        match self {
            Margin::Px(v) => v,
            Margin::Percent(p) => round_px(unit(p) * parent_dim as f32),
        }
    }

    fn key(self) -> MarginKey {
        match self {
            Margin::Px(v) => MarginKey::Px(v),
            Margin::Percent(p) => MarginKey::Percent(p.to_bits()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MarginKey {
    Px(i32),
    Percent(u32),
}

/// Per-side margins. Each side holds one value; setting a side again,
/// in either unit, replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub left: Margin,
    pub top: Margin,
    pub right: Margin,
    pub bottom: Margin,
}

impl Margins {
    pub fn px(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: Margin::Px(left),
            top: Margin::Px(top),
            right: Margin::Px(right),
            bottom: Margin::Px(bottom),
        }
    }

    /// Resolves against `parent`: horizontal sides use its width, vertical its height.
    pub fn resolve(&self, parent: Size) -> Insets {
        Insets::new(
            self.left.resolve(parent.width),
            self.top.resolve(parent.height),
            self.right.resolve(parent.width),
            self.bottom.resolve(parent.height),
        )
    }

    /// The parent rectangle after applying the margins.
    pub fn shrink(&self, parent: Rect) -> Rect {
        parent.inset(self.resolve(parent.size()))
    }
}

// ── AnchorSpec ────────────────────────────────────────────────────────────

/// Everything that places an entity relative to its parent, apart from size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorSpec {
    /// Offset from the parent anchor point before the pivot is subtracted.
    pub local_offset: Point,
    /// Where on the (margin-shrunk) parent the entity attaches.
    pub parent_anchor: AnchorPoint,
    /// Which point of the entity sits on the parent anchor.
    pub pivot: AnchorPoint,
    pub margins: Margins,
    /// Final nudge applied after anchoring.
    pub extra_offset: Point,
}

impl AnchorSpec {
    /// Same point on parent and self, e.g. `BottomRight` pins the entity's
    /// bottom-right corner to the parent's.
    pub fn aligned(anchor: Anchor) -> Self {
        Self {
            parent_anchor: anchor.into(),
            pivot: anchor.into(),
            ..Self::default()
        }
    }
}

// ── resolution ────────────────────────────────────────────────────────────

/// Pixel size of an entity after scaling.
///
/// A non-positive or NaN `scale` yields `1×1`. A positive source extent
/// never scales below one pixel.
pub fn draw_size(size: Size, scale: f32) -> Size {
    if !(scale > 0.0) {
        return Size::new(1, 1);
    }
    let axis = |extent: i32| {
        if extent > 0 {
            round_px(extent as f32 * scale).max(1)
        } else {
            0
        }
    };
    Size::new(axis(size.width), axis(size.height))
}

/// Absolute rectangle of an entity of `size`·`scale` placed by `spec` in `parent`.
///
/// `abs = parentPoint + local_offset - pivotOffset + extra_offset`, where
/// `parentPoint` is `parent_anchor` on the parent shrunk by `margins`.
pub fn resolve(size: Size, scale: f32, spec: &AnchorSpec, parent: Rect) -> Rect {
    let draw = draw_size(size, scale);
    let content = spec.margins.shrink(parent);
    let parent_point = content.origin() + spec.parent_anchor.offset_in(content.size());
    let origin = parent_point + spec.local_offset - spec.pivot.offset_in(draw) + spec.extra_offset;
    Rect::from_origin_size(origin, draw)
}

// ── AnchorCache ───────────────────────────────────────────────────────────

/// Every input [`resolve`] reads, plus the owner's mutation generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorKey {
    generation: u64,
    size: Size,
    scale_bits: u32,
    parent_anchor: AnchorPointKey,
    pivot: AnchorPointKey,
    margins: [MarginKey; 4],
    offsets: (Point, Point),
    parent: Rect,
}

impl AnchorKey {
    pub fn new(generation: u64, size: Size, scale: f32, spec: &AnchorSpec, parent: Rect) -> Self {
        let m = &spec.margins;
        Self {
            generation,
            size,
            scale_bits: scale.to_bits(),
            parent_anchor: spec.parent_anchor.key(),
            pivot: spec.pivot.key(),
            margins: [m.left.key(), m.top.key(), m.right.key(), m.bottom.key()],
            offsets: (spec.local_offset, spec.extra_offset),
            parent,
        }
    }
}

/// Single-entry memo of the last resolved rectangle.
#[derive(Debug, Clone, Default)]
pub struct AnchorCache {
    entry: Option<(AnchorKey, Rect)>,
    hits: u64,
    misses: u64,
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rect for `key`, or runs `compute` and stores it.
    pub fn get_or_resolve(&mut self, key: AnchorKey, compute: impl FnOnce() -> Rect) -> Rect {
        if let Some((cached, rect)) = self.entry {
            if cached == key {
                self.hits += 1;
                return rect;
            }
        }
        self.misses += 1;
        let rect = compute();
        self.entry = Some((key, rect));
        rect
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.entry.is_some()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
