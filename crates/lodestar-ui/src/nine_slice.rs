//! Nine-slice decomposition of a source region onto a destination size.
//!
//! Corners keep their (policy-scaled) size, edges stretch along one axis and
//! the center stretches along both. All rectangles produced here are relative
//! to the source region's and the destination's own top-left corners.

use lodestar_engine::coords::{Insets, Point, Rect, Size, round_px};

/// How source insets map to destination insets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NineSliceMode {
    /// Source insets are used unchanged.
    None,
    /// Insets scale with the destination/source ratio, never below one pixel.
    #[default]
    Proportional,
    /// Source insets, but at least `min_px`.
    Minimum,
    /// Proportional, then bounded by `min_px`, `max_px` and the source extent.
    Clamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NineSlicePolicy {
    pub mode: NineSliceMode,
    pub min_px: i32,
    pub max_px: i32,
}

impl Default for NineSlicePolicy {
    fn default() -> Self {
        Self { mode: NineSliceMode::Proportional, min_px: 1, max_px: i32::MAX }
    }
}

impl NineSlicePolicy {
    pub fn new(mode: NineSliceMode) -> Self {
        Self { mode, ..Self::default() }
    }

    #[must_use]
    pub fn with_min(mut self, min_px: i32) -> Self {
        self.min_px = min_px;
        self
    }

    #[must_use]
    pub fn with_max(mut self, max_px: i32) -> Self {
        self.max_px = max_px;
        self
    }

    /// Destination size of one inset.
    ///
    /// `total_src` is the source extent on the inset's axis, `dst` the
    /// destination extent. A non-positive inset always maps to zero.
    pub fn dst_inset(&self, inset: i32, total_src: i32, dst: i32) -> i32 {
        if inset <= 0 {
            return 0;
        }
        let proportional = || {
            if total_src <= 0 {
                inset
            } else {
                round_px(inset as f32 * dst as f32 / total_src as f32)
            }
        };
        match self.mode {
            NineSliceMode::None => inset.min(total_src),
            NineSliceMode::Proportional => proportional().max(1),
            NineSliceMode::Minimum => self.min_px.max(inset.min(total_src)),
            // max/min rather than clamp: a misconfigured min > max must not panic.
            NineSliceMode::Clamped => {
                let v = self.min_px.max(proportional());
                self.max_px.min(v.min(total_src))
            }
        }
    }

    /// Destination insets for all four sides, before fitting to `dst`.
    pub fn dst_insets(&self, src_insets: Insets, src: Size, dst: Size) -> Insets {
        Insets::new(
            self.dst_inset(src_insets.left, src.width, dst.width),
            self.dst_inset(src_insets.top, src.height, dst.height),
            self.dst_inset(src_insets.right, src.width, dst.width),
            self.dst_inset(src_insets.bottom, src.height, dst.height),
        )
    }
}

// ── patches ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlicePart {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl SlicePart {
    // row-major, matching the patch array
    const GRID: [[SlicePart; 3]; 3] = [
        [SlicePart::TopLeft, SlicePart::Top, SlicePart::TopRight],
        [SlicePart::Left, SlicePart::Center, SlicePart::Right],
        [SlicePart::BottomLeft, SlicePart::Bottom, SlicePart::BottomRight],
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One quad of the decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicePatch {
    pub part: SlicePart,
    /// Relative to the destination's top-left.
    pub dst: Rect,
    /// Relative to the source region's top-left.
    pub src: Rect,
}

impl SlicePatch {
    /// The patch with `dst` moved to `dst_origin` and `src` to `src_origin`.
    pub fn offset(self, dst_origin: Point, src_origin: Point) -> Self {
        Self {
            part: self.part,
            dst: self.dst.translate(dst_origin),
            src: self.src.translate(src_origin),
        }
    }
}

/// Result of [`slice`]: fitted destination insets plus the non-empty patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NineSlice {
    pub dst_insets: Insets,
    pub center: Size,
    patches: [Option<SlicePatch>; 9],
}

impl NineSlice {
    pub fn get(&self, part: SlicePart) -> Option<&SlicePatch> {
        self.patches[part.index()].as_ref()
    }

    /// Non-empty patches in row-major order.
    pub fn patches(&self) -> impl Iterator<Item = &SlicePatch> {
        self.patches.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.patches().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits a source region with `src_insets` onto a destination of `dst`.
///
/// Destination insets come from `policy`, then are fitted so opposite sides
/// never exceed the destination (left/top keep priority). Patches whose
/// destination or source area is zero are omitted.
pub fn slice(src_insets: Insets, src: Size, dst: Size, policy: NineSlicePolicy) -> NineSlice {
    let src_insets = fit(src_insets.non_negative(), src);
    let dst_insets = fit(policy.dst_insets(src_insets, src, dst), dst);

    let cols = spans(dst.width, dst_insets.left, dst_insets.right);
    let rows = spans(dst.height, dst_insets.top, dst_insets.bottom);
    let src_cols = spans(src.width, src_insets.left, src_insets.right);
    let src_rows = spans(src.height, src_insets.top, src_insets.bottom);

    let mut patches = [None; 9];
    for (row, parts) in SlicePart::GRID.iter().enumerate() {
        for (col, &part) in parts.iter().enumerate() {
            let (dx, dw) = cols[col];
            let (dy, dh) = rows[row];
            let (sx, sw) = src_cols[col];
            let (sy, sh) = src_rows[row];
            if dw <= 0 || dh <= 0 || sw <= 0 || sh <= 0 {
                continue;
            }
            patches[part.index()] = Some(SlicePatch {
                part,
                dst: Rect::new(dx, dy, dw, dh),
                src: Rect::new(sx, sy, sw, sh),
            });
        }
    }

    NineSlice {
        dst_insets,
        center: Size::new(cols[1].1, rows[1].1),
        patches,
    }
}

/// Fits opposite insets inside `size`; the leading side wins.
fn fit(i: Insets, size: Size) -> Insets {
    let (w, h) = (size.width.max(0), size.height.max(0));
    let left = i.left.clamp(0, w);
    let top = i.top.clamp(0, h);
    Insets {
        left,
        top,
        right: i.right.clamp(0, w - left),
        bottom: i.bottom.clamp(0, h - top),
    }
}

/// `(start, length)` of the leading, middle and trailing bands.
fn spans(extent: i32, lead: i32, trail: i32) -> [(i32, i32); 3] {
    let mid = (extent - lead - trail).max(0);
    [(0, lead), (lead, mid), (lead + mid, trail)]
}
