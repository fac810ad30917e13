//! Smoothed progress values and the tile-based progress bar.

use lodestar_engine::coords::Size;

use crate::clip::ContentClip;
use crate::component::UpdateCx;
use crate::components::{BackgroundComponent, PanelComponent, fit_to_region};
use crate::regions;
use crate::texture::TextureRegion;
use crate::tree::{EntityId, TreeError, UiTree};

pub const DEFAULT_SPEED: f32 = 6.0;

#[inline]
fn unit_or_zero(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ── AnimatedProgress ──────────────────────────────────────────────────────

/// A `[0, 1]` value that eases toward its target with exponential smoothing.
///
/// Each update moves `displayed` by `(target - displayed) * (1 - e^(-speed·dt))`,
/// so it approaches the target monotonically and never overshoots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedProgress {
    target: f32,
    displayed: f32,
    speed: f32,
    animate: bool,
}

impl Default for AnimatedProgress {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl AnimatedProgress {
    pub fn new(speed: f32) -> Self {
        Self { target: 0.0, displayed: 0.0, speed: sanitize_speed(speed), animate: true }
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Clamped to `[0, 1]`; NaN becomes `0`. Snaps immediately when not animating.
    pub fn set_target(&mut self, p: f32) {
        self.target = unit_or_zero(p);
        if !self.animating() {
            self.displayed = self.target;
        }
    }

    /// Non-positive or NaN speed disables smoothing.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = sanitize_speed(speed);
    }

    pub fn set_animate(&mut self, on: bool) {
        self.animate = on;
        if !on {
            self.displayed = self.target;
        }
    }

    /// Jumps straight to the target.
    pub fn snap(&mut self) {
        self.displayed = self.target;
    }

    fn animating(&self) -> bool {
        self.animate && self.speed > 0.0
    }

    /// Advances by `dt` seconds and returns the displayed value.
    /// NaN or negative `dt` counts as zero.
    pub fn update(&mut self, dt: f32) -> f32 {
        if !self.animating() {
            self.displayed = self.target;
            return self.displayed;
        }
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let alpha = 1.0 - (-self.speed * dt).exp();
        self.displayed = unit_or_zero(self.displayed + (self.target - self.displayed) * alpha);
        self.displayed
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_nan() { 0.0 } else { speed.max(0.0) }
}

// ── segment fill ──────────────────────────────────────────────────────────

/// How much of one segment is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFill {
    /// Horizontal clip fraction in `[0, 1]`.
    pub fraction: f32,
    pub visible: bool,
}

impl SegmentFill {
    const HIDDEN: SegmentFill = SegmentFill { fraction: 0.0, visible: false };
    const FULL: SegmentFill = SegmentFill { fraction: 1.0, visible: true };
}

/// Distributes `displayed` of the total width over consecutive segments.
///
/// The filled pixel count is `round(total * displayed)`; earlier segments
/// fill completely before later ones start.
pub fn fill_segments(widths: &[i32], displayed: f32) -> Vec<SegmentFill> {
    let total: i64 = widths.iter().map(|&w| i64::from(w.max(0))).sum();
    let filled = (total as f64 * f64::from(unit_or_zero(displayed))).round() as i64;
    let mut consumed = 0i64;
    widths
        .iter()
        .map(|&w| {
            let w = i64::from(w.max(0));
            let remaining = filled - consumed;
            consumed += w;
            if remaining <= 0 {
                SegmentFill::HIDDEN
            } else if remaining >= w {
                SegmentFill::FULL
            } else {
                SegmentFill { fraction: remaining as f32 / w.max(1) as f32, visible: true }
            }
        })
        .collect()
}

// ── ProgressComponent ─────────────────────────────────────────────────────

/// Drives an [`AnimatedProgress`] and clips the segments of a fill row.
///
/// Each child of the fill row is one segment; its [`BackgroundComponent`]
/// gets a horizontal clip and the child is hidden when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressComponent {
    progress: AnimatedProgress,
    fill_row: Option<EntityId>,
}

impl ProgressComponent {
    pub fn new(speed: f32) -> Self {
        Self { progress: AnimatedProgress::new(speed), fill_row: None }
    }

    pub fn with_fill_row(mut self, row: EntityId) -> Self {
        self.fill_row = Some(row);
        self
    }

    #[inline]
    pub fn progress(&self) -> &AnimatedProgress {
        &self.progress
    }

    #[inline]
    pub fn progress_mut(&mut self) -> &mut AnimatedProgress {
        &mut self.progress
    }

    pub fn fill_row(&self) -> Option<EntityId> {
        self.fill_row
    }

    pub(crate) fn update(&mut self, cx: &mut UpdateCx<'_>, dt: f32) -> anyhow::Result<()> {
        let displayed = self.progress.update(dt);
        let Some(row) = self.fill_row else {
            return Ok(());
        };
        let tiles = cx.tree.children(row).to_vec();
        let widths: Vec<i32> = tiles.iter().map(|&t| cx.tree.scaled_size(t).width).collect();

        for (tile, fill) in tiles.into_iter().zip(fill_segments(&widths, displayed)) {
            cx.tree.set_visible(tile, fill.visible)?;
            let clip = Some(ContentClip::horizontal(fill.fraction));
            let current = cx.tree.component::<BackgroundComponent>(tile).map(|bg| bg.clip());
            if current.is_some_and(|c| c != clip) {
                if let Some(bg) = cx.tree.component_mut::<BackgroundComponent>(tile) {
                    bg.set_clip(clip);
                }
            }
        }
        Ok(())
    }
}

// ── tile progress bar ─────────────────────────────────────────────────────

/// Regions for a [`TileProgressBar`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSkin {
    pub border_left: TextureRegion,
    pub border_tile: TextureRegion,
    pub border_right: TextureRegion,
    pub fill_left: TextureRegion,
    pub fill_tile: TextureRegion,
    pub fill_right: TextureRegion,
}

impl Default for ProgressSkin {
    fn default() -> Self {
        Self {
            border_left: regions::progress_border_tile_left(),
            border_tile: regions::progress_border_tile(),
            border_right: regions::progress_border_tile_right(),
            fill_left: regions::progress_fill_tile_left(),
            fill_tile: regions::progress_fill_tile(),
            fill_right: regions::progress_fill_tile_right(),
        }
    }
}

/// Handles to a tile progress bar built inside a [`UiTree`].
///
/// The bar entity carries the [`ProgressComponent`]; its two children are
/// overlaid rows (border behind, fill in front), each laid out as
/// `left cap + N tiles + right cap` by a horizontal panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProgressBar {
    pub bar: EntityId,
    pub border_row: EntityId,
    pub fill_row: EntityId,
}

impl TileProgressBar {
    /// Builds a bar with `tiles` middle tiles (at least one) as a new root.
    pub fn build(tree: &mut UiTree, tiles: usize, skin: &ProgressSkin, speed: f32) -> Result<Self, TreeError> {
        let tiles = tiles.max(1);
        let bar = tree.spawn();

        let border: Vec<TextureRegion> = row_regions(&skin.border_left, &skin.border_tile, &skin.border_right, tiles);
        let fill: Vec<TextureRegion> = row_regions(&skin.fill_left, &skin.fill_tile, &skin.fill_right, tiles);
        let border_row = build_row(tree, bar, &border)?;
        let fill_row = build_row(tree, bar, &fill)?;

        let size = row_size(&border);
        tree.set_size(bar, size)?;
        tree.add_component(bar, ProgressComponent::new(speed).with_fill_row(fill_row))?;

        // Lays out the rows and hides the empty fill.
        tree.update(bar, 0.0);
        log::debug!("built progress bar {bar:?} with {tiles} tiles, {}x{}", size.width, size.height);
        Ok(Self { bar, border_row, fill_row })
    }

    fn with_progress<R>(&self, tree: &mut UiTree, f: impl FnOnce(&mut AnimatedProgress) -> R) -> Option<R> {
        tree.component_mut::<ProgressComponent>(self.bar).map(|c| f(c.progress_mut()))
    }

    pub fn set_progress(&self, tree: &mut UiTree, p: f32) {
        self.with_progress(tree, |a| a.set_target(p));
    }

    /// Target value, `None` if the bar was destroyed.
    pub fn progress(&self, tree: &UiTree) -> Option<f32> {
        tree.component::<ProgressComponent>(self.bar).map(|c| c.progress().target())
    }

    pub fn displayed(&self, tree: &UiTree) -> Option<f32> {
        tree.component::<ProgressComponent>(self.bar).map(|c| c.progress().displayed())
    }

    pub fn set_animate(&self, tree: &mut UiTree, on: bool) {
        self.with_progress(tree, |a| a.set_animate(on));
    }

    pub fn set_speed(&self, tree: &mut UiTree, speed: f32) {
        self.with_progress(tree, |a| a.set_speed(speed));
    }

    pub fn set_fill_color(&self, tree: &mut UiTree, rgb: u32) {
        tint_row(tree, self.fill_row, rgb);
    }

    pub fn set_border_color(&self, tree: &mut UiTree, rgb: u32) {
        tint_row(tree, self.border_row, rgb);
    }
}

fn row_regions(left: &TextureRegion, tile: &TextureRegion, right: &TextureRegion, tiles: usize) -> Vec<TextureRegion> {
    let mut regions = Vec::with_capacity(tiles + 2);
    regions.push(*left);
    regions.extend(std::iter::repeat_n(*tile, tiles));
    regions.push(*right);
    regions
}

fn row_size(regions: &[TextureRegion]) -> Size {
    let w = regions.iter().map(|r| r.size().width).sum();
    let h = regions.iter().map(|r| r.size().height).max().unwrap_or(0);
    Size::new(w, h)
}

fn build_row(tree: &mut UiTree, bar: EntityId, regions: &[TextureRegion]) -> Result<EntityId, TreeError> {
    let row = tree.spawn_child(bar)?;
    tree.add_component(row, PanelComponent::horizontal().spacing(0).auto_size())?;
    tree.set_size(row, row_size(regions))?;
    for region in regions {
        let tile = tree.spawn_child(row)?;
        tree.add_component(tile, BackgroundComponent::new(*region))?;
        fit_to_region(tree, tile)?;
    }
    Ok(row)
}

fn tint_row(tree: &mut UiTree, row: EntityId, rgb: u32) {
    for tile in tree.children(row).to_vec() {
        if let Some(bg) = tree.component_mut::<BackgroundComponent>(tile) {
            bg.set_tint(rgb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_at_44_percent() {
        let fills = fill_segments(&[10; 5], 0.44);
        let fractions: Vec<f32> = fills.iter().map(|f| f.fraction).collect();
        let visible: Vec<bool> = fills.iter().map(|f| f.visible).collect();
        assert_eq!(fractions, vec![1.0, 1.0, 0.2, 0.0, 0.0]);
        assert_eq!(visible, vec![true, true, true, false, false]);
    }

    #[test]
    fn segments_empty_and_full() {
        assert!(fill_segments(&[10, 11, 5], 0.0).iter().all(|f| !f.visible));
        assert!(fill_segments(&[10, 11, 5], 1.0).iter().all(|f| f.visible && f.fraction == 1.0));
        assert!(fill_segments(&[10, 11, 5], f32::NAN).iter().all(|f| !f.visible));
    }

    #[test]
    fn segments_uneven_widths() {
        // total 26, 50% -> 13 px
        let fills = fill_segments(&[10, 4, 12], 0.5);
        assert_eq!(fills[0], SegmentFill::FULL);
        assert_eq!(fills[1].fraction, 0.75);
        assert_eq!(fills[2], SegmentFill::HIDDEN);
    }

    #[test]
    fn eases_monotonically_without_overshoot() {
        let mut p = AnimatedProgress::new(6.0);
        p.set_target(1.0);
        let mut last = p.displayed();
        for _ in 0..120 {
            let d = p.update(1.0 / 60.0);
            assert!(d >= last && d <= 1.0);
            last = d;
        }
        assert!(last > 0.99);

        p.set_target(0.25);
        for _ in 0..120 {
            let d = p.update(1.0 / 60.0);
            assert!(d <= last && d >= 0.25);
            last = d;
        }
    }

    #[test]
    fn one_step_matches_exponential_smoothing() {
        let mut p = AnimatedProgress::new(6.0);
        p.set_target(1.0);
        let d = p.update(0.1);
        let expected = 1.0 - (-0.6f32).exp();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn snaps_when_not_animating() {
        let mut p = AnimatedProgress::new(0.0);
        p.set_target(0.7);
        assert_eq!(p.displayed(), 0.7);

        let mut p = AnimatedProgress::new(6.0);
        p.set_animate(false);
        p.set_target(0.3);
        assert_eq!(p.update(0.0), 0.3);
    }

    #[test]
    fn bad_inputs_are_clamped() {
        let mut p = AnimatedProgress::default();
        p.set_target(f32::NAN);
        assert_eq!(p.target(), 0.0);
        p.set_target(4.0);
        assert_eq!(p.target(), 1.0);
        let before = p.displayed();
        p.update(f32::NAN);
        p.update(-1.0);
        assert_eq!(p.displayed(), before);
        p.set_speed(f32::NAN);
        assert_eq!(p.update(0.016), 1.0);
    }

    #[test]
    fn bar_layout_and_size() {
        let mut tree = UiTree::new();
        let bar = TileProgressBar::build(&mut tree, 3, &ProgressSkin::default(), DEFAULT_SPEED).unwrap();
        // 10 + 3*10 + 11
        assert_eq!(tree.size(bar.bar), Size::new(51, 5));
        assert_eq!(tree.children(bar.bar), &[bar.border_row, bar.fill_row]);
        assert_eq!(tree.children(bar.fill_row).len(), 5);

        let xs: Vec<i32> = tree.children(bar.border_row).to_vec().into_iter().map(|t| tree.rect(t).x).collect();
        assert_eq!(xs, vec![0, 10, 20, 30, 40]);
        // nothing filled yet
        assert!(tree.children(bar.fill_row).iter().all(|&t| !tree.is_visible(t)));
    }

    #[test]
    fn bar_clips_fill_tiles() {
        let mut tree = UiTree::new();
        let bar = TileProgressBar::build(&mut tree, 3, &ProgressSkin::default(), DEFAULT_SPEED).unwrap();
        bar.set_animate(&mut tree, false);
        bar.set_progress(&mut tree, 0.5);
        tree.update(bar.bar, 0.016);

        // 51 px * 0.5 = 25.5 -> 26 filled: 10, 10, 6/10, hidden, hidden
        let tiles = tree.children(bar.fill_row).to_vec();
        let clips: Vec<_> = tiles
            .iter()
            .map(|&t| tree.component::<BackgroundComponent>(t).and_then(|bg| bg.clip()).map(|c| c.fraction))
            .collect();
        assert_eq!(clips[..3], [Some(1.0), Some(1.0), Some(0.6)]);
        let visible: Vec<bool> = tiles.iter().map(|&t| tree.is_visible(t)).collect();
        assert_eq!(visible, vec![true, true, true, false, false]);
        assert_eq!(bar.displayed(&tree), Some(0.5));
    }

    #[test]
    fn tint_setters_reach_every_tile() {
        let mut tree = UiTree::new();
        let bar = TileProgressBar::build(&mut tree, 1, &ProgressSkin::default(), DEFAULT_SPEED).unwrap();
        bar.set_fill_color(&mut tree, 0x00FF00);
        bar.set_border_color(&mut tree, 0x202020);
        for &t in tree.children(bar.fill_row) {
            assert_eq!(tree.component::<BackgroundComponent>(t).map(|b| b.tint()), Some(0x00FF00));
        }
        for &t in tree.children(bar.border_row) {
            assert_eq!(tree.component::<BackgroundComponent>(t).map(|b| b.tint()), Some(0x202020));
        }
    }
}
