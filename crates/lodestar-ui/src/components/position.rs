use lodestar_engine::coords::Point;

use crate::anchor::{Anchor, AnchorPoint, AnchorSpec, Margin, Margins};
use crate::component::UpdateCx;

/// Places its owner relative to the parent through an [`AnchorSpec`].
///
/// The resolved rectangle is memoized on the owner; the update hook only
/// warms that cache once size components have run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionComponent {
    spec: AnchorSpec,
    /// Written by a parent's flow layout, added to `spec.local_offset`.
    layout_offset: Point,
}

impl PositionComponent {
    pub fn new(spec: AnchorSpec) -> Self {
        Self { spec, layout_offset: Point::zero() }
    }

    pub fn at(x: i32, y: i32) -> Self {
        Self::new(AnchorSpec { local_offset: Point::new(x, y), ..AnchorSpec::default() })
    }

    /// Same anchor on parent and pivot.
    pub fn aligned(anchor: Anchor) -> Self {
        Self::new(AnchorSpec::aligned(anchor))
    }

    #[inline]
    pub fn spec(&self) -> &AnchorSpec {
        &self.spec
    }

    #[inline]
    pub fn spec_mut(&mut self) -> &mut AnchorSpec {
        &mut self.spec
    }

    /// The spec actually resolved: authored local offset plus layout offset.
    pub fn effective_spec(&self) -> AnchorSpec {
        AnchorSpec {
            local_offset: self.spec.local_offset + self.layout_offset,
            ..self.spec
        }
    }

    #[inline]
    pub fn local_position(&self) -> Point {
        self.spec.local_offset
    }

    pub fn set_local_position(&mut self, pos: Point) {
        self.spec.local_offset = pos;
    }

    #[inline]
    pub fn layout_offset(&self) -> Point {
        self.layout_offset
    }

    pub fn set_layout_offset(&mut self, offset: Point) {
        self.layout_offset = offset;
    }

    pub fn set_parent_anchor(&mut self, anchor: impl Into<AnchorPoint>) {
        self.spec.parent_anchor = anchor.into();
    }

    pub fn set_pivot(&mut self, pivot: impl Into<AnchorPoint>) {
        self.spec.pivot = pivot.into();
    }

    pub fn set_alignment(&mut self, parent: impl Into<AnchorPoint>, pivot: impl Into<AnchorPoint>) {
        self.set_parent_anchor(parent);
        self.set_pivot(pivot);
    }

    pub fn margins(&self) -> &Margins {
        &self.spec.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.spec.margins = margins;
    }

    pub fn set_margin_left(&mut self, m: Margin) {
        self.spec.margins.left = m;
    }

    pub fn set_margin_top(&mut self, m: Margin) {
        self.spec.margins.top = m;
    }

    pub fn set_margin_right(&mut self, m: Margin) {
        self.spec.margins.right = m;
    }

    pub fn set_margin_bottom(&mut self, m: Margin) {
        self.spec.margins.bottom = m;
    }

    /// Accumulates into the extra offset.
    pub fn add_offset(&mut self, by: Point) {
        self.spec.extra_offset = self.spec.extra_offset + by;
    }

    pub fn clear_offset(&mut self) {
        self.spec.extra_offset = Point::zero();
    }

    pub(crate) fn update(&mut self, cx: &mut UpdateCx<'_>) -> anyhow::Result<()> {
        // Lent out while running, so resolve with our own spec.
        cx.tree.resolve_rect(cx.owner, Some(self.effective_spec()));
        Ok(())
    }
}
