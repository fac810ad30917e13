use lodestar_engine::coords::{Insets, Point, Size};

use crate::component::UpdateCx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Cross-axis placement of children inside a [`PanelComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Flow layout: stacks the owner's children along one axis.
///
/// Runs after the owner's own size is final and writes each child's layout
/// offset. With auto-size enabled the owner is resized to fit its children;
/// children sized later in the same frame are picked up on the next one.
///
/// # Example
/// ```rust,ignore
/// let list = tree.spawn();
/// tree.add_component(list, PanelComponent::vertical().spacing(4).padding_all(6).auto_size())?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelComponent {
    orientation: Orientation,
    spacing: i32,
    padding: Insets,
    cross_align: CrossAlign,
    auto_width: bool,
    auto_height: bool,
}

impl Default for PanelComponent {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing: 2,
            padding: Insets::default(),
            cross_align: CrossAlign::Start,
            auto_width: false,
            auto_height: false,
        }
    }
}

impl PanelComponent {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self { orientation: Orientation::Horizontal, ..Self::default() }
    }

    /// Gap between consecutive children; negative values clamp to zero.
    pub fn spacing(mut self, v: i32) -> Self {
        self.spacing = v.max(0);
        self
    }

    pub fn padding(mut self, insets: Insets) -> Self {
        self.padding = insets.non_negative();
        self
    }

    pub fn padding_all(self, v: i32) -> Self {
        self.padding(Insets::all(v))
    }

    pub fn cross_align(mut self, align: CrossAlign) -> Self {
        self.cross_align = align;
        self
    }

    /// Resize the owner on both axes to wrap its children.
    pub fn auto_size(mut self) -> Self {
        self.auto_width = true;
        self.auto_height = true;
        self
    }

    pub fn auto_size_axes(mut self, width: bool, height: bool) -> Self {
        self.auto_width = width;
        self.auto_height = height;
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_spacing(&mut self, v: i32) {
        self.spacing = v.max(0);
    }

    pub fn set_padding(&mut self, insets: Insets) {
        self.padding = insets.non_negative();
    }

    pub fn set_cross_align(&mut self, align: CrossAlign) {
        self.cross_align = align;
    }

    // ── layout helpers ────────────────────────────────────────────────────

    /// (main, cross) extents of `s` for this orientation.
    fn split(&self, s: Size) -> (i32, i32) {
        match self.orientation {
            Orientation::Vertical => (s.height, s.width),
            Orientation::Horizontal => (s.width, s.height),
        }
    }

    fn join(&self, main: i32, cross: i32) -> Point {
        match self.orientation {
            Orientation::Vertical => Point::new(cross, main),
            Orientation::Horizontal => Point::new(main, cross),
        }
    }

    /// Leading and total padding as (main_lead, cross_lead, main_total, cross_total).
    fn padding_split(&self) -> (i32, i32, i32, i32) {
        let p = self.padding;
        match self.orientation {
            Orientation::Vertical => (p.top, p.left, p.v(), p.h()),
            Orientation::Horizontal => (p.left, p.top, p.h(), p.v()),
        }
    }

    /// Size needed to fit children of the given sizes, padding included.
    pub fn content_size(&self, children: &[Size]) -> Size {
        let (_, _, pad_main, pad_cross) = self.padding_split();
        let gaps = self.spacing * (children.len().saturating_sub(1) as i32);
        let main: i32 = children.iter().map(|&s| self.split(s).0).sum::<i32>() + gaps + pad_main;
        let cross = children.iter().map(|&s| self.split(s).1).max().unwrap_or(0) + pad_cross;
        match self.orientation {
            Orientation::Vertical => Size::new(cross, main),
            Orientation::Horizontal => Size::new(main, cross),
        }
    }

    /// Offsets of children of the given sizes inside an owner of `owner` size.
    pub fn arrange(&self, owner: Size, children: &[Size]) -> Vec<Point> {
        let (lead_main, lead_cross, _, pad_cross) = self.padding_split();
        let avail_cross = (self.split(owner).1 - pad_cross).max(0);
        let mut cursor = lead_main;
        children
            .iter()
            .map(|&s| {
                let (main, cross) = self.split(s);
                let along = match self.cross_align {
                    CrossAlign::Start => 0,
                    CrossAlign::Center => (avail_cross - cross) / 2,
                    CrossAlign::End => avail_cross - cross,
                };
                let at = self.join(cursor, lead_cross + along);
                cursor += main + self.spacing;
                at
            })
            .collect()
    }

    pub(crate) fn update(&mut self, cx: &mut UpdateCx<'_>) -> anyhow::Result<()> {
        let children = cx.tree.children(cx.owner).to_vec();
        let sizes: Vec<Size> = children.iter().map(|&c| cx.tree.scaled_size(c)).collect();

        if self.auto_width || self.auto_height {
            let content = self.content_size(&sizes);
            let current = cx.tree.size(cx.owner);
            let target = Size::new(
                if self.auto_width { content.width } else { current.width },
                if self.auto_height { content.height } else { current.height },
            );
            cx.tree.set_size(cx.owner, target)?;
        }

        let owner = cx.tree.scaled_size(cx.owner);
        for (child, at) in children.into_iter().zip(self.arrange(owner, &sizes)) {
            cx.tree.set_layout_offset(child, at)?;
        }
        Ok(())
    }
}
