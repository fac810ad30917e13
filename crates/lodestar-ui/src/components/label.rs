use lodestar_engine::coords::{Insets, Point, Size};
use lodestar_engine::paint::Color;

use crate::component::{RenderCx, UpdateCx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Estimated glyph advance and line height used before the host has measured.
const FALLBACK_ADVANCE: i32 = 6;
const FALLBACK_LINE: i32 = 8;

/// Text drawn with the host font, sizing its owner to fit.
///
/// Measurement needs the host, so it happens during render; the owner is
/// resized right away and the next update keeps it in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelComponent {
    text: String,
    color: Color,
    shadow: bool,
    padding: i32,
    h_align: HAlign,
    v_align: VAlign,
    auto_size: bool,
    /// Last measured text block, without padding.
    measured: Option<Size>,
}

impl LabelComponent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            shadow: true,
            padding: 2,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            auto_size: true,
            measured: None,
        }
    }

    pub fn color(mut self, rgb: u32) -> Self {
        self.color = Color::from_rgb_hex(rgb);
        self
    }

    pub fn shadow(mut self, on: bool) -> Self {
        self.shadow = on;
        self
    }

    pub fn padding(mut self, px: i32) -> Self {
        self.padding = px.max(0);
        self
    }

    pub fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    /// Keep the owner's size as authored instead of fitting the text.
    pub fn fixed_size(mut self) -> Self {
        self.auto_size = false;
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.measured = None;
        }
    }

    pub fn set_color(&mut self, rgb: u32) {
        self.color = Color::from_rgb_hex(rgb);
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    fn estimate(&self) -> Size {
        let widest = self.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let count = self.lines().count();
        Size::new(
            i32::try_from(widest).unwrap_or(i32::MAX).saturating_mul(FALLBACK_ADVANCE),
            i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(FALLBACK_LINE),
        )
    }

    /// Owner size for the current text: measured if available, estimated otherwise.
    pub fn preferred_size(&self) -> Size {
        let content = self.measured.unwrap_or_else(|| self.estimate());
        let pad = self.padding.saturating_mul(2);
        Size::new(content.width.saturating_add(pad), content.height.saturating_add(pad))
    }

    pub(crate) fn update(&mut self, cx: &mut UpdateCx<'_>) -> anyhow::Result<()> {
        if self.auto_size {
            cx.tree.set_size(cx.owner, self.preferred_size())?;
        }
        Ok(())
    }

    pub(crate) fn render(&mut self, cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
        let line_h = cx.host.line_height();
        let widths: Vec<i32> = self.lines().map(|l| cx.host.measure_text(l)).collect();
        let block = Size::new(
            widths.iter().copied().max().unwrap_or(0),
            line_h.saturating_mul(widths.len() as i32),
        );
        if self.measured != Some(block) {
            self.measured = Some(block);
            if self.auto_size {
                cx.tree.set_size(cx.owner, self.preferred_size())?;
            }
        }

        let content = cx.tree.rect(cx.owner).inset(Insets::all(self.padding));
        let top = match self.v_align {
            VAlign::Top => 0,
            VAlign::Center => (content.height - block.height) / 2,
            VAlign::Bottom => content.height - block.height,
        };
        for (i, (line, w)) in self.lines().zip(&widths).enumerate() {
            if line.is_empty() {
                continue;
            }
            let left = match self.h_align {
                HAlign::Left => 0,
                HAlign::Center => (content.width - w) / 2,
                HAlign::Right => content.width - w,
            };
            let origin = Point::new(content.x + left, content.y + top + line_h * i as i32);
            cx.host.draw_text(line, origin, self.color, self.shadow);
        }
        Ok(())
    }
}
