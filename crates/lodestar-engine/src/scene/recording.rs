use crate::coords::{Point, Rect, Size};
use crate::host::{Quad, RenderHost};
use crate::paint::Color;

use super::{DrawCmd, DrawList, TextCmd};

/// A [`RenderHost`] that records every call into a [`DrawList`].
///
/// Text is measured with a fixed advance per `char`, which is enough to make
/// label sizing deterministic in tests and headless runs.
#[derive(Debug)]
pub struct RecordingHost {
    pub viewport: Size,
    pub draw_list: DrawList,
    pub glyph_advance: i32,
    pub line_height: i32,
}

impl RecordingHost {
    pub fn new(viewport: Size) -> Self {
        Self { viewport, draw_list: DrawList::new(), glyph_advance: 6, line_height: 9 }
    }

    /// Drops everything recorded so far; call between frames.
    pub fn begin_frame(&mut self) {
        self.draw_list.clear();
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new(Size::new(320, 240))
    }
}

impl RenderHost for RecordingHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn draw_textured_quad(&mut self, quad: Quad) {
        self.draw_list.push(DrawCmd::Quad(quad));
    }

    fn set_tint(&mut self, color: Color) {
        self.draw_list.push(DrawCmd::SetTint(color));
    }

    fn clear_tint(&mut self) {
        self.draw_list.push(DrawCmd::ClearTint);
    }

    fn push_scissor(&mut self, rect: Rect) {
        self.draw_list.push(DrawCmd::PushScissor(rect));
    }

    fn pop_scissor(&mut self) {
        self.draw_list.push(DrawCmd::PopScissor);
    }

    fn measure_text(&self, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.glyph_advance)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color, shadow: bool) {
        self.draw_list.push(DrawCmd::Text(TextCmd { text: text.to_owned(), origin, color, shadow }));
    }
}
